mod bucket;
mod member;
mod session;

pub use self::bucket::{Bucket, normalize_bucket_list};
pub use self::member::GroupMember;
pub use self::session::Session;

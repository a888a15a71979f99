use super::*;

impl ApiClient {
    pub fn create_bucket(&self, payload: &Value) -> Result<Value, ApiError> {
        self.require_token()?;
        self.send(Method::POST, "/buckets", Some(payload))
    }

    /// `GET /buckets?group=<display name>`; an empty group is sent as `group=`.
    pub fn list_buckets(&self, group: &str) -> Result<Value, ApiError> {
        self.require_token()?;
        let path = format!("/buckets?group={}", urlencoding::encode(group));
        self.send(Method::GET, &path, None)
    }

    pub fn delete_bucket(&self, name: &str) -> Result<Value, ApiError> {
        self.require_token()?;
        let path = format!("/buckets/{}", urlencoding::encode(name));
        self.send(Method::DELETE, &path, None)
    }
}

use super::*;

/// Group name prefixes that mark a group as administrative.
pub const ADMIN_GROUP_PREFIXES: [&str; 2] = ["oci-administrators", "gcp-administrators"];

/// Extracts `memberOf` from a `/user/groups` body. A missing or non-array
/// field yields an empty list; entries that are not member objects are
/// skipped.
pub fn parse_memberships(body: &Value) -> Vec<GroupMember> {
    let Some(entries) = body.get("memberOf").and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
        .collect()
}

fn normalized(s: Option<&str>) -> String {
    s.unwrap_or("").trim().to_lowercase()
}

pub fn is_admin_group(member: &GroupMember) -> bool {
    let name = normalized(member.display_name.as_deref());
    let id = normalized(member.id.as_deref());
    ADMIN_GROUP_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix) || id.starts_with(prefix))
}

/// Keeps administrative groups, preserving order.
pub fn filter_admin_groups(members: Vec<GroupMember>) -> Vec<GroupMember> {
    members.into_iter().filter(is_admin_group).collect()
}

/// Case-insensitive substring match over display name and id. An empty
/// needle matches everything.
pub fn matches_filter(member: &GroupMember, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    let name = member.display_name.as_deref().unwrap_or("").to_lowercase();
    let id = member.id.as_deref().unwrap_or("").to_lowercase();
    name.contains(&needle) || id.contains(&needle)
}

#[cfg(test)]
#[path = "../tests/directory/filter_tests.rs"]
mod tests;

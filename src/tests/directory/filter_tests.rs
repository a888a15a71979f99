use super::*;
use serde_json::json;

fn names(members: &[GroupMember]) -> Vec<&str> {
    members.iter().map(|m| m.label()).collect()
}

#[test]
fn keeps_admin_prefixes_case_and_whitespace_insensitive_in_order() {
    let body = json!({
        "memberOf": [
            { "id": "g1", "displayName": "  OCI-Administrators-cp-a" },
            { "id": "g2", "displayName": "Engineering" },
            { "id": "g3", "displayName": "gcp-administrators-cp-b" },
            { "id": "g4", "displayName": "Finance-OCI-Administrators" },
            { "id": "g5", "displayName": "GCP-ADMINISTRATORS" },
        ]
    });

    let kept = filter_admin_groups(parse_memberships(&body));
    assert_eq!(
        names(&kept),
        vec!["  OCI-Administrators-cp-a", "gcp-administrators-cp-b", "GCP-ADMINISTRATORS"]
    );
}

#[test]
fn matches_prefix_on_id_when_name_does_not() {
    let member = GroupMember::new(Some("oci-administrators-1234"), Some("Cloud team"));
    assert!(is_admin_group(&member));

    let neither = GroupMember::new(Some("1234"), Some("Cloud team"));
    assert!(!is_admin_group(&neither));

    let empty = GroupMember::new(None, None);
    assert!(!is_admin_group(&empty));
}

#[test]
fn missing_or_malformed_member_of_yields_empty_list() {
    assert!(parse_memberships(&json!({})).is_empty());
    assert!(parse_memberships(&json!({ "memberOf": "nope" })).is_empty());
    assert!(parse_memberships(&json!({ "memberOf": null })).is_empty());
}

#[test]
fn skips_entries_that_are_not_member_objects() {
    let body = json!({
        "memberOf": [
            42,
            { "id": "oci-administrators-x" },
            "gcp-administrators",
        ]
    });
    let parsed = parse_memberships(&body);
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].id.as_deref(), Some("oci-administrators-x"));
}

#[test]
fn text_filter_matches_name_or_id_ignoring_case() {
    let member = GroupMember::new(Some("ABC-123"), Some("OCI-Administrators-cp-infra"));
    assert!(matches_filter(&member, ""));
    assert!(matches_filter(&member, "INFRA"));
    assert!(matches_filter(&member, "abc-1"));
    assert!(!matches_filter(&member, "gcp"));
}

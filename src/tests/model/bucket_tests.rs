use super::*;
use serde_json::json;

#[test]
fn listing_entries_prefer_name_then_namespace_then_string_form() {
    let body = json!({
        "buckets": [
            { "name": "alpha", "storageNamespace": "ns" },
            { "storageNamespace": "ns-only" },
            "bare-string",
            { "name": "", "storageNamespace": "ns-fallback" },
            { "size": 3 },
        ]
    });
    let names: Vec<String> = normalize_bucket_list(&body)
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "alpha".to_string(),
            "ns-only".to_string(),
            "bare-string".to_string(),
            "ns-fallback".to_string(),
            r#"{"size":3}"#.to_string(),
        ]
    );
}

#[test]
fn missing_buckets_field_is_empty() {
    assert!(normalize_bucket_list(&json!({})).is_empty());
    assert!(normalize_bucket_list(&json!({ "buckets": {} })).is_empty());
}

use super::*;
use serde_json::json;

#[test]
fn empty_body_parses_as_empty_object() {
    assert_eq!(parse_body(""), json!({}));
}

#[test]
fn non_json_body_is_wrapped_as_raw() {
    assert_eq!(parse_body("Bad Gateway"), json!({ "raw": "Bad Gateway" }));
}

#[test]
fn json_body_is_parsed() {
    assert_eq!(parse_body(r#"{"detail":"x"}"#), json!({ "detail": "x" }));
}

#[test]
fn url_joins_base_and_path_without_double_slash() -> anyhow::Result<()> {
    let api = ApiClient::new("http://example.test/api/")?;
    assert_eq!(api.base_url(), "http://example.test/api");
    assert_eq!(api.url("/buckets"), "http://example.test/api/buckets");
    Ok(())
}

#[test]
fn empty_token_is_treated_as_absent() -> anyhow::Result<()> {
    let api = ApiClient::new("http://example.test")?.with_token(Some(String::new()));
    assert_eq!(api.token(), None);
    assert!(matches!(api.require_token(), Err(ApiError::MissingToken)));
    assert_eq!(api.bearer(), None);

    let api = api.with_token(Some("abc".to_string()));
    assert_eq!(api.bearer().as_deref(), Some("Bearer abc"));
    Ok(())
}

#[test]
fn bucket_calls_without_token_fail_before_sending() -> anyhow::Result<()> {
    let api = ApiClient::new("http://127.0.0.1:9")?;
    assert!(matches!(api.list_buckets("g"), Err(ApiError::MissingToken)));
    assert!(matches!(api.delete_bucket("b"), Err(ApiError::MissingToken)));
    assert!(matches!(
        api.create_bucket(&json!({ "name": "b" })),
        Err(ApiError::MissingToken)
    ));
    Ok(())
}

#[test]
fn cancelled_membership_fetch_aborts_without_request() -> anyhow::Result<()> {
    let api = ApiClient::new("http://127.0.0.1:9")?;
    let cancel = CancelToken::new();
    cancel.cancel();
    assert!(matches!(api.fetch_memberships(&cancel), Err(ApiError::Aborted)));
    Ok(())
}

#[test]
fn error_helpers_read_status_and_detail() {
    let err = ApiError::Http {
        status: 403,
        body: json!({ "detail": "forbidden" }),
    };
    assert_eq!(err.status(), Some(403));
    assert!(err.is_auth());
    assert_eq!(err.detail().as_deref(), Some("forbidden"));

    let raw = ApiError::Http {
        status: 500,
        body: json!({ "raw": "boom" }),
    };
    assert!(!raw.is_auth());
    assert_eq!(raw.detail(), None);
    assert_eq!(raw.body_text(), "boom");
}

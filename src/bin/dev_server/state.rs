use super::*;

pub(super) const DEV_TOKEN_PREFIX: &str = "dev-token-for-";

pub(super) struct AppState {
    pub(super) groups: Vec<Value>,
    /// Bucket name → compartment it was created in.
    pub(super) buckets: RwLock<BTreeMap<String, String>>,
}

fn group(id: &str, display_name: &str, kind: &str) -> Value {
    serde_json::json!({
        "id": id,
        "displayName": display_name,
        "odata_type": kind,
    })
}

pub(super) fn default_groups() -> Vec<Value> {
    vec![
        group(
            "0b1f4c2e-oci-admins",
            "OCI-Administrators-cp-infra-dev",
            "#microsoft.graph.group",
        ),
        group(
            "7d9a11b0-gcp-admins",
            "GCP-Administrators-cp-data-prod",
            "#microsoft.graph.group",
        ),
        group("3c5e8f21-eng", "Engineering", "#microsoft.graph.group"),
        group(
            "62e90394-global-reader",
            "Global Reader",
            "#microsoft.graph.directoryRole",
        ),
    ]
}

pub(super) fn parse_group_arg(raw: &str) -> Result<Value> {
    let (id, name) = raw
        .split_once('=')
        .with_context(|| format!("invalid --group '{}' (expected id=displayName)", raw))?;
    Ok(group(id.trim(), name.trim(), "#microsoft.graph.group"))
}

/// Extracts the `cp-...` compartment token from a group label.
pub(super) fn compartment_from_label(label: &str) -> Option<String> {
    static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    let re = RE.get_or_init(|| {
        regex::Regex::new(r"(?i)(cp[-_][A-Za-z0-9\-_]+)").expect("compartment pattern compiles")
    });
    re.captures(label).map(|c| c[1].to_string())
}

/// Trims and drops empty or placeholder values (`null`, `none`, `undefined`).
pub(super) fn sanitize(val: Option<&str>) -> Option<String> {
    let v = val?.trim();
    if v.is_empty() || matches!(v.to_lowercase().as_str(), "null" | "none" | "undefined") {
        return None;
    }
    Some(v.to_string())
}

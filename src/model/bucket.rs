use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
}

impl Bucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Normalizes one entry of a `{buckets: [...]}` listing.
    ///
    /// Prefers `name`, then `storageNamespace`; anything else is kept as its
    /// string form.
    pub fn from_entry(entry: &Value) -> Self {
        let field = |k: &str| {
            entry
                .get(k)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let name = field("name")
            .or_else(|| field("storageNamespace"))
            .unwrap_or_else(|| match entry {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        Self { name }
    }
}

/// Extracts and normalizes the `buckets` array of a listing response.
/// A missing or non-array field yields an empty list.
pub fn normalize_bucket_list(body: &Value) -> Vec<Bucket> {
    body.get("buckets")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(Bucket::from_entry).collect())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../tests/model/bucket_tests.rs"]
mod tests;

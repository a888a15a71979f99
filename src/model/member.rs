use serde::{Deserialize, Serialize};

/// One directory group the signed-in identity belongs to, as returned by
/// `GET /user/groups`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,

    #[serde(default, rename = "odata_type")]
    pub membership_kind: Option<String>,
}

impl GroupMember {
    pub fn new(id: Option<&str>, display_name: Option<&str>) -> Self {
        Self {
            id: id.map(str::to_string),
            display_name: display_name.map(str::to_string),
            membership_kind: None,
        }
    }

    /// Key used for selection tracking: `id`, else `displayName`, else empty.
    ///
    /// Members with an empty key can be rendered but never selected.
    pub fn selection_key(&self) -> &str {
        non_empty(self.id.as_deref())
            .or_else(|| non_empty(self.display_name.as_deref()))
            .unwrap_or("")
    }

    /// Key used for list rendering. Falls back to the serialized member when
    /// neither `id` nor `displayName` is set, so two such members with equal
    /// fields share a key.
    pub fn render_key(&self) -> String {
        let key = self.selection_key();
        if !key.is_empty() {
            return key.to_string();
        }
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn label(&self) -> &str {
        non_empty(self.display_name.as_deref()).unwrap_or("<no name>")
    }

    /// Secondary line shown under the label: the id, else the membership kind.
    pub fn detail(&self) -> &str {
        non_empty(self.id.as_deref())
            .or_else(|| non_empty(self.membership_kind.as_deref()))
            .unwrap_or("")
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

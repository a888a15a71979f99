use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("token not found (log in first)")]
    MissingToken,

    #[error("HTTP {status}: {}", pretty(.body))]
    Http { status: u16, body: Value },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request aborted")]
    Aborted,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401 and 403 both mean the session must be re-established.
    pub fn is_auth(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// The server's `detail` field, when the failure body carries one.
    pub fn detail(&self) -> Option<String> {
        let ApiError::Http { body, .. } = self else {
            return None;
        };
        match body.get("detail")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// The failure body as the server sent it: raw text when it was not JSON.
    pub fn body_text(&self) -> String {
        match self {
            ApiError::Http { body, .. } => match body.get("raw").and_then(Value::as_str) {
                Some(raw) if body.as_object().is_some_and(|o| o.len() == 1) => raw.to_string(),
                _ => body.to_string(),
            },
            other => other.to_string(),
        }
    }
}

fn pretty(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

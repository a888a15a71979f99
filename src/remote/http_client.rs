use super::*;

/// Parses a response body: empty → `{}`, invalid JSON → `{"raw": text}`.
pub fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw": text }))
}

pub(super) fn read_response(resp: reqwest::blocking::Response) -> Result<Value, ApiError> {
    let status = resp.status();
    let text = resp.text().unwrap_or_default();
    let body = parse_body(&text);
    if !status.is_success() {
        return Err(ApiError::Http {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

impl ApiClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn bearer(&self) -> Option<String> {
        self.token.as_deref().map(|t| format!("Bearer {}", t))
    }

    pub(super) fn require_token(&self) -> Result<(), ApiError> {
        match self.token {
            Some(_) => Ok(()),
            None => Err(ApiError::MissingToken),
        }
    }

    /// Sends one request, attaching the bearer token when set and a JSON body
    /// when given.
    pub fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut req = self
            .client
            .request(method, self.url(path))
            .header(ACCEPT, "application/json");
        if let Some(auth) = self.bearer() {
            req = req.header(AUTHORIZATION, auth);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        read_response(req.send()?)
    }
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;

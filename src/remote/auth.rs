use super::*;

impl ApiClient {
    /// `POST /login` with `{email}`. Returns the raw response body.
    pub fn login(&self, email: &str) -> Result<Value, ApiError> {
        self.send(
            Method::POST,
            "/login",
            Some(&serde_json::json!({ "email": email })),
        )
    }
}

use super::http_client::read_response;
use super::*;

impl ApiClient {
    /// `GET /user/groups`.
    ///
    /// Without a token the authorization header is sent empty and the server
    /// is expected to reject the call. A cancelled token short-circuits
    /// before the request and discards the response after it.
    pub fn fetch_memberships(&self, cancel: &CancelToken) -> Result<Value, ApiError> {
        if cancel.is_cancelled() {
            return Err(ApiError::Aborted);
        }
        let resp = self
            .client
            .get(self.url("/user/groups"))
            .header(AUTHORIZATION, self.bearer().unwrap_or_default())
            .header(ACCEPT, "application/json")
            .send()?;
        if cancel.is_cancelled() {
            return Err(ApiError::Aborted);
        }
        read_response(resp)
    }
}

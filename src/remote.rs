use anyhow::{Context, Result};
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;

mod error;
pub use self::error::ApiError;
mod cancel;
pub use self::cancel::CancelToken;
mod http_client;
pub use self::http_client::parse_body;

mod auth;
mod bucket_ops;
mod groups;

/// Blocking client for the console's backend API.
///
/// Cloning is cheap (the underlying connection pool is shared); fetch
/// workers each own a clone carrying the token that was current when the
/// fetch started.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("bucket-console")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

//! Durable session storage and the login/logout/restore lifecycle.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Session;
use crate::remote::{ApiClient, ApiError};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("enter a valid email (e.g. user@domain.com)")]
    InvalidEmail,

    #[error("invalid response from server, please try again")]
    InvalidResponse,

    /// The backend rejected the login with a structured `detail` message.
    #[error("{0}")]
    Rejected(String),

    #[error("could not connect to the server")]
    Unreachable(#[source] ApiError),

    #[error("save session: {0:#}")]
    Persist(anyhow::Error),
}

/// On-disk shape. Keys match the storage keys the web console used.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionRecord {
    #[serde(default)]
    api_token: Option<String>,

    #[serde(default)]
    user_email: Option<String>,
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email_pattern().is_match(email)
}

/// Maps a login response to a session; a body without `access_token` is
/// an invalid response.
pub fn session_from_login(
    email: &str,
    outcome: Result<Value, ApiError>,
) -> Result<Session, LoginError> {
    match outcome {
        Ok(body) => body
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(|token| Session::new(token, email))
            .ok_or(LoginError::InvalidResponse),
        Err(err) => match err.detail() {
            Some(detail) => Err(LoginError::Rejected(detail)),
            None => Err(LoginError::Unreachable(err)),
        },
    }
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    pub fn open(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(SESSION_FILE)
    }

    /// Reads the persisted session. Only a record with both a token and an
    /// email counts; the token is not re-validated here. An unparsable file
    /// is treated as no session.
    pub fn restore(&self) -> Result<Option<Session>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
        let rec: SessionRecord = match serde_json::from_slice(&bytes) {
            Ok(rec) => rec,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "ignoring unreadable session file"
                );
                return Ok(None);
            }
        };
        match (rec.api_token, rec.user_email) {
            (Some(token), Some(email)) if !token.is_empty() && !email.is_empty() => {
                Ok(Some(Session::new(token, email)))
            }
            _ => Ok(None),
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let rec = SessionRecord {
            api_token: Some(session.token.clone()),
            user_email: Some(session.email.clone()),
        };
        let bytes = serde_json::to_vec_pretty(&rec).context("serialize session")?;
        write_atomic(&self.path(), &bytes).context("write session.json")
    }

    /// Removes the persisted session. Clearing an absent session is fine.
    pub fn clear(&self) -> Result<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
        }
    }

    /// Validates the email locally, then exchanges it for a token. On success
    /// the session is persisted and installed on `api`.
    pub fn login(&self, api: &mut ApiClient, email: &str) -> Result<Session, LoginError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(LoginError::InvalidEmail);
        }
        let session = session_from_login(email, api.login(email))?;
        self.save(&session).map_err(LoginError::Persist)?;
        api.set_token(Some(session.token.clone()));
        tracing::info!(email = %session.email, "logged in");
        Ok(session)
    }

    pub fn logout(&self, api: &mut ApiClient) -> Result<()> {
        api.set_token(None);
        self.clear()?;
        tracing::info!("logged out");
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/session_store_tests.rs"]
mod tests;

//! Runtime configuration: API base URL profiles and the state directory.

use std::path::PathBuf;

/// Base URL variable read by the tolerant profile.
pub const API_BASE_ENV: &str = "BUCKET_CONSOLE_API_BASE";
/// Base URL variable read by the strict profile.
pub const API_BASE_URL_ENV: &str = "BUCKET_CONSOLE_API_BASE_URL";
/// Overrides the directory holding `session.json` and the log file.
pub const HOME_ENV: &str = "BUCKET_CONSOLE_HOME";

const APP_DIR: &str = "bucket-console";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not set (the strict profile requires an API base URL)")]
    MissingBaseUrl { var: &'static str },

    #[error("cannot determine a state directory (set {HOME_ENV} or pass --state-dir)")]
    NoStateDir,
}

/// How a missing base API URL is treated.
///
/// The interactive console defaults to `Tolerant`; one-shot bucket commands
/// default to `Strict`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ApiProfile {
    /// Missing base URL becomes an empty base; requests fail at call time.
    Tolerant,
    /// Missing base URL is a startup error.
    Strict,
}

impl ApiProfile {
    pub fn env_var(self) -> &'static str {
        match self {
            ApiProfile::Tolerant => API_BASE_ENV,
            ApiProfile::Strict => API_BASE_URL_ENV,
        }
    }

    pub fn resolve_base_url(self, explicit: Option<&str>) -> Result<String, ConfigError> {
        let from_env = std::env::var(self.env_var()).ok();
        resolve_base_url_from(self, explicit, from_env.as_deref())
    }
}

/// Picks the base URL from an explicit value, else the profile's variable.
pub fn resolve_base_url_from(
    profile: ApiProfile,
    explicit: Option<&str>,
    from_env: Option<&str>,
) -> Result<String, ConfigError> {
    let raw = explicit
        .or(from_env)
        .map(str::trim)
        .filter(|s| !s.is_empty());
    match (raw, profile) {
        (Some(url), _) => Ok(url.trim_end_matches('/').to_string()),
        (None, ApiProfile::Tolerant) => Ok(String::new()),
        (None, ApiProfile::Strict) => Err(ConfigError::MissingBaseUrl {
            var: profile.env_var(),
        }),
    }
}

pub fn resolve_state_dir(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoStateDir)
}

#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub profile: ApiProfile,
    pub state_dir: PathBuf,
    pub multi_select: bool,
}

impl ConsoleConfig {
    pub fn resolve(
        profile: ApiProfile,
        api_base: Option<&str>,
        state_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: profile.resolve_base_url(api_base)?,
            profile,
            state_dir: resolve_state_dir(state_dir)?,
            multi_select: false,
        })
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

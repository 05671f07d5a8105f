use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://apibeta.fellow.one";
pub const DEFAULT_SESSION_FILE: &str = ".admin-session.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub session_file: PathBuf,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, session_file: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_file: session_file.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("ADMIN_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let session_file =
            lookup("ADMIN_SESSION_FILE").unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string());
        let timeout_secs = match lookup("ADMIN_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::BadRequest(format!("ADMIN_HTTP_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Self::new(base_url, session_file);
        config.timeout = Duration::from_secs(timeout_secs);
        Ok(config)
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }
}

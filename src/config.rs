//! Client configuration
//!
//! Resolves the API base URL and the default token store location.
//!
//! ## Environment Variables
//!
//! - `API_BASE_URL` - Root address prefixed to every request path
//!   (default: `http://localhost:8080/api/v1`)
//! - `CONTENT_API_STORE` - Path of the SQLite token store used by the CLI
//!
//! These can be set in a `.env` file in the working directory.

use std::path::{Path, PathBuf};

/// Base URL used when no override is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Environment variable names
pub const ENV_BASE_URL: &str = "API_BASE_URL";
pub const ENV_STORE_PATH: &str = "CONTENT_API_STORE";

/// Directory name under the user data directory
pub const APP_DIR_NAME: &str = "content-platform";

/// Token store file name
pub const STORE_FILE_NAME: &str = "client.db";

/// Pick the base URL from an optional override.
///
/// A set, non-empty value is used verbatim; anything else falls back to
/// [`DEFAULT_BASE_URL`].
pub fn resolve_base_url(override_value: Option<String>) -> String {
    match override_value {
        Some(url) if !url.is_empty() => url,
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

/// Load a `.env` file from `dir` if one exists (errors are ignored)
pub fn load_env_file(dir: &Path) {
    let env_path = dir.join(".env");
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    }
}

/// Default location of the token store: `<data_dir>/content-platform/client.db`
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
        .join(APP_DIR_NAME)
        .join(STORE_FILE_NAME)
}

/// Settings needed to build an [`ApiClient`](crate::ApiClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root address of the API
    pub base_url: String,
    /// Optional per-request timeout; none by default
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_ms: None,
        }
    }

    /// Resolve the configuration from the process environment.
    ///
    /// Read once; the resulting base URL never changes afterwards.
    pub fn from_env() -> Self {
        Self {
            base_url: resolve_base_url(std::env::var(ENV_BASE_URL).ok()),
            timeout_ms: None,
        }
    }

    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }
}

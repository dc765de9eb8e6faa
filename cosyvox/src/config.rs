//! Explicit configuration for the DashScope client.
//!
//! The credential is a plain value threaded into [`crate::DashScope`] by the
//! caller. [`ApiConfig::from_env`] exists for the common case where the key
//! lives in `DASHSCOPE_API_KEY`, but nothing in this crate reads the
//! environment behind the caller's back.

use crate::errors::VoxError;

/// Environment variable holding the DashScope API key.
pub const API_KEY_ENV: &str = "DASHSCOPE_API_KEY";

/// Environment variable overriding the service base URL.
///
/// Primarily useful for pointing the client at a local mock server in tests.
pub const API_BASE_ENV: &str = "DASHSCOPE_API_BASE";

/// Production DashScope endpoint.
pub const DASHSCOPE_BASE_URL: &str = "https://dashscope.aliyuncs.com";

/// Credential and endpoint configuration for [`crate::DashScope`].
///
/// ## Examples
///
/// ```
/// use cosyvox::ApiConfig;
///
/// let config = ApiConfig::new("sk-test").with_base_url("http://localhost:8080");
/// assert_eq!(config.base_url, "http://localhost:8080");
/// ```
#[derive(Clone)]
pub struct ApiConfig {
    /// The pre-provisioned API key, sent as a bearer token.
    pub api_key: String,
    /// Base URL of the service, without a trailing slash.
    pub base_url: String,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the credential through Debug output
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiConfig {
    /// Create a configuration with an explicit API key and the production
    /// base URL.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DASHSCOPE_BASE_URL.to_string(),
        }
    }

    /// Override the base URL. Trailing slashes are stripped so path joining
    /// stays predictable.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Resolve the configuration from the environment.
    ///
    /// Reads the key from [`API_KEY_ENV`] and an optional base-URL override
    /// from [`API_BASE_ENV`]. An unset or empty key is a fatal configuration
    /// error; the caller is expected to surface it before any network
    /// activity.
    ///
    /// ## Errors
    ///
    /// Returns [`VoxError::MissingApiKey`] if the key variable is unset or
    /// blank.
    pub fn from_env() -> Result<Self, VoxError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(VoxError::MissingApiKey)?;

        let config = Self::new(api_key);
        match std::env::var(API_BASE_ENV) {
            Ok(base) if !base.trim().is_empty() => Ok(config.with_base_url(base)),
            _ => Ok(config),
        }
    }
}

//! Client configuration: base API address and request timeout.
//!
//! The base address is environment-supplied (`CLINIC_API_URL`) with a
//! local development default; the timeout is fixed at 10 seconds for
//! every request.

use std::time::Duration;
use url::Url;

/// Environment variable overriding the base API address.
pub const API_URL_ENV: &str = "CLINIC_API_URL";

/// Local development default, matching the API server's default bind.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/";

/// Per-request timeout applied by the HTTP client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from configuration resolution.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured base address is not a valid URL.
    #[error("invalid base API address {url:?}: {source}")]
    InvalidBaseUrl {
        /// The offending address string.
        url: String,
        /// The underlying parse failure.
        source: url::ParseError,
    },

    /// A relative endpoint path could not be joined onto the base address.
    #[error("invalid endpoint path {path:?}")]
    InvalidEndpoint {
        /// The offending relative path.
        path: String,
    },
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
    timeout: Duration,
}

impl ApiConfig {
    /// Build a configuration from an explicit base address.
    ///
    /// A trailing slash is appended when missing so that relative
    /// endpoint paths join under the API prefix rather than replacing
    /// its last segment.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let raw = base_url.as_ref();
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };
        let base_url = Url::parse(&normalized).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            source,
        })?;
        Ok(Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Build a configuration from `CLINIC_API_URL`, falling back to
    /// [`DEFAULT_BASE_URL`] when the variable is absent or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }

    /// The normalized base address (always slash-terminated).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

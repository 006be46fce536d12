//! API configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";
pub const BASE_URL_ENV: &str = "EXAM_API_BASE_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "EXAM_API_TIMEOUT_SECS";
pub const PUBLIC_ENDPOINTS_ENV: &str = "EXAM_API_PUBLIC_ENDPOINTS";

/// Endpoint patterns callable without a credential. A trailing `*` matches
/// any suffix. Everything else is protected.
pub const DEFAULT_PUBLIC_ENDPOINTS: [&str; 4] = ["/auth/login", "/auth/register", "/auth/password-reset*", "/contact"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    pub public_endpoints: Vec<String>,
    /// Caller-supplied request timeout; `None` leaves the transport default.
    pub request_timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            public_endpoints: DEFAULT_PUBLIC_ENDPOINTS.iter().map(|p| (*p).to_owned()).collect(),
            request_timeout: None,
        }
    }
}

impl ApiConfig {
    /// Build config from runtime environment variables.
    ///
    /// Optional:
    /// - `EXAM_API_BASE_URL`: default `http://127.0.0.1:5000/api`
    /// - `EXAM_API_TIMEOUT_SECS`: request timeout, unset or `0` for none
    /// - `EXAM_API_PUBLIC_ENDPOINTS`: comma-separated extra public patterns
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is not http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(BASE_URL_ENV).ok().as_deref(),
            std::env::var(REQUEST_TIMEOUT_ENV).ok().as_deref(),
            std::env::var(PUBLIC_ENDPOINTS_ENV).ok().as_deref(),
        )
    }

    /// Build config from variables captured at compile time (WASM builds have
    /// no process environment).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is not http(s).
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("EXAM_API_BASE_URL"),
            option_env!("EXAM_API_TIMEOUT_SECS"),
            option_env!("EXAM_API_PUBLIC_ENDPOINTS"),
        )
    }

    fn from_values(
        base_url: Option<&str>,
        timeout_secs: Option<&str>,
        extra_public: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(raw) = base_url.map(str::trim).filter(|v| !v.is_empty()) {
            config = config.with_base_url(raw)?;
        }
        config.request_timeout = timeout_secs
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        if let Some(raw) = extra_public {
            config.public_endpoints.extend(
                raw.split(',')
                    .map(str::trim)
                    .filter(|p| p.starts_with('/'))
                    .map(str::to_owned),
            );
        }
        Ok(config)
    }

    /// Replace the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `raw` is not an http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidBaseUrl(raw.to_owned()))?;
        if host.is_empty() {
            return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
        }
        trimmed.clone_into(&mut self.base_url);
        Ok(self)
    }

    /// Absolute URL for an endpoint path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

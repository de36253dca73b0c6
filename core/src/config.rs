//! Client configuration.
//!
//! # Design
//! `ClientConfig` is plain data, fixed once a client is built. It can be
//! assembled in code, deserialized from any serde format, or read from
//! `JOTFORM_*` environment variables.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.jotform.com/";
pub const DEFAULT_API_VERSION: &str = "v1";

pub const ENV_API_KEY: &str = "JOTFORM_API_KEY";
pub const ENV_DEBUG: &str = "JOTFORM_DEBUG";
pub const ENV_BASE_URL: &str = "JOTFORM_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "JOTFORM_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_key: String,
    /// Log each request URL and parameter bag through the client's logger.
    pub debug: bool,
    pub base_url: String,
    pub api_version: String,
    /// Global per-request timeout in milliseconds. `None` waits
    /// indefinitely; zero is rejected by [`ClientConfig::validate`].
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            debug: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sub-millisecond remainders round up, so a non-zero timeout never
    /// becomes zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let ms = timeout.as_nanos().div_ceil(1_000_000);
        self.timeout_ms = Some(u64::try_from(ms).unwrap_or(u64::MAX));
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Reject settings no request could succeed with.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::Config(format!(
                "base_url: expected an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.timeout_ms == Some(0) {
            return Err(ApiError::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from any variable lookup. `JOTFORM_API_KEY` is
    /// required; the rest fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ApiError::Config(format!("{ENV_API_KEY} is not set")))?;

        let mut config = Self::new(api_key.trim());

        if let Some(raw) = lookup(ENV_DEBUG) {
            config.debug = parse_flag(&raw)
                .ok_or_else(|| ApiError::Config(format!("{ENV_DEBUG}: expected a boolean, got {raw:?}")))?;
        }
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|u| !u.is_empty()) {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                ApiError::Config(format!("{ENV_TIMEOUT_SECS}: {e} ({raw:?})"))
            })?;
            if secs == 0 {
                return Err(ApiError::Config(format!("{ENV_TIMEOUT_SECS} must be greater than zero")));
            }
            config.timeout_ms = Some(secs.saturating_mul(1_000));
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

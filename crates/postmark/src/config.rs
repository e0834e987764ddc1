//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::POSTMARK_URL;
use crate::errors::PostmarkError;

/// Overrides the endpoint URL
pub const ENDPOINT_ENV: &str = "POSTMARK_API_URL";
/// Sets a request timeout, in whole seconds
pub const TIMEOUT_ENV: &str = "POSTMARK_TIMEOUT_SECS";

/// Settings used to build a [`crate::PostmarkClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL messages are POSTed to
    pub endpoint: String,
    /// Request timeout; the HTTP client default applies when unset
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: POSTMARK_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Default configuration with `POSTMARK_API_URL` and
    /// `POSTMARK_TIMEOUT_SECS` applied when set
    pub fn from_env() -> Result<Self, PostmarkError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PostmarkError> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }

        if let Some(secs) = lookup(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                PostmarkError::Configuration(format!(
                    "{} must be a whole number of seconds",
                    TIMEOUT_ENV
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Parses the endpoint, rejecting anything that is not an absolute
    /// http(s) URL
    pub fn endpoint_url(&self) -> Result<url::Url, PostmarkError> {
        let url = url::Url::parse(&self.endpoint).map_err(|e| {
            PostmarkError::Configuration(format!("Invalid endpoint {}: {}", self.endpoint, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(PostmarkError::Configuration(format!(
                "Unsupported endpoint scheme: {}",
                scheme
            ))),
        }
    }
}

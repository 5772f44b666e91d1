//! Client configuration
//!
//! Endpoint, credentials and timing for a [`DemonClient`](crate::DemonClient).
//! Passed in explicitly; the client reads no environment of its own.

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Endpoint used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the platform (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token; `None` means anonymous requests
    pub token: Option<String>,

    /// Fixed sleep between two status queries while waiting on a run
    pub poll_interval: Duration,

    /// Timeout applied to each individual HTTP request
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with default timings and no token
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            poll_interval: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the bearer token. An empty token keeps anonymous mode.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ClientError::InvalidRequest(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::InvalidRequest(format!(
                "base_url must start with http:// or https://, got {}",
                self.base_url
            )));
        }

        if self.poll_interval.is_zero() {
            return Err(ClientError::InvalidRequest(
                "poll_interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

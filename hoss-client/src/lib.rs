//! Hoss HTTP Client
//!
//! A small, typed client for running rituals on the Demon platform API.
//!
//! A run goes through three calls: submit the ritual, poll its status until it
//! reaches a terminal state, then fetch its result envelope.
//! [`DemonClient::wait_for_ritual`] wraps the latter two.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use hoss_client::{ClientConfig, DemonClient};
//! use hoss_core::dto::ritual::RitualInput;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = DemonClient::new(ClientConfig::new("http://localhost:8080"))?;
//!
//!     let run_id = client.start_ritual("hoss-validate", RitualInput::new()).await?;
//!     let envelope = client.wait_for_ritual(&run_id, Duration::from_secs(300)).await?;
//!
//!     println!("Run {} finished: {:?}", run_id, envelope.status());
//!     Ok(())
//! }
//! ```

mod api;
pub mod config;
pub mod error;
mod rituals;
mod runs;
pub mod tracker;

// Re-export commonly used types
pub use api::RitualApi;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use hoss_core::domain::envelope::{Envelope, EnvelopeStatus};
pub use hoss_core::domain::run::{Run, RunStatus};
pub use tracker::RunTracker;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

/// HTTP client for the Demon ritual API
///
/// Holds one connection pool that is reused by every request; cloning the
/// client shares that pool.
#[derive(Debug, Clone)]
pub struct DemonClient {
    /// Configuration with the base URL already normalised
    config: ClientConfig,
    /// HTTP client instance
    client: Client,
}

impl DemonClient {
    /// Create a new client, building an HTTP client with the configured
    /// request timeout
    ///
    /// The configuration is validated first; an invalid one is rejected
    /// before any request can be sent.
    ///
    /// # Example
    /// ```
    /// use hoss_client::{ClientConfig, DemonClient};
    ///
    /// let client = DemonClient::new(ClientConfig::new("http://localhost:8080/")).unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8080");
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a new client around a preconfigured reqwest Client
    ///
    /// This allows you to configure proxies, TLS settings, etc. The
    /// `request_timeout` of `config` is not applied in this case.
    pub fn with_client(mut config: ClientConfig, client: Client) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self { config, client }
    }

    /// Get the base URL of the platform
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a request, attaching the bearer token when one is configured
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code against `accepted` and deserialize the JSON body
    ///
    /// On a rejected status the raw body is captured verbatim in the error.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        accepted: &[StatusCode],
    ) -> Result<T> {
        let status = response.status();

        if !accepted.contains(&status) {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("Failed to parse JSON response: {}", e)))
    }
}

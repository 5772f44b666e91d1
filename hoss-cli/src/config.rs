//! Configuration module
//!
//! Settings resolved from flags and environment, handed to each command.

use hoss_client::ClientConfig;
use hoss_client::config::DEFAULT_BASE_URL;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Demon platform API
    pub demon_url: String,
    /// Bearer token, if any
    pub demon_token: Option<String>,
    /// Print machine-readable output only
    pub json_output: bool,
}

impl Config {
    /// Builds the configuration; an empty URL falls back to the default
    /// endpoint and an empty token means anonymous access
    pub fn new(demon_url: String, demon_token: Option<String>, json_output: bool) -> Self {
        let demon_url = if demon_url.trim().is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            demon_url
        };

        Self {
            demon_url,
            demon_token: demon_token.filter(|t| !t.is_empty()),
            json_output,
        }
    }

    /// Client settings for this invocation
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.demon_url.clone()).with_token(self.demon_token.clone())
    }
}

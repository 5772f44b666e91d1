//! Error types for the Demon client

use std::time::Duration;

use hoss_core::domain::run::RunStatus;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Demon client
///
/// None of these are retried inside the client; retry policy belongs to the
/// caller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The platform could not be reached
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Platform answered with a status code outside the accepted set
    #[error("API error (status {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body, verbatim
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Request rejected before anything was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Run reported a status outside the known set
    #[error("unknown run status: {0}")]
    UnrecognizedStatus(String),

    /// Deadline passed before the run reached a terminal status
    #[error("timeout waiting for ritual to complete (after {0:?})")]
    Timeout(Duration),

    /// Run ended in `failed`/`error` and no envelope could be fetched.
    ///
    /// The message only carries the run status; the envelope fetch error is
    /// kept as the source.
    #[error("ritual failed: {status}")]
    TerminalFailure {
        status: RunStatus,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Create an API error from status code and body
    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Network-level failure reaching the platform
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Non-success status code or an undecodable body
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Parse(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::TerminalFailure { .. })
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}

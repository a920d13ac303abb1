//! Gateway error types

use thiserror::Error;

/// Errors that can occur talking to the Flow service
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The addressed resource does not exist. Carried as its own variant
    /// so callers branch on the kind, never on message text.
    #[error("resource not found")]
    NotFound,

    #[error("service error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    Json(#[from] serde_json::Error),
}

impl GatewayError {
    /// Check if this is the expected "no such resource" signal
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound)
    }

    /// Check if this error came back from the service itself rather than
    /// the transport
    pub fn is_api(&self) -> bool {
        matches!(self, GatewayError::NotFound | GatewayError::Api { .. })
    }
}

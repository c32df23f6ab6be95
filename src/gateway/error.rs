//! Gateway error types
//!
//! These never cross the `RecordGateway` boundary: reads turn them into an
//! empty record set and writes turn them into a failed `SubmitResult`.

use thiserror::Error;

/// Errors that can occur when talking to the sheet endpoint
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("sheet endpoint not configured")]
    NotConfigured,

    #[error("sheet endpoint unavailable")]
    Unavailable,

    #[error("request timeout")]
    Timeout,

    #[error("request failed: {0}")]
    Request(reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("rejected by sheet endpoint: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_connect() {
            GatewayError::Unavailable
        } else {
            GatewayError::Request(e)
        }
    }
}

//! Error types for Ambient channel operations

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for Ambient channel operations
pub type Result<T> = std::result::Result<T, AmbientError>;

/// Errors that can occur while talking to the Ambient service
#[derive(Error, Debug)]
pub enum AmbientError {
    /// Request never produced an HTTP response
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Service answered with a status other than 200 OK.
    ///
    /// Carries only the status line; the response body is not read.
    #[error("server returned {status}")]
    Remote { status: StatusCode },

    /// Response body could not be decoded as the expected JSON shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AmbientError {
    /// Status code of a remote error, if this is one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AmbientError::Remote { status } => Some(*status),
            _ => None,
        }
    }
}

//! Error types for the HTTP client

use thiserror::Error;

/// Errors that can occur while talking to a device over HTTP
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpError {
    /// Connection, DNS, TLS or timeout failure before a response arrived
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The response arrived but its body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_body() || error.is_decode() {
            HttpError::Body(error.to_string())
        } else if error.is_timeout() {
            HttpError::Network(format!("request timed out: {}", error))
        } else {
            HttpError::Network(error.to_string())
        }
    }
}

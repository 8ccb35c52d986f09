use http_client::HttpError;
use thiserror::Error;

/// Errors produced while resolving or talking to a lightbulb device
///
/// Every variant is terminal for the single request that produced it; nothing
/// in this crate retries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Network communication error
    ///
    /// Connection refused, DNS failure, timeout, or a body that could not be
    /// read off the wire.
    #[error("Network error: {0}")]
    Network(String),

    /// The device answered with a non-success HTTP status
    #[error("Protocol error: HTTP {status} from {url}")]
    Protocol { status: u16, url: String },

    /// The response body is not the expected JSON object, or the field named
    /// for the channel is missing or has the wrong type
    #[error("Decode error: {0}")]
    Decode(String),

    /// The device identity cannot be turned into an endpoint
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Network(msg) => ApiError::Network(msg),
            HttpError::Body(msg) => ApiError::Network(msg),
        }
    }
}

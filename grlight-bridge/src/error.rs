use grlight_api::{ApiError, Channel};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Value for {actual} handed to the {expected} handler")]
    ChannelMismatch { expected: Channel, actual: Channel },

    #[error("Operation task failed: {0}")]
    TaskFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),
}

//! # grlight-bridge - accessory characteristics over HTTP
//!
//! Bridges the four lightbulb characteristics (on, brightness, hue,
//! saturation) of a smart-home accessory to a device with a small HTTP API:
//!
//! ```rust,no_run
//! use grlight_bridge::{DeviceIdentity, LightAccessory};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), grlight_bridge::BridgeError> {
//!     let identity = DeviceIdentity::new("Desk", "10.0.0.5").with_port("8080");
//!     let accessory = LightAccessory::new(identity)?;
//!
//!     accessory.power.set(true).await?;                 // GET /on
//!     accessory.brightness.set(75).await?;              // GET /brightness/75
//!     let hue = accessory.hue.get().await?;             // GET /hue -> {"hue": ..}
//!     println!("hue is {}", hue);
//!
//!     // Detached from the caller; the outcome arrives exactly once.
//!     let pending = accessory.saturation.spawn_get();
//!     println!("saturation is {}", pending.await?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Behaviour
//!
//! - Every get or set issues exactly one request; there is no retry, cache,
//!   debounce or coalescing.
//! - Values are passed to the device unchanged. Range checks are the device's.
//! - A read whose body lacks the channel's field fails with a decode error.
//! - Every outcome is logged once through [`DiagnosticLog`]: INFO when the
//!   device is configured with `debug: true`, DEBUG otherwise.
//!
//! ## Architecture
//!
//! ```text
//! host framework (CharacteristicRegistry)
//!     ↓
//! LightAccessory / ChannelHandle (get/set)
//!     ↓
//! grlight-api (Endpoint, LightClient)
//!     ↓
//! http-client (reqwest)
//! ```

// Main exports
pub use accessory::LightAccessory;
pub use completion::Completion;
pub use config::PlatformConfig;
pub use diagnostics::DiagnosticLog;
pub use error::BridgeError;
pub use property::{
    BrightnessHandle, ChannelHandle, HueHandle, PowerHandle, SaturationHandle,
};
pub use registry::{AccessoryInformation, CharacteristicRegistry, GetHandler, SetHandler};

// Re-export commonly used types from grlight-api
pub use grlight_api::{
    ApiError, Channel, ChannelValue, ClientConfig, DeviceIdentity, Endpoint, LightClient,
};

pub mod config;
pub mod logging;
pub mod property;
pub mod registry;

mod accessory;
mod completion;
mod diagnostics;
mod error;

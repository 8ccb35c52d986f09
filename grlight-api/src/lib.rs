//! Protocol layer for HTTP-controlled RGB lightbulbs
//!
//! This crate knows how to address a device and how to talk to it. It uses
//! the private `http-client` crate for the transport.
//!
//! The device protocol is a handful of GET endpoints:
//!
//! | Operation        | Path                   | Read field   |
//! |------------------|------------------------|--------------|
//! | Power on / off   | `/on`, `/off`          |              |
//! | Power read       | `/state`               | `state`      |
//! | Brightness       | `/brightness[/value]`  | `brightness` |
//! | Hue              | `/hue[/value]`         | `hue`        |
//! | Saturation       | `/saturation[/value]`  | `saturation` |
//!
//! Writes are GET requests too. That is how the device firmware works, so it
//! is kept as is.
//!
//! ```rust,no_run
//! use grlight_api::{ChannelValue, DeviceIdentity, Endpoint, LightClient};
//!
//! # async fn run() -> grlight_api::Result<()> {
//! let identity = DeviceIdentity::new("Desk", "10.0.0.5").with_port("8080");
//! let endpoint = Endpoint::new(&identity)?;
//!
//! let client = LightClient::new();
//! client.write(&endpoint, &ChannelValue::Brightness(75)).await?;
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod identity;

pub use channel::{Channel, ChannelProperty, ChannelValue};
pub use client::LightClient;
pub use endpoint::Endpoint;
pub use error::{ApiError, Result};
pub use identity::{DeviceIdentity, Scheme};

pub use http_client::{ClientConfig, HttpClient, HttpError, HttpResponse};

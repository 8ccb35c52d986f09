//! Seam between the bridge and the host accessory framework
//!
//! The host owns characteristic registration and decides what to do with a
//! failed operation. The bridge only hands it one get handler and one set
//! handler per channel, plus the static accessory information.

use std::sync::Arc;

use futures::future::BoxFuture;
use grlight_api::{Channel, ChannelValue};
use serde::Serialize;

use crate::BridgeError;

/// Future returned by a registered handler
pub type HandlerFuture<T> = BoxFuture<'static, Result<T, BridgeError>>;

/// Handler invoked when the controller reads a channel
pub type GetHandler = Arc<dyn Fn() -> HandlerFuture<ChannelValue> + Send + Sync>;

/// Handler invoked when the controller writes a channel
pub type SetHandler = Arc<dyn Fn(ChannelValue) -> HandlerFuture<()> + Send + Sync>;

/// Static information published for every accessory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessoryInformation {
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
}

impl Default for AccessoryInformation {
    fn default() -> Self {
        Self {
            manufacturer: "gwenoleR".to_string(),
            model: "1.0".to_string(),
            serial_number: "Default-Serial".to_string(),
        }
    }
}

/// Property registry of the host framework
///
/// Implemented by the host (or by a test double). Each handler may be called
/// any number of times, concurrently; every call is an independent request.
pub trait CharacteristicRegistry {
    /// Publish the accessory's display name and information
    fn set_information(&mut self, name: &str, info: &AccessoryInformation);

    /// Attach the read handler for `channel`
    fn on_get(&mut self, channel: Channel, handler: GetHandler);

    /// Attach the write handler for `channel`
    fn on_set(&mut self, channel: Channel, handler: SetHandler);
}

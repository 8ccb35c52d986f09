//! Lightbulb accessory with channel accessors
//!
//! Provides the Property Bridge for one physical device: typed handles for
//! the four channels, dynamic read/write for the host framework, and handler
//! registration.

use std::sync::Arc;

use futures::FutureExt;
use grlight_api::{Channel, ChannelValue, DeviceIdentity, Endpoint, LightClient};

use crate::diagnostics::DiagnosticLog;
use crate::property::{
    AccessoryContext, BrightnessHandle, ChannelHandle, HueHandle, PowerHandle, SaturationHandle,
};
use crate::registry::{AccessoryInformation, CharacteristicRegistry};
use crate::BridgeError;

/// One bridged lightbulb
///
/// Each channel handle provides `get()`, `set()`, `spawn_get()` and
/// `spawn_set()`. The accessory is immutable once built; a device whose
/// address changes needs a new accessory.
///
/// # Example
///
/// ```rust,ignore
/// let accessory = LightAccessory::new(DeviceIdentity::new("Desk", "10.0.0.5"))?;
///
/// accessory.power.set(true).await?;
/// let hue = accessory.hue.get().await?;
/// ```
#[derive(Clone)]
pub struct LightAccessory {
    /// Display name of the accessory
    pub name: String,

    /// On/off state
    pub power: PowerHandle,
    /// Brightness level
    pub brightness: BrightnessHandle,
    /// Hue
    pub hue: HueHandle,
    /// Saturation
    pub saturation: SaturationHandle,

    identity: Arc<DeviceIdentity>,
    information: AccessoryInformation,
    context: Arc<AccessoryContext>,
}

impl LightAccessory {
    /// Create an accessory talking to the device over a default client
    pub fn new(identity: DeviceIdentity) -> Result<Self, BridgeError> {
        Self::with_client(identity, LightClient::new())
    }

    /// Create an accessory using `client` for every request
    ///
    /// Fails with a configuration error when the identity has no address or
    /// an unusable port or protocol.
    pub fn with_client(identity: DeviceIdentity, client: LightClient) -> Result<Self, BridgeError> {
        let endpoint = Endpoint::new(&identity)?;
        let log = DiagnosticLog::new(identity.debug);
        let context = AccessoryContext::new(identity.name.clone(), endpoint, client, log);

        tracing::debug!(
            name = %identity.name,
            base_url = context.endpoint().base_url(),
            "accessory configured"
        );

        Ok(Self {
            name: identity.name.clone(),
            power: ChannelHandle::new(Arc::clone(&context)),
            brightness: ChannelHandle::new(Arc::clone(&context)),
            hue: ChannelHandle::new(Arc::clone(&context)),
            saturation: ChannelHandle::new(Arc::clone(&context)),
            identity: Arc::new(identity),
            information: AccessoryInformation::default(),
            context,
        })
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn endpoint(&self) -> &Endpoint {
        self.context.endpoint()
    }

    pub fn information(&self) -> &AccessoryInformation {
        &self.information
    }

    /// Read any channel, returning the value in dynamic form
    pub async fn read(&self, channel: Channel) -> Result<ChannelValue, BridgeError> {
        Ok(match channel {
            Channel::Power => ChannelValue::Power(self.power.get().await?),
            Channel::Brightness => ChannelValue::Brightness(self.brightness.get().await?),
            Channel::Hue => ChannelValue::Hue(self.hue.get().await?),
            Channel::Saturation => ChannelValue::Saturation(self.saturation.get().await?),
        })
    }

    /// Write any channel; the target channel is the one `value` belongs to
    pub async fn write(&self, value: ChannelValue) -> Result<(), BridgeError> {
        match value {
            ChannelValue::Power(on) => self.power.set(on).await,
            ChannelValue::Brightness(level) => self.brightness.set(level).await,
            ChannelValue::Hue(level) => self.hue.set(level).await,
            ChannelValue::Saturation(level) => self.saturation.set(level).await,
        }
    }

    /// Write `value` through the handler registered for `channel`
    ///
    /// A value belonging to another channel is rejected without any request.
    pub async fn write_channel(
        &self,
        channel: Channel,
        value: ChannelValue,
    ) -> Result<(), BridgeError> {
        if value.channel() != channel {
            return Err(BridgeError::ChannelMismatch {
                expected: channel,
                actual: value.channel(),
            });
        }
        self.write(value).await
    }

    /// Attach get and set handlers for every channel to the host registry
    pub fn register<R: CharacteristicRegistry + ?Sized>(&self, registry: &mut R) {
        registry.set_information(&self.name, &self.information);

        for channel in Channel::ALL {
            let accessory = self.clone();
            registry.on_get(
                channel,
                Arc::new(move || {
                    let accessory = accessory.clone();
                    async move { accessory.read(channel).await }.boxed()
                }),
            );

            let accessory = self.clone();
            registry.on_set(
                channel,
                Arc::new(move |value| {
                    let accessory = accessory.clone();
                    async move { accessory.write_channel(channel, value).await }.boxed()
                }),
            );
        }

        tracing::debug!(name = %self.name, "registered characteristic handlers");
    }
}

impl std::fmt::Debug for LightAccessory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightAccessory")
            .field("name", &self.name)
            .field("base_url", &self.endpoint().base_url())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grlight_api::ApiError;

    #[test]
    fn test_missing_address_fails_fast() {
        let result = LightAccessory::new(DeviceIdentity::new("Ghost", ""));
        assert!(matches!(
            result,
            Err(BridgeError::Api(ApiError::Configuration(_)))
        ));
    }

    #[test]
    fn test_accessory_information_defaults() {
        let accessory = LightAccessory::new(DeviceIdentity::new("Desk", "10.0.0.5")).unwrap();
        let info = accessory.information();
        assert_eq!(info.manufacturer, "gwenoleR");
        assert_eq!(info.model, "1.0");
        assert_eq!(info.serial_number, "Default-Serial");
        assert_eq!(accessory.endpoint().base_url(), "http://10.0.0.5:80");
        assert_eq!(accessory.power.accessory_name(), "Desk");
    }

    #[tokio::test]
    async fn test_mismatched_value_is_rejected_without_request() {
        // Nothing listens on port 1; a request would surface as a network error.
        let identity = DeviceIdentity::new("Desk", "127.0.0.1").with_port("1");
        let accessory = LightAccessory::new(identity).unwrap();

        let result = accessory
            .write_channel(Channel::Hue, ChannelValue::Brightness(10))
            .await;

        assert_eq!(
            result,
            Err(BridgeError::ChannelMismatch {
                expected: Channel::Hue,
                actual: Channel::Brightness,
            })
        );
    }
}

//! Platform configuration
//!
//! Mirrors the host platform's config block: a platform name and a list of
//! device identities. Loading validates every device up front so a bad entry
//! is reported at startup rather than on the first request.

use std::path::Path;

use grlight_api::{ClientConfig, DeviceIdentity, Endpoint, LightClient};
use serde::Deserialize;

use crate::{BridgeError, LightAccessory};

/// Platform name used when the config block does not carry one
pub const DEFAULT_PLATFORM: &str = "GRLight";

/// Configuration for a set of bridged lightbulbs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformConfig {
    /// Platform name
    /// Default: "GRLight"
    #[serde(default = "default_platform")]
    pub platform: String,

    /// Devices to bridge, one accessory each
    #[serde(default)]
    pub devices: Vec<DeviceIdentity>,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            devices: Vec::new(),
        }
    }
}

impl PlatformConfig {
    /// Parse and validate a JSON config block
    pub fn from_json_str(json: &str) -> Result<Self, BridgeError> {
        let config: PlatformConfig = serde_json::from_str(json)
            .map_err(|e| BridgeError::Config(format!("invalid platform config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Check that every device resolves to an endpoint and names are unique
    pub fn validate(&self) -> Result<(), BridgeError> {
        for (index, device) in self.devices.iter().enumerate() {
            Endpoint::new(device)
                .map_err(|e| BridgeError::Config(format!("device #{}: {}", index, e)))?;

            if self.devices[..index].iter().any(|d| d.name.eq_ignore_ascii_case(&device.name)) {
                return Err(BridgeError::Config(format!(
                    "device name '{}' is used more than once",
                    device.name
                )));
            }
        }
        Ok(())
    }

    /// Look up a device by name, case-insensitively
    pub fn device(&self, name: &str) -> Option<&DeviceIdentity> {
        self.devices
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Build one accessory per device, all sharing one client
    pub fn accessories(&self, client: &ClientConfig) -> Result<Vec<LightAccessory>, BridgeError> {
        let client = LightClient::with_config(client)?;
        self.devices
            .iter()
            .cloned()
            .map(|identity| LightAccessory::with_client(identity, client.clone()))
            .collect()
    }
}

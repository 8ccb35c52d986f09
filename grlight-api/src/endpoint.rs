//! Request URL construction for one device

use crate::channel::{Channel, ChannelValue};
use crate::identity::{DeviceIdentity, Scheme};
use crate::{ApiError, Result};

/// Port used when the identity does not name one
pub const DEFAULT_PORT: u16 = 80;

/// Resolved address of one device
///
/// The base URL `scheme://address:port` is computed once here and reused for
/// every request. Endpoints are immutable; a device that moves needs a new
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: Scheme,
    host: String,
    port: u16,
    base_url: String,
}

impl Endpoint {
    /// Resolve an identity into an endpoint
    ///
    /// Fails with [`ApiError::Configuration`] when the address is empty, the
    /// port is not a number in `0..=65535`, or the scheme is neither `http`
    /// nor `https`. An absent or empty port or scheme takes its default.
    pub fn new(identity: &DeviceIdentity) -> Result<Self> {
        let host = identity.address.trim();
        if host.is_empty() {
            return Err(ApiError::Configuration(format!(
                "device '{}' has no address",
                identity.name
            )));
        }

        let port = match non_empty(identity.port.as_deref()) {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                ApiError::Configuration(format!(
                    "device '{}' has invalid port '{}'",
                    identity.name, raw
                ))
            })?,
        };

        let scheme = match non_empty(identity.scheme.as_deref()) {
            None => Scheme::default(),
            Some(raw) => raw.parse::<Scheme>()?,
        };

        let base_url = format!("{}://{}:{}", scheme, host, port);

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
            base_url,
        })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `scheme://address:port`, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL queried to read `channel`
    pub fn read_url(&self, channel: Channel) -> String {
        format!("{}/{}", self.base_url, channel.read_path())
    }

    /// URL requested to apply `value`
    ///
    /// Writes are plain GETs with the value as the last path segment; power
    /// uses `/on` and `/off` instead.
    pub fn write_url(&self, value: &ChannelValue) -> String {
        match value {
            ChannelValue::Power(true) => format!("{}/on", self.base_url),
            ChannelValue::Power(false) => format!("{}/off", self.base_url),
            ChannelValue::Brightness(level)
            | ChannelValue::Hue(level)
            | ChannelValue::Saturation(level) => {
                format!("{}/{}/{}", self.base_url, value.channel().read_path(), level)
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

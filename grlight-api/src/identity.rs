//! Device identity as supplied by the host platform configuration

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ApiError;

/// Identity of one physical lightbulb
///
/// Field names follow the host platform's device block, so a block such as
/// `{"name": "Desk", "ip": "10.0.0.5", "port": 8080, "protocol": "https"}`
/// deserializes directly. `port` and `scheme` stay raw here; defaults and
/// validation happen when an [`Endpoint`](crate::Endpoint) is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Display name
    pub name: String,

    /// Host name or IP address of the device
    #[serde(alias = "ip", default)]
    pub address: String,

    /// Port, as text; absent or empty means 80
    #[serde(default, deserialize_with = "port_from_text_or_number")]
    pub port: Option<String>,

    /// `http` or `https`; absent or empty means `http`
    #[serde(rename = "protocol", alias = "scheme", default)]
    pub scheme: Option<String>,

    /// Route per-call diagnostics to the always-visible log level
    #[serde(default)]
    pub debug: bool,
}

impl DeviceIdentity {
    /// Create an identity with default port, scheme and debug flag
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            port: None,
            scheme: None,
            debug: false,
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

fn port_from_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPort {
        Text(String),
        Number(u64),
    }

    Ok(Option::<RawPort>::deserialize(deserializer)?.map(|raw| match raw {
        RawPort::Text(text) => text,
        RawPort::Number(number) => number.to_string(),
    }))
}

/// URL scheme used to reach a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(ApiError::Configuration(format!(
                "unsupported protocol '{}', expected 'http' or 'https'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_platform_device_block() {
        let identity: DeviceIdentity = serde_json::from_str(
            r#"{"name": "Desk", "ip": "10.0.0.5", "port": "8080", "protocol": "https", "debug": true}"#,
        )
        .unwrap();

        assert_eq!(identity.name, "Desk");
        assert_eq!(identity.address, "10.0.0.5");
        assert_eq!(identity.port.as_deref(), Some("8080"));
        assert_eq!(identity.scheme.as_deref(), Some("https"));
        assert!(identity.debug);
    }

    #[test]
    fn test_deserialize_numeric_port_and_defaults() {
        let identity: DeviceIdentity =
            serde_json::from_str(r#"{"name": "Hall", "address": "bulb.local", "port": 81}"#).unwrap();

        assert_eq!(identity.address, "bulb.local");
        assert_eq!(identity.port.as_deref(), Some("81"));
        assert_eq!(identity.scheme, None);
        assert!(!identity.debug);
    }

    #[test]
    fn test_missing_address_deserializes_empty() {
        let identity: DeviceIdentity = serde_json::from_str(r#"{"name": "Nowhere"}"#).unwrap();
        assert!(identity.address.is_empty());
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("http".parse::<Scheme>().unwrap(), Scheme::Http);
        assert_eq!("HTTPS".parse::<Scheme>().unwrap(), Scheme::Https);
        assert!(matches!(
            "ftp".parse::<Scheme>(),
            Err(ApiError::Configuration(_))
        ));
    }
}

//! Controllable channels of a lightbulb and their wire schemas
//!
//! Each channel has a read path returning a JSON object with one field named
//! for the channel, and a write path carrying the new value as the last path
//! segment. Power is the exception on both sides: it is read from `/state`
//! and written through `/on` or `/off`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::ApiError;

/// One controllable property of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Power,
    Brightness,
    Hue,
    Saturation,
}

impl Channel {
    /// Every channel, in registration order
    pub const ALL: [Channel; 4] = [
        Channel::Power,
        Channel::Brightness,
        Channel::Hue,
        Channel::Saturation,
    ];

    /// Short lowercase key, as used on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Channel::Power => "power",
            Channel::Brightness => "brightness",
            Channel::Hue => "hue",
            Channel::Saturation => "saturation",
        }
    }

    /// Characteristic name shown by the host framework
    pub fn characteristic(&self) -> &'static str {
        match self {
            Channel::Power => "On",
            Channel::Brightness => "Brightness",
            Channel::Hue => "Hue",
            Channel::Saturation => "Saturation",
        }
    }

    /// Path segment queried to read the current value
    pub fn read_path(&self) -> &'static str {
        match self {
            Channel::Power => "state",
            Channel::Brightness => "brightness",
            Channel::Hue => "hue",
            Channel::Saturation => "saturation",
        }
    }

    /// JSON field carrying the value in a read response
    pub fn field(&self) -> &'static str {
        // Identical to the read path for every channel today.
        self.read_path()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Channel {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "power" | "on" | "state" => Ok(Channel::Power),
            "brightness" => Ok(Channel::Brightness),
            "hue" => Ok(Channel::Hue),
            "saturation" => Ok(Channel::Saturation),
            other => Err(ApiError::Configuration(format!(
                "unknown channel '{}', expected power, brightness, hue or saturation",
                other
            ))),
        }
    }
}

/// A value for one specific channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelValue {
    Power(bool),
    Brightness(i32),
    Hue(i32),
    Saturation(i32),
}

impl ChannelValue {
    /// Channel this value belongs to
    pub fn channel(&self) -> Channel {
        match self {
            ChannelValue::Power(_) => Channel::Power,
            ChannelValue::Brightness(_) => Channel::Brightness,
            ChannelValue::Hue(_) => Channel::Hue,
            ChannelValue::Saturation(_) => Channel::Saturation,
        }
    }

    /// Parse user-supplied text into a value for `channel`
    ///
    /// Power accepts `on`/`off`, `true`/`false` and `1`/`0`. The other
    /// channels accept any signed integer; range checks are the device's job.
    pub fn parse(channel: Channel, text: &str) -> Result<Self, ApiError> {
        let text = text.trim();
        match channel {
            Channel::Power => match text.to_ascii_lowercase().as_str() {
                "on" | "true" | "1" => Ok(ChannelValue::Power(true)),
                "off" | "false" | "0" => Ok(ChannelValue::Power(false)),
                other => Err(ApiError::Configuration(format!(
                    "invalid power value '{}', expected on or off",
                    other
                ))),
            },
            _ => {
                let level: i32 = text.parse().map_err(|_| {
                    ApiError::Configuration(format!(
                        "invalid {} value '{}', expected an integer",
                        channel, text
                    ))
                })?;
                Ok(match channel {
                    Channel::Brightness => ChannelValue::Brightness(level),
                    Channel::Hue => ChannelValue::Hue(level),
                    _ => ChannelValue::Saturation(level),
                })
            }
        }
    }
}

impl fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelValue::Power(on) => write!(f, "{}", on),
            ChannelValue::Brightness(v) | ChannelValue::Hue(v) | ChannelValue::Saturation(v) => {
                write!(f, "{}", v)
            }
        }
    }
}

/// Compile-time description of a channel
///
/// Ties a channel to its Rust value type and to the schema of its read
/// response. The schema holds the channel's field as an `Option`, so a body
/// that lacks the field decodes and is then rejected by [`decode_read`]
/// rather than defaulted.
pub trait ChannelProperty: Send + Sync + 'static {
    /// Channel described by this type
    const CHANNEL: Channel;

    /// Value type carried by the channel
    type Value: Copy + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Schema of the read response body
    type Response: DeserializeOwned;

    /// Pull the channel's field out of a decoded response
    fn extract(response: Self::Response) -> Option<Self::Value>;

    /// Wrap a typed value into the dynamic form
    fn into_value(value: Self::Value) -> ChannelValue;

    /// Unwrap the dynamic form, if it belongs to this channel
    fn from_value(value: ChannelValue) -> Option<Self::Value>;
}

/// Declare a channel marker type and its read response schema
macro_rules! define_channel {
    (
        $(#[$meta:meta])*
        channel: $marker:ident,
        value: $value:ty,
        response: $response:ident { $field:ident } $(,)?
    ) => {
        #[doc = concat!("Read response for the `", stringify!($field), "` field")]
        #[derive(Debug, Clone, Default, PartialEq, Deserialize)]
        pub struct $response {
            #[serde(default)]
            pub $field: Option<$value>,
        }

        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $marker;

        impl ChannelProperty for $marker {
            const CHANNEL: Channel = Channel::$marker;
            type Value = $value;
            type Response = $response;

            fn extract(response: Self::Response) -> Option<Self::Value> {
                response.$field
            }

            fn into_value(value: Self::Value) -> ChannelValue {
                ChannelValue::$marker(value)
            }

            fn from_value(value: ChannelValue) -> Option<Self::Value> {
                match value {
                    ChannelValue::$marker(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

define_channel! {
    /// On/off state, read from `/state` and written through `/on` or `/off`
    channel: Power,
    value: bool,
    response: StateResponse { state },
}

define_channel! {
    /// Brightness level in the device's own range
    channel: Brightness,
    value: i32,
    response: BrightnessResponse { brightness },
}

define_channel! {
    /// Hue in the device's own range
    channel: Hue,
    value: i32,
    response: HueResponse { hue },
}

define_channel! {
    /// Saturation in the device's own range
    channel: Saturation,
    value: i32,
    response: SaturationResponse { saturation },
}

/// Decode a read response body for channel `P`
///
/// A body that is not a JSON object, a field of the wrong type, and a missing
/// or `null` field are all [`ApiError::Decode`].
pub fn decode_read<P: ChannelProperty>(body: &str) -> Result<P::Value, ApiError> {
    let response: P::Response = serde_json::from_str(body).map_err(|e| {
        ApiError::Decode(format!(
            "invalid /{} response body: {}",
            P::CHANNEL.read_path(),
            e
        ))
    })?;

    P::extract(response).ok_or_else(|| {
        ApiError::Decode(format!(
            "/{} response is missing field '{}'",
            P::CHANNEL.read_path(),
            P::CHANNEL.field()
        ))
    })
}

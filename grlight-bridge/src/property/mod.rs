//! Channel handles for typed property access
//!
//! This module provides the `ChannelHandle<P>` generic type, the shared
//! `AccessoryContext` and type aliases for the four lightbulb channels.

mod handles;

pub use handles::{AccessoryContext, ChannelHandle};

pub use handles::{BrightnessHandle, HueHandle, PowerHandle, SaturationHandle};

//! Generic ChannelHandle for per-channel get/set
//!
//! Provides the same pattern for every channel of an accessory:
//! - `get()` - Read the current value from the device (one request, async)
//! - `set()` - Apply a value on the device (one request, async)
//! - `spawn_get()` / `spawn_set()` - Same, detached from the caller

use std::marker::PhantomData;
use std::sync::Arc;

use grlight_api::channel::{Brightness, Hue, Power, Saturation};
use grlight_api::{ChannelProperty, Endpoint, LightClient};

use crate::completion::Completion;
use crate::diagnostics::DiagnosticLog;
use crate::BridgeError;

/// Shared context for all channel handles on an accessory
///
/// Holds the data every handle needs so the handles can share a single Arc.
/// Nothing in here changes after construction.
#[derive(Debug)]
pub struct AccessoryContext {
    pub(crate) name: String,
    pub(crate) endpoint: Endpoint,
    pub(crate) client: LightClient,
    pub(crate) log: DiagnosticLog,
}

impl AccessoryContext {
    /// Create a new AccessoryContext
    pub fn new(
        name: String,
        endpoint: Endpoint,
        client: LightClient,
        log: DiagnosticLog,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            endpoint,
            client,
            log,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

/// Generic channel handle providing get/set against the device
///
/// Every call is independent: two overlapping `get()` calls issue two
/// requests and each returns the value from its own response, in whatever
/// order the device answers.
///
/// # Example
///
/// ```rust,ignore
/// // Read brightness
/// let level = accessory.brightness.get().await?;
///
/// // Turn the light off without waiting for the device
/// let pending = accessory.power.spawn_set(false);
/// ```
pub struct ChannelHandle<P: ChannelProperty> {
    context: Arc<AccessoryContext>,
    _phantom: PhantomData<P>,
}

impl<P: ChannelProperty> Clone for ChannelHandle<P> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
            _phantom: PhantomData,
        }
    }
}

impl<P: ChannelProperty> ChannelHandle<P> {
    /// Create a new ChannelHandle from a shared AccessoryContext
    pub fn new(context: Arc<AccessoryContext>) -> Self {
        Self {
            context,
            _phantom: PhantomData,
        }
    }

    /// Read the current value from the device
    ///
    /// Issues one request to the channel's read URL. A missing or mistyped
    /// field fails with a decode error; no default value is ever substituted.
    pub async fn get(&self) -> Result<P::Value, BridgeError> {
        let ctx = &self.context;
        let characteristic = P::CHANNEL.characteristic();

        match ctx.client.read::<P>(&ctx.endpoint).await {
            Ok(value) => {
                ctx.log.emit(format_args!(
                    "[{}] Get Characteristic {} -> {}",
                    ctx.name, characteristic, value
                ));
                Ok(value)
            }
            Err(e) => {
                ctx.log.emit(format_args!(
                    "[{}] Get Characteristic {} failed: {}",
                    ctx.name, characteristic, e
                ));
                Err(e.into())
            }
        }
    }

    /// Apply `value` on the device
    ///
    /// The value is passed through unchanged; the device decides whether it
    /// is in range. Nothing is echoed back on success.
    pub async fn set(&self, value: P::Value) -> Result<(), BridgeError> {
        let ctx = &self.context;
        let characteristic = P::CHANNEL.characteristic();

        match ctx.client.write(&ctx.endpoint, &P::into_value(value)).await {
            Ok(()) => {
                ctx.log.emit(format_args!(
                    "[{}] Set Characteristic {} -> {}",
                    ctx.name, characteristic, value
                ));
                Ok(())
            }
            Err(e) => {
                ctx.log.emit(format_args!(
                    "[{}] Set Characteristic {} -> {} failed: {}",
                    ctx.name, characteristic, value, e
                ));
                Err(e.into())
            }
        }
    }

    /// Start a read and return immediately
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_get(&self) -> Completion<P::Value> {
        let handle = self.clone();
        Completion::spawn(async move { handle.get().await })
    }

    /// Start a write and return immediately
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_set(&self, value: P::Value) -> Completion<()> {
        let handle = self.clone();
        Completion::spawn(async move { handle.set(value).await })
    }

    /// Name of the accessory this handle belongs to
    pub fn accessory_name(&self) -> &str {
        &self.context.name
    }
}

// ============================================================================
// Type aliases for the lightbulb channels
// ============================================================================

/// Handle for the on/off state
pub type PowerHandle = ChannelHandle<Power>;

/// Handle for the brightness level
pub type BrightnessHandle = ChannelHandle<Brightness>;

/// Handle for the hue
pub type HueHandle = ChannelHandle<Hue>;

/// Handle for the saturation
pub type SaturationHandle = ChannelHandle<Saturation>;

//! Debug-gated routing for per-call diagnostics
//!
//! Accessories configured with `debug: true` report every get/set outcome at
//! INFO so it shows up with default filters. Otherwise the same lines go to
//! DEBUG. The choice is made once, when the accessory is built.

use std::fmt;
use tracing::Level;

/// Target used for all per-call diagnostics
pub const TARGET: &str = "grlight_bridge::device";

/// Two-level log route selected from the device's debug flag
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticLog {
    level: Level,
    sink: fn(fmt::Arguments<'_>),
}

impl DiagnosticLog {
    pub fn new(debug: bool) -> Self {
        if debug {
            Self {
                level: Level::INFO,
                sink: emit_visible,
            }
        } else {
            Self {
                level: Level::DEBUG,
                sink: emit_suppressed,
            }
        }
    }

    /// Level every line is emitted at
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn emit(&self, args: fmt::Arguments<'_>) {
        (self.sink)(args)
    }
}

fn emit_visible(args: fmt::Arguments<'_>) {
    tracing::info!(target: TARGET, "{}", args);
}

fn emit_suppressed(args: fmt::Arguments<'_>) {
    tracing::debug!(target: TARGET, "{}", args);
}

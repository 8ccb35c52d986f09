use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use grlight_bridge::logging::{self, LoggingMode};
use grlight_bridge::{
    BridgeError, Channel, ChannelValue, ClientConfig, LightAccessory, PlatformConfig,
};

/// GRLight command line tool
///
/// Reads and controls the lightbulbs listed in a platform config file. Every
/// command issues one request per channel touched; nothing is cached.
#[derive(Parser, Debug)]
#[command(name = "grlight")]
#[command(about = "Read and control HTTP lightbulbs from a platform config")]
#[command(version)]
pub struct Args {
    /// Path to the platform config JSON
    #[arg(short, long, default_value = "grlight.json")]
    pub config: PathBuf,

    /// Device to talk to; may be omitted when the config lists exactly one
    #[arg(short, long)]
    pub device: Option<String>,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Verbose diagnostics with source locations
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// No log output at all
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List configured devices
    List,
    /// Read one channel (power, brightness, hue, saturation)
    Get { channel: Channel },
    /// Write one channel, e.g. `set power on` or `set hue 240`
    Set { channel: Channel, value: String },
    /// Read all four channels
    Status,
}

impl Args {
    /// Override arguments from environment variables
    ///
    /// - `GRLIGHT_CONFIG`: config path
    /// - `GRLIGHT_DEVICE`: device name
    pub fn apply_env(mut self) -> Self {
        if let Ok(path) = std::env::var("GRLIGHT_CONFIG") {
            self.config = PathBuf::from(path);
        }
        if self.device.is_none() {
            if let Ok(device) = std::env::var("GRLIGHT_DEVICE") {
                self.device = Some(device);
            }
        }
        self
    }

    /// Validate command line arguments
    pub fn validate(&self) -> Result<()> {
        if self.timeout == Some(0) {
            return Err(anyhow::anyhow!("Timeout must be positive"));
        }
        Ok(())
    }

    /// Logging mode from the flags, then `from_env`, then Development
    pub fn logging_mode(&self, from_env: Option<LoggingMode>) -> LoggingMode {
        if self.quiet {
            LoggingMode::Silent
        } else if self.verbose {
            LoggingMode::Debug
        } else {
            from_env.unwrap_or(LoggingMode::Development)
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        match self.timeout {
            Some(secs) => ClientConfig::new().with_timeout(Duration::from_secs(secs)),
            None => ClientConfig::new(),
        }
    }
}

/// Pick the accessory named `wanted`, or the only one when no name is given
fn select_accessory(
    accessories: Vec<LightAccessory>,
    wanted: Option<&str>,
) -> std::result::Result<LightAccessory, BridgeError> {
    match wanted {
        Some(name) => {
            let available = device_names(&accessories);
            accessories
                .into_iter()
                .find(|a| a.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    BridgeError::DeviceNotFound(format!("'{}' (available: {})", name, available))
                })
        }
        None if accessories.len() > 1 => Err(BridgeError::DeviceNotFound(format!(
            "several devices configured, pick one with --device ({})",
            device_names(&accessories)
        ))),
        None => accessories.into_iter().next().ok_or_else(|| {
            BridgeError::DeviceNotFound("the config lists no devices".to_string())
        }),
    }
}

fn device_names(accessories: &[LightAccessory]) -> String {
    accessories
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

async fn run(args: Args) -> Result<()> {
    let config = PlatformConfig::from_path(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    info!(
        "Loaded platform '{}' with {} device(s)",
        config.platform,
        config.devices.len()
    );

    let accessories = config
        .accessories(&args.client_config())
        .context("Failed to build accessories")?;
    let wanted = args.device.as_deref();

    match args.command {
        Command::List => {
            for accessory in &accessories {
                println!(
                    "{:<20} {}{}",
                    accessory.name,
                    accessory.endpoint().base_url(),
                    if accessory.identity().debug { "  (debug)" } else { "" }
                );
            }
        }
        Command::Get { channel } => {
            let accessory = select_accessory(accessories, wanted)?;
            let value = accessory
                .read(channel)
                .await
                .with_context(|| format!("Failed to read {} from '{}'", channel, accessory.name))?;
            println!("{}", value);
        }
        Command::Set { channel, ref value } => {
            let accessory = select_accessory(accessories, wanted)?;
            let value = ChannelValue::parse(channel, value)?;
            accessory
                .write(value)
                .await
                .with_context(|| format!("Failed to set {} on '{}'", channel, accessory.name))?;
            println!("{} set to {}", channel, value);
        }
        Command::Status => {
            let accessory = select_accessory(accessories, wanted)?;
            let (power, brightness, hue, saturation) = tokio::join!(
                accessory.power.get(),
                accessory.brightness.get(),
                accessory.hue.get(),
                accessory.saturation.get(),
            );
            let status = serde_json::json!({
                "name": accessory.name,
                "state": power?,
                "brightness": brightness?,
                "hue": hue?,
                "saturation": saturation?,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse().apply_env();
    args.validate()?;

    let env_mode = logging::mode_from_env().context("Invalid GRLIGHT_LOG_MODE")?;
    logging::init_logging(args.logging_mode(env_mode)).context("Failed to initialize logging")?;

    run(args).await
}

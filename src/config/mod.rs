//! Configuration for the helm reporter
//!
//! Settings come from a TOML config file with `[serial]` and `[network]`
//! sections, with individual values overridable from the command line. A
//! missing config file falls back to the built-in defaults with a warning;
//! a config file that fails to parse is fatal at startup.
//!
//! # Example config
//!
//! ```toml
//! [serial]
//! port = "/dev/ttyACM0"
//! baud_rate = 38400
//! timeout_secs = 10
//!
//! [network]
//! report_uri = "http://localhost:8080"
//! ```

use crate::error::{ReporterError, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default serial device path
pub const DEFAULT_PORT: &str = "/dev/ttyACM0";

/// Default baud rate; higher rates have proven unreliable on the bridge
pub const DEFAULT_BAUD_RATE: u32 = 38_400;

/// Default serial read timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default reporting endpoint
pub const DEFAULT_REPORT_URI: &str = "http://localhost:8080";

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "helm-reporter", about = "Reads framed JSON telemetry from the helm sensor bridge and reports it")]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(default_value = "config.toml")]
    pub config: PathBuf,

    /// URI to send JSON reports from the sensors to
    #[arg(short = 'u', long, value_name = "URI")]
    pub report_uri: Option<String>,

    /// Serial port to communicate with the bridge on
    #[arg(short = 'p', long, value_name = "DEVICE")]
    pub port: Option<String>,

    /// Baud rate for the serial link
    #[arg(short = 'b', long, value_name = "RATE")]
    pub baud: Option<u32>,

    /// Seconds to wait for a line from the serial port
    #[arg(short = 't', long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Replay a captured line file instead of reading the serial port
    #[arg(short = 'f', long, value_name = "FILE")]
    pub replay: Option<PathBuf>,
}

/// Serial link settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SerialConfig {
    /// Serial device path
    pub port: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Read timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Reporting endpoint settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    /// URI the reporting sink posts DATA messages to
    pub report_uri: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            report_uri: DEFAULT_REPORT_URI.to_string(),
        }
    }
}

/// Complete reporter configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Serial link settings
    pub serial: SerialConfig,
    /// Reporting endpoint settings
    pub network: NetworkConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults with a warning; a file that does
    /// not parse is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(file = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|err| ReporterError::Config(format!("failed to read {}: {err}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|err| ReporterError::Config(format!("failed to parse {}: {err}", path.display())))
    }

    /// Apply command line overrides on top of the file values
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(uri) = &cli.report_uri {
            self.network.report_uri = uri.clone();
        }
        if let Some(port) = &cli.port {
            self.serial.port = port.clone();
        }
        if let Some(baud) = cli.baud {
            self.serial.baud_rate = baud;
        }
        if let Some(timeout) = cli.timeout {
            self.serial.timeout_secs = timeout;
        }
        self
    }
}

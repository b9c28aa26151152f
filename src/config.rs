/*!
 * Configuration types for Prism
 */

use crate::error::{PrismError, Result};
use prism_connect::{ChannelOptions, ServiceEndpoint};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrismConfig {
    /// Where each service listens
    #[serde(default)]
    pub services: ServicesConfig,

    /// Transport settings shared by every client
    #[serde(default)]
    pub channel: ChannelConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// One `[services.<name>]` table per service
///
/// A missing table, or a missing key inside one, takes that service's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ServiceTables")]
pub struct ServicesConfig {
    pub harmony: ServiceConfig,
    pub renderer: ServiceConfig,
    pub coordinator: ServiceConfig,
    pub detection: ServiceConfig,
    pub tracking: ServiceConfig,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            harmony: ServiceConfig::at_port(HARMONY_PORT),
            renderer: ServiceConfig::at_port(RENDERER_PORT),
            coordinator: ServiceConfig::at_port(COORDINATOR_PORT),
            detection: ServiceConfig::at_port(DETECTION_PORT),
            tracking: ServiceConfig::at_port(TRACKING_PORT),
        }
    }
}

/// Address of a single service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceConfig {
    pub host: String,

    pub port: u16,

    /// Task used when the command line does not name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
}

/// `[services]` as written in the file, before defaults are applied
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServiceTables {
    harmony: ServiceTable,
    renderer: ServiceTable,
    coordinator: ServiceTable,
    detection: ServiceTable,
    tracking: ServiceTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServiceTable {
    host: Option<String>,
    port: Option<u16>,
    task_id: Option<i64>,
}

impl ServiceTable {
    fn or_port(self, port: u16) -> ServiceConfig {
        ServiceConfig {
            host: self.host.unwrap_or_else(default_host),
            port: self.port.unwrap_or(port),
            task_id: self.task_id,
        }
    }
}

impl From<ServiceTables> for ServicesConfig {
    fn from(tables: ServiceTables) -> Self {
        Self {
            harmony: tables.harmony.or_port(HARMONY_PORT),
            renderer: tables.renderer.or_port(RENDERER_PORT),
            coordinator: tables.coordinator.or_port(COORDINATOR_PORT),
            detection: tables.detection.or_port(DETECTION_PORT),
            tracking: tables.tracking.or_port(TRACKING_PORT),
        }
    }
}

impl ServiceConfig {
    fn at_port(port: u16) -> Self {
        Self {
            host: default_host(),
            port,
            task_id: None,
        }
    }

    pub fn endpoint(&self) -> ServiceEndpoint {
        ServiceEndpoint::new(self.host.clone(), self.port)
    }
}

/// Channel settings; timeouts are in seconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Largest response accepted, in bytes. Image clients default to 1 GiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_decoding_message_size: Option<usize>,
}

impl ChannelConfig {
    pub fn options(&self) -> ChannelOptions {
        let mut options = ChannelOptions::default();
        if let Some(secs) = self.connect_timeout_secs {
            options = options.with_connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.request_timeout_secs {
            options = options.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(limit) = self.max_decoding_message_size {
            options = options.with_max_decoding_message_size(limit);
        }
        options
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,

    /// Write JSON logs to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Shorthand for `level = "debug"`
    #[serde(default)]
    pub verbose: bool,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    Warn,

    /// Info, warnings, and errors
    #[default]
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

const HARMONY_PORT: u16 = 50051;
const RENDERER_PORT: u16 = 50052;
const DETECTION_PORT: u16 = 50053;
const TRACKING_PORT: u16 = 50054;
const COORDINATOR_PORT: u16 = 50060;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl PrismConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PrismError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents)
            .map_err(|e| PrismError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| PrismError::Config(format!("Failed to encode configuration: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

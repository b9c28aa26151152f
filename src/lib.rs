/*!
 * Prism - command line client for the vision service grid
 *
 * Drives the image harmony, image renderer, service coordinator, target
 * detection and target tracking services through `prism-connect`:
 * - TOML configuration of service endpoints and channel settings
 * - Structured logging via `tracing`
 * - Text or JSON output of every result
 */

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{LogLevel, PrismConfig};
pub use error::{PrismError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

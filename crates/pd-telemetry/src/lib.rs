//! # PlusD Telemetry
//!
//! Structured logging for the PlusD components.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pd_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> Result<(), pd_telemetry::TelemetryError> {
//!     init_logging(&TelemetryConfig::from_env())?;
//!     // Application code; consignment and registry logs are now emitted.
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PD_SERVICE_NAME` | `plusd` | Service name attached to every event |
//! | `PD_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `PD_JSON_LOGS` | `false` | JSON lines instead of pretty output |
//! | `PD_CONSOLE_OUTPUT` | `true` | Write events to stdout at all |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log level did not parse as a filter directive.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber was already installed.
    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}

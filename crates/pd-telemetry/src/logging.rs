//! Structured logging.
//!
//! Every event carries a `component` field (`registration` or
//! `consignments`) and, for consignment events, the instance address, so
//! that one shipment's history can be filtered out of the stream.

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber described by `config`.
///
/// `RUST_LOG` directives take precedence over `config.log_level`.
///
/// # Errors
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Filter(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if !config.console_output {
        registry
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    } else if config.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Logging initialized"
    );

    Ok(())
}

/// Log a consignment-related event with standard fields.
#[macro_export]
macro_rules! log_consignment_event {
    ($level:ident, $msg:expr, $consignment:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = "consignments",
            consignment = %$consignment,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a registry-related event with standard fields.
#[macro_export]
macro_rules! log_registry_event {
    ($level:ident, $msg:expr, $role:expr, $address:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = "registration",
            role = %$role,
            address = %$address,
            $($($field)*,)?
            $msg
        )
    };
}

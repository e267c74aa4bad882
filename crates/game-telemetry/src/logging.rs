//! Structured logging.
//!
//! Logs carry consistent fields so they can be filtered downstream:
//! - `timestamp`, `level`, `target`
//! - `service`: service name from the configuration
//! - `block_id`, `position`, `turn` where relevant

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging handle returned by `init_logging`.
#[derive(Debug)]
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

/// Build the level filter: `RUST_LOG` directives win over the configured level.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Install the global tracing subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<StructuredLogger, TelemetryError> {
    let filter = env_filter(config)?;

    let result = if !config.console_output {
        tracing_subscriber::registry().with(filter).try_init()
    } else if config.json_logs {
        // JSON output for log shipping
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .try_init()
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
    };
    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Structured logging initialized"
    );

    Ok(StructuredLogger {
        service_name: config.service_name.clone(),
    })
}

/// Log a block-related event with standard fields.
///
/// ```rust,ignore
/// log_block_event!(info, "Block placed", block.id(), block.position(), block_type = %block.block_type());
/// ```
#[macro_export]
macro_rules! log_block_event {
    ($level:ident, $msg:expr, $block_id:expr, $position:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = "grid",
            block_id = %$block_id,
            position = %$position,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a turn-related event with standard fields.
#[macro_export]
macro_rules! log_turn_event {
    ($level:ident, $msg:expr, $turn:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = "turns",
            turn = $turn,
            $($($field)*,)?
            $msg
        )
    };
}

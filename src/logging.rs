//! Logging initialization
//!
//! Library code only emits `tracing` events. The binary installs a
//! subscriber once, writing to stderr so stdout stays clean for argument
//! vectors and JSON output.

use crate::types::RoboError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` if set, otherwise `robokit=<level>`.
pub fn build_filter(level: &str) -> Result<EnvFilter, RoboError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("robokit={}", level)))
        .map_err(|e| RoboError::Config(format!("Failed to create log filter: {}", e)))
}

/// Install the global subscriber. Call once, from `main`.
pub fn init_logging(level: &str) -> Result<(), RoboError> {
    let filter = build_filter(level)?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| RoboError::Config(format!("Failed to initialize logging: {}", e)))
}

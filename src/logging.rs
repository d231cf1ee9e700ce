//! Diagnostic logging.
//!
//! The report owns stdout; diagnostics go to stderr through a `tracing`
//! subscriber filtered at the configured level.

use crate::config::LoggingConfig;
use crate::error::{BenchError, BenchResult};

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`BenchError::Logging`] if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> BenchResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(config.level.as_tracing())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| BenchError::Logging(e.to_string()))
}

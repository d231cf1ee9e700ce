//! Top-level error type.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that stop the harness.
///
/// Failures of individual cases are not here: they are recorded in the case
/// results and the sweep continues.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Invalid or unreadable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),

    /// The log subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// Result type for harness operations.
pub type BenchResult<T> = Result<T, BenchError>;

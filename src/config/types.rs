//! Configuration type definitions.

use crate::perf::{ReportFormat, Resolution};
use serde::{Deserialize, Serialize};

/// Default universe: keys `0..=100_000_000`.
pub const DEFAULT_UNIVERSE_SIZE: u64 = 100_000_000;

/// Upper bound on `sweep.repetitions`.
pub const MAX_REPETITIONS: u32 = 1_000;

/// Root configuration structure.
///
/// Every section has defaults, so an empty document reproduces the
/// standard sweep.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    /// Sweep parameters.
    pub sweep: SweepSection,

    /// Report presentation.
    pub report: ReportSection,

    /// Diagnostic logging.
    pub logging: LoggingConfig,
}

/// Sweep section configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SweepSection {
    /// Inclusive upper bound of the key domain.
    pub universe_size: u64,

    /// First density of the geometric progression.
    pub density_start: u32,

    /// Multiplier between consecutive densities.
    pub density_factor: u32,

    /// Largest density swept (inclusive).
    pub density_limit: u32,

    /// Number of fresh runs of every case, `1..=MAX_REPETITIONS`.
    pub repetitions: u32,

    /// Candidates to run, by registered name. `None` runs the defaults.
    pub candidates: Option<Vec<String>>,
}

impl Default for SweepSection {
    fn default() -> Self {
        Self {
            universe_size: DEFAULT_UNIVERSE_SIZE,
            density_start: 10,
            density_factor: 10,
            density_limit: 100_000,
            repetitions: 1,
            candidates: None,
        }
    }
}

impl SweepSection {
    /// Universe size as a key, if it fits.
    #[must_use]
    pub fn universe(&self) -> Option<u32> {
        u32::try_from(self.universe_size).ok()
    }
}

/// Report section configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReportSection {
    /// Output format.
    pub format: ReportFormat,

    /// Unit used for every reported duration.
    pub resolution: Resolution,
}

/// Logging configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: LogLevel,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose).
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level (default).
    #[default]
    Warn,
    /// Error level (least verbose).
    Error,
}

impl LogLevel {
    /// The matching `tracing` level.
    #[must_use]
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

//! # Configuration System
//!
//! TOML-based configuration for the benchmark harness. The binary takes no
//! arguments; when [`CONFIG_ENV_VAR`] names a file it is parsed and
//! validated, otherwise the defaults reproduce the standard sweep
//! (universe `0..=100_000_000`, densities `10, 100, ..., 100_000`).
//!
//! ## Example Configuration
//!
//! ```toml
//! [sweep]
//! universe_size = 100000000
//! density_start = 10
//! density_factor = 10
//! density_limit = 100000
//! repetitions = 1
//! candidates = ["roaring", "croaring", "ozbc"]
//!
//! [report]
//! format = "text"
//! resolution = "nanos"
//!
//! [logging]
//! level = "warn"
//! ```

mod error;
mod loader;
mod types;
mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, LoadedConfig, CONFIG_ENV_VAR};
pub use types::{
    HarnessConfig, LogLevel, LoggingConfig, ReportSection, SweepSection, DEFAULT_UNIVERSE_SIZE,
    MAX_REPETITIONS,
};
pub use validation::{
    BasicValidator, CandidateValidator, ValidationError, ValidationResult, ValidationSeverity,
    Validator,
};

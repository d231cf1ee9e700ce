//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
///
/// Every variant is fatal to the whole sweep: it is raised before any
/// benchmark case executes.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read configuration file '{path}': {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration validation failed.
    #[error("configuration validation failed: {0}")]
    ValidationError(String),

    /// A density parameter below 1.
    #[error("invalid density {0}: must be at least 1")]
    InvalidDensity(u32),

    /// A density progression that cannot be swept.
    #[error("invalid density progression: {0}")]
    InvalidProgression(String),

    /// Universe larger than the key type can represent.
    #[error("universe size {0} exceeds the maximum key {max}", max = u32::MAX)]
    UniverseTooLarge(u64),

    /// A candidate name that is not registered.
    #[error("unknown candidate '{name}' (registered: {registered})")]
    UnknownCandidate {
        /// The requested name.
        name: String,
        /// Comma-separated registered names.
        registered: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

//! Configuration file loader.

use super::error::{ConfigError, ConfigResult};
use super::types::HarnessConfig;
use super::validation::{ValidationError, ValidationResult, Validator};
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable naming an optional TOML configuration file.
pub const CONFIG_ENV_VAR: &str = "BITMAP_BENCH_CONFIG";

/// A validated configuration and the warnings raised while validating it.
///
/// Loading happens before the log subscriber exists, so warnings are kept
/// here until [`log_warnings`](Self::log_warnings) is called.
#[derive(Debug)]
pub struct LoadedConfig {
    /// The configuration.
    pub config: HarnessConfig,
    /// Validator warnings, in validator order.
    pub warnings: Vec<ValidationError>,
}

impl LoadedConfig {
    /// Emit every warning through `tracing`.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!(field = %warning.field, "{}", warning.message);
        }
    }

    /// Discard the warnings.
    #[must_use]
    pub fn into_config(self) -> HarnessConfig {
        self.config
    }
}

/// Configuration loader with validation support.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Validators to run on loaded configuration.
    validators: Vec<Box<dyn Validator>>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator to the loader.
    #[must_use]
    pub fn with_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Load configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(&self, path: P) -> ConfigResult<LoadedConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        debug!(path = %path.display(), "loading configuration");
        self.load_str(&content)
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML is malformed
    /// - Validation fails
    pub fn load_str(&self, content: &str) -> ConfigResult<LoadedConfig> {
        let config: HarnessConfig = toml::from_str(content)?;
        self.validate(config)
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], or the validated defaults
    /// when the variable is unset or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the named file is missing, unreadable, malformed
    /// or invalid.
    pub fn load_from_env(&self) -> ConfigResult<LoadedConfig> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => self.load(path),
            _ => self.load_default(),
        }
    }

    /// Validate and return the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a registered validator rejects the defaults.
    pub fn load_default(&self) -> ConfigResult<LoadedConfig> {
        self.validate(HarnessConfig::default())
    }

    /// Run every registered validator; errors from all of them are reported
    /// together.
    fn validate(&self, config: HarnessConfig) -> ConfigResult<LoadedConfig> {
        let mut result = ValidationResult::new();
        for validator in &self.validators {
            result.merge(validator.validate(&config));
        }

        if !result.is_valid() {
            let errors: Vec<String> = result
                .errors_only()
                .iter()
                .map(|e| e.to_string())
                .collect();
            return Err(ConfigError::ValidationError(errors.join("; ")));
        }

        let warnings = result.warnings().into_iter().cloned().collect();
        Ok(LoadedConfig { config, warnings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::{BasicValidator, CandidateValidator};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    fn loader() -> ConfigLoader {
        ConfigLoader::new()
            .with_validator(BasicValidator::new())
            .with_validator(CandidateValidator::new(["roaring", "croaring", "btree"]))
    }

    #[test]
    fn test_load_from_string() {
        let config = loader()
            .load_str(
                r#"
            [sweep]
            universe_size = 1000
            density_limit = 1000
        "#,
            )
            .unwrap()
            .into_config();
        assert_eq!(config.sweep.universe_size, 1000);
        assert_eq!(config.sweep.density_start, 10);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("bench.toml");

        std::fs::write(
            &config_path,
            r#"
            [sweep]
            density_limit = 1000
            candidates = ["croaring"]
        "#,
        )
        .unwrap();

        let loaded = loader().load(&config_path).unwrap();
        assert!(loaded.warnings.is_empty());
        let config = loaded.into_config();
        assert_eq!(config.sweep.density_limit, 1000);
        assert_eq!(config.sweep.candidates, Some(vec!["croaring".to_string()]));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = loader().load("/nonexistent/path/bench.toml");
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_default() {
        let loaded = loader().load_default().unwrap();
        assert_eq!(loaded.config, HarnessConfig::default());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_errors_from_all_validators_are_reported() {
        let result = loader().load_str("[sweep]\ndensity_factor = 1\ncandidates = [\"ewah\"]\n");
        match result {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("sweep.density_factor"), "{msg}");
                assert!(msg.contains("ewah"), "{msg}");
            },
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_warnings_are_kept_for_later_logging() {
        let loaded = loader()
            .load_str(
                r#"
            [sweep]
            universe_size = 1000
            candidates = ["roaring", "roaring"]
        "#,
            )
            .unwrap();

        let fields: Vec<&str> = loaded.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, vec!["sweep.candidates", "sweep.density_limit"]);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_warnings_reaches_subscriber() {
        let loaded = loader()
            .load_str("[sweep]\ncandidates = [\"croaring\", \"croaring\"]\n")
            .unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, || loaded.log_warnings());

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("Duplicate candidate name: croaring"), "{output}");
        assert!(output.contains("sweep.candidates"), "{output}");
    }

    #[test]
    fn test_malformed_toml() {
        let result = loader().load_str("[sweep\nuniverse_size = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_zero_density_fails_validation() {
        let result = loader().load_str("[sweep]\ndensity_start = 0\n");
        match result {
            Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("invalid density")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_candidate_fails_validation() {
        let result = loader().load_str("[sweep]\ncandidates = [\"ewah\"]\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_negative_density_is_a_parse_error() {
        let result = loader().load_str("[sweep]\ndensity_start = -10\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}

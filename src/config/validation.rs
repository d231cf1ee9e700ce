//! Configuration validation system.

use super::types::{HarnessConfig, MAX_REPETITIONS};
use std::collections::HashSet;

/// A single validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// Error message.
    pub message: String,
    /// Severity level.
    pub severity: ValidationSeverity,
}

impl ValidationError {
    /// Create a new error.
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Error,
        }
    }

    /// Create a new warning.
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Severity of validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Error - configuration is invalid.
    Error,
    /// Warning - configuration may have issues.
    Warning,
}

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty (valid) result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if the validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self
            .errors
            .iter()
            .any(|e| e.severity == ValidationSeverity::Error)
    }

    /// Get all validation issues.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get only errors (not warnings).
    #[must_use]
    pub fn errors_only(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Error)
            .collect()
    }

    /// Get only warnings.
    #[must_use]
    pub fn warnings(&self) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.severity == ValidationSeverity::Warning)
            .collect()
    }

    /// Merge another validation result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }
}

/// Trait for configuration validators.
pub trait Validator: std::fmt::Debug + Send + Sync {
    /// Validate a configuration and return any errors.
    fn validate(&self, config: &HarnessConfig) -> ValidationResult;
}

/// Built-in validator for the sweep parameters.
#[derive(Debug, Default)]
pub struct BasicValidator;

impl BasicValidator {
    /// Create a new basic validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Validator for BasicValidator {
    fn validate(&self, config: &HarnessConfig) -> ValidationResult {
        let mut result = ValidationResult::new();
        let sweep = &config.sweep;

        if sweep.universe().is_none() {
            result.add_error(ValidationError::error(
                "sweep.universe_size",
                format!(
                    "universe size {} exceeds the maximum key {}",
                    sweep.universe_size,
                    u32::MAX
                ),
            ));
        }

        if sweep.density_start == 0 {
            result.add_error(ValidationError::error(
                "sweep.density_start",
                "invalid density 0: must be at least 1",
            ));
        }

        if sweep.density_factor < 2 {
            result.add_error(ValidationError::error(
                "sweep.density_factor",
                "Density factor must be at least 2",
            ));
        }

        if sweep.density_start > sweep.density_limit {
            result.add_error(ValidationError::error(
                "sweep.density_limit",
                format!(
                    "Density limit {} is below the start {}",
                    sweep.density_limit, sweep.density_start
                ),
            ));
        }

        if sweep.repetitions == 0 {
            result.add_error(ValidationError::error(
                "sweep.repetitions",
                "Repetitions must be at least 1",
            ));
        } else if sweep.repetitions > MAX_REPETITIONS {
            result.add_error(ValidationError::error(
                "sweep.repetitions",
                format!(
                    "Repetitions {} exceed the maximum {MAX_REPETITIONS}",
                    sweep.repetitions
                ),
            ));
        }

        if let Some(ref candidates) = sweep.candidates {
            if candidates.is_empty() {
                result.add_error(ValidationError::error(
                    "sweep.candidates",
                    "Candidate list cannot be empty",
                ));
            }

            let mut seen = HashSet::new();
            for name in candidates {
                if !seen.insert(name) {
                    result.add_error(ValidationError::warning(
                        "sweep.candidates",
                        format!("Duplicate candidate name: {name}"),
                    ));
                }
            }
        }

        if let Some(universe) = sweep.universe() {
            if sweep.density_limit > universe && sweep.density_start <= universe {
                result.add_error(ValidationError::warning(
                    "sweep.density_limit",
                    "Densities above the universe size insert only key 0",
                ));
            }
        }

        result
    }
}

/// Validator that rejects candidate names missing from the registry.
#[derive(Debug, Default)]
pub struct CandidateValidator {
    registered: Vec<String>,
}

impl CandidateValidator {
    /// Create a validator for the given registered names.
    #[must_use]
    pub fn new<I, S>(registered: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            registered: registered.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validator for CandidateValidator {
    fn validate(&self, config: &HarnessConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        for name in config.sweep.candidates.iter().flatten() {
            if !self.registered.contains(name) {
                result.add_error(ValidationError::error(
                    "sweep.candidates",
                    format!(
                        "Unknown candidate '{name}' (registered: {})",
                        self.registered.join(", ")
                    ),
                ));
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::SweepSection;

    fn with_sweep(sweep: SweepSection) -> HarnessConfig {
        HarnessConfig {
            sweep,
            ..HarnessConfig::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let result = BasicValidator::new().validate(&HarnessConfig::default());
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_zero_density_rejected() {
        let config = with_sweep(SweepSection {
            density_start: 0,
            ..SweepSection::default()
        });
        let result = BasicValidator::new().validate(&config);
        assert!(!result.is_valid());
        assert!(result.errors()[0].message.contains("invalid density"));
    }

    #[test]
    fn test_factor_one_rejected() {
        let config = with_sweep(SweepSection {
            density_factor: 1,
            ..SweepSection::default()
        });
        assert!(!BasicValidator::new().validate(&config).is_valid());
    }

    #[test]
    fn test_start_above_limit_rejected() {
        let config = with_sweep(SweepSection {
            density_start: 1000,
            density_limit: 10,
            ..SweepSection::default()
        });
        assert!(!BasicValidator::new().validate(&config).is_valid());
    }

    #[test]
    fn test_universe_above_key_range_rejected() {
        let config = with_sweep(SweepSection {
            universe_size: 1 << 40,
            ..SweepSection::default()
        });
        let result = BasicValidator::new().validate(&config);
        assert_eq!(result.errors_only()[0].field, "sweep.universe_size");
    }

    #[test]
    fn test_zero_repetitions_rejected() {
        let config = with_sweep(SweepSection {
            repetitions: 0,
            ..SweepSection::default()
        });
        assert!(!BasicValidator::new().validate(&config).is_valid());
    }

    #[test]
    fn test_repetitions_capped() {
        let at_cap = with_sweep(SweepSection {
            repetitions: MAX_REPETITIONS,
            ..SweepSection::default()
        });
        assert!(BasicValidator::new().validate(&at_cap).is_valid());

        let config = with_sweep(SweepSection {
            repetitions: u32::MAX,
            ..SweepSection::default()
        });
        let result = BasicValidator::new().validate(&config);
        assert_eq!(result.errors_only().len(), 1);
        assert_eq!(result.errors_only()[0].field, "sweep.repetitions");
    }

    #[test]
    fn test_duplicate_candidates_warn() {
        let config = with_sweep(SweepSection {
            candidates: Some(vec!["roaring".to_string(), "roaring".to_string()]),
            ..SweepSection::default()
        });
        let result = BasicValidator::new().validate(&config);
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_limit_beyond_universe_warns() {
        let config = with_sweep(SweepSection {
            universe_size: 1000,
            ..SweepSection::default()
        });
        let result = BasicValidator::new().validate(&config);
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_unknown_candidate_rejected() {
        let config = with_sweep(SweepSection {
            candidates: Some(vec!["ewah".to_string()]),
            ..SweepSection::default()
        });
        let result = CandidateValidator::new(["roaring", "croaring"]).validate(&config);
        assert!(!result.is_valid());
        assert!(result.errors()[0].message.contains("roaring, croaring"));
    }

    #[test]
    fn test_validation_result_merge() {
        let mut a = ValidationResult::new();
        a.add_error(ValidationError::warning("x", "warn"));
        let mut b = ValidationResult::new();
        b.add_error(ValidationError::error("y", "bad"));

        a.merge(b);
        assert_eq!(a.errors().len(), 2);
        assert!(!a.is_valid());
        assert_eq!(a.errors()[1].to_string(), "y: bad");
    }
}

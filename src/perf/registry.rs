//! Candidate registry.
//!
//! Registration order is reporting order: within every density group the
//! candidates appear in the order they were registered.

use super::case::{run_case, CaseError};
use super::result::CaseMeasurement;
use super::workload::Workload;
use crate::config::{ConfigError, ConfigResult};
use crate::set::{BTreeIntegerSet, CRoaringSet, IntegerSet, OzbcSet, RoaringSet};

/// Monomorphized case driver for one set type.
pub type CaseRunner = fn(&Workload) -> Result<CaseMeasurement, CaseError>;

/// A registered set implementation.
#[derive(Clone)]
pub struct Candidate {
    name: String,
    runner: CaseRunner,
    enabled_by_default: bool,
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("enabled_by_default", &self.enabled_by_default)
            .finish()
    }
}

impl Candidate {
    /// Register set type `S` under `name`, enabled by default.
    #[must_use]
    pub fn of<S: IntegerSet>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runner: run_case::<S>,
            enabled_by_default: true,
        }
    }

    /// Exclude this candidate unless selected explicitly.
    #[must_use]
    pub fn opt_in(mut self) -> Self {
        self.enabled_by_default = false;
        self
    }

    /// Registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the candidate runs when no selection is configured.
    #[must_use]
    pub fn is_enabled_by_default(&self) -> bool {
        self.enabled_by_default
    }

    /// Run one case against `workload`.
    ///
    /// # Errors
    ///
    /// Returns the case's error if the set fails.
    pub fn run(&self, workload: &Workload) -> Result<CaseMeasurement, CaseError> {
        (self.runner)(workload)
    }
}

/// Ordered collection of candidates.
#[derive(Debug, Clone, Default)]
pub struct CandidateRegistry {
    candidates: Vec<Candidate>,
}

impl CandidateRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in candidates: the two Roaring implementations `roaring` and
    /// `croaring`, the word-aligned run-length `ozbc`, then the opt-in `btree`
    /// baseline.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Candidate::of::<RoaringSet>("roaring"));
        registry.register(Candidate::of::<CRoaringSet>("croaring"));
        registry.register(Candidate::of::<OzbcSet>("ozbc"));
        registry.register(Candidate::of::<BTreeIntegerSet>("btree").opt_in());
        registry
    }

    /// Append a candidate. A candidate with the same name is replaced in place.
    pub fn register(&mut self, candidate: Candidate) {
        match self.candidates.iter_mut().find(|c| c.name == candidate.name) {
            Some(existing) => *existing = candidate,
            None => self.candidates.push(candidate),
        }
    }

    /// Registered names, in order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.name.clone()).collect()
    }

    /// Number of registered candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates to run, in registration order.
    ///
    /// With no selection the default-enabled candidates are returned;
    /// otherwise the selected ones, regardless of the order they are listed in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCandidate`] for a name that is not registered.
    pub fn select(&self, names: Option<&[String]>) -> ConfigResult<Vec<Candidate>> {
        let Some(names) = names else {
            return Ok(self
                .candidates
                .iter()
                .filter(|c| c.enabled_by_default)
                .cloned()
                .collect());
        };

        if let Some(unknown) = names
            .iter()
            .find(|n| !self.candidates.iter().any(|c| &c.name == *n))
        {
            return Err(ConfigError::UnknownCandidate {
                name: unknown.clone(),
                registered: self.names().join(", "),
            });
        }

        Ok(self
            .candidates
            .iter()
            .filter(|c| names.contains(&c.name))
            .cloned()
            .collect())
    }
}

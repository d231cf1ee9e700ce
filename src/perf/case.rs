//! Benchmark case: one candidate, one workload, build then iterate.
//!
//! A case moves through `Unbuilt -> Built -> Measured`. The set handle is
//! created in the build phase and dropped when the case finishes, so no
//! memory carries over to the next case.

use super::result::{Anomaly, CaseMeasurement, PhaseResult};
use super::timer::measure;
use super::workload::Workload;
use crate::set::{IntegerSet, SetError};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Lifecycle state of a [`BenchmarkCase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseState {
    /// No set exists yet.
    Unbuilt,
    /// The set holds the workload and its footprint is known.
    Built,
    /// Iteration has been measured.
    Measured,
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbuilt => write!(f, "unbuilt"),
            Self::Built => write!(f, "built"),
            Self::Measured => write!(f, "measured"),
        }
    }
}

/// The capability call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Creating the empty set.
    Create,
    /// Inserting keys.
    Build,
    /// Post-build hook.
    Finalize,
    /// Footprint query.
    Footprint,
    /// Producing or draining the iterator.
    Iterate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Build => write!(f, "build"),
            Self::Finalize => write!(f, "finalize"),
            Self::Footprint => write!(f, "footprint"),
            Self::Iterate => write!(f, "iterate"),
        }
    }
}

/// Errors that abort a single case.
#[derive(Debug, Error)]
pub enum CaseError {
    /// The candidate returned an error.
    #[error("{stage} failed: {source}")]
    Capability {
        /// Where it failed.
        stage: Stage,
        /// The candidate's error.
        #[source]
        source: SetError,
    },

    /// A transition was requested out of order.
    #[error("invalid state: current={current}, expected={expected}")]
    InvalidState {
        /// Current state of the case.
        current: CaseState,
        /// State required by the transition.
        expected: CaseState,
    },
}

impl CaseError {
    /// Wrap a capability error.
    #[must_use]
    pub fn capability(stage: Stage, source: SetError) -> Self {
        Self::Capability { stage, source }
    }

    /// The failing stage, for capability errors.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Capability { stage, .. } => Some(*stage),
            Self::InvalidState { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    entries: u64,
    checksum: u64,
    out_of_order: Option<(u32, u32)>,
}

impl Tally {
    fn collect<I: Iterator<Item = u32>>(keys: I) -> Self {
        let mut tally = Self::default();
        let mut previous: Option<u32> = None;
        for key in keys {
            if let Some(prev) = previous {
                if key <= prev && tally.out_of_order.is_none() {
                    tally.out_of_order = Some((prev, key));
                }
            }
            previous = Some(key);
            tally.entries += 1;
            tally.checksum = tally.checksum.wrapping_add(u64::from(key));
        }
        tally
    }
}

/// A single benchmark case over set type `S`.
#[derive(Debug)]
pub struct BenchmarkCase<'w, S: IntegerSet> {
    workload: &'w Workload,
    state: CaseState,
    set: Option<S>,
    build: Option<PhaseResult>,
    footprint_bytes: u64,
    iterate: Option<PhaseResult>,
    out_of_order: Option<(u32, u32)>,
}

impl<'w, S: IntegerSet> BenchmarkCase<'w, S> {
    /// Create an unbuilt case.
    #[must_use]
    pub fn new(workload: &'w Workload) -> Self {
        Self {
            workload,
            state: CaseState::Unbuilt,
            set: None,
            build: None,
            footprint_bytes: 0,
            iterate: None,
            out_of_order: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CaseState {
        self.state
    }

    /// Footprint recorded by the build phase.
    #[must_use]
    pub fn footprint_bytes(&self) -> Option<u64> {
        self.build.as_ref().map(|_| self.footprint_bytes)
    }

    fn expect_state(&self, expected: CaseState) -> Result<(), CaseError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CaseError::InvalidState {
                current: self.state,
                expected,
            })
        }
    }

    /// Unbuilt -> Built.
    ///
    /// Inserts every workload key into a fresh set under the timer, then runs
    /// the untimed finalize hook and records the footprint.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::InvalidState`] unless unbuilt, or
    /// [`CaseError::Capability`] if the set fails.
    pub fn build(&mut self) -> Result<&PhaseResult, CaseError> {
        self.expect_state(CaseState::Unbuilt)?;

        let mut set = S::create().map_err(|e| CaseError::capability(Stage::Create, e))?;
        let keys = self.workload.keys();

        let (inserted, elapsed) = measure(|| {
            let mut inserted = 0u64;
            for key in keys {
                set.insert(key)?;
                inserted += 1;
            }
            Ok::<u64, SetError>(inserted)
        });
        let inserted = inserted.map_err(|e| CaseError::capability(Stage::Build, e))?;

        set.finalize()
            .map_err(|e| CaseError::capability(Stage::Finalize, e))?;
        self.footprint_bytes = set
            .footprint_bytes()
            .map_err(|e| CaseError::capability(Stage::Footprint, e))?;

        debug!(
            density = %self.workload.density(),
            inserted,
            elapsed_ns = elapsed.as_nanos() as u64,
            footprint_bytes = self.footprint_bytes,
            "build phase complete"
        );

        self.set = Some(set);
        self.state = CaseState::Built;
        Ok(self.build.insert(PhaseResult::build(elapsed, inserted)))
    }

    /// Built -> Measured.
    ///
    /// Drains a fresh iterator under the timer, counting entries and summing
    /// keys.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::InvalidState`] unless built, or
    /// [`CaseError::Capability`] if no iterator can be produced.
    pub fn iterate(&mut self) -> Result<&PhaseResult, CaseError> {
        self.expect_state(CaseState::Built)?;
        let set = self.set.as_ref().ok_or(CaseError::InvalidState {
            current: self.state,
            expected: CaseState::Built,
        })?;

        let (tally, elapsed) = measure(|| set.iter().map(Tally::collect));
        let tally = tally.map_err(|e| CaseError::capability(Stage::Iterate, e))?;

        debug!(
            density = %self.workload.density(),
            entries = tally.entries,
            checksum = tally.checksum,
            elapsed_ns = elapsed.as_nanos() as u64,
            "iterate phase complete"
        );

        self.out_of_order = tally.out_of_order;
        self.state = CaseState::Measured;
        Ok(self
            .iterate
            .insert(PhaseResult::iterate(elapsed, tally.entries, tally.checksum)))
    }

    /// Release the set and validate iteration against the workload.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::InvalidState`] unless measured.
    pub fn finish(mut self) -> Result<CaseMeasurement, CaseError> {
        self.expect_state(CaseState::Measured)?;
        drop(self.set.take());

        let (Some(build), Some(iterate)) = (self.build, self.iterate) else {
            return Err(CaseError::InvalidState {
                current: self.state,
                expected: CaseState::Measured,
            });
        };

        let mut anomalies = Vec::new();
        let expected_entries = self.workload.expected_entries();
        if iterate.entries != expected_entries {
            anomalies.push(Anomaly::EntryCountMismatch {
                expected: expected_entries,
                observed: iterate.entries,
            });
        }
        let expected_checksum = self.workload.expected_checksum();
        let checksum = iterate.checksum.unwrap_or_default();
        if checksum != expected_checksum {
            anomalies.push(Anomaly::ChecksumMismatch {
                expected: expected_checksum,
                observed: checksum,
            });
        }
        if let Some((previous, key)) = self.out_of_order {
            anomalies.push(Anomaly::OutOfOrder { previous, key });
        }

        Ok(CaseMeasurement {
            build,
            iterate,
            footprint_bytes: self.footprint_bytes,
            footprint_estimated: S::FOOTPRINT_ESTIMATED,
            anomalies,
        })
    }
}

/// Run a complete case for set type `S`.
///
/// Usable as a [`CaseRunner`](super::CaseRunner) function pointer.
///
/// # Errors
///
/// Returns the first capability error raised by the set.
pub fn run_case<S: IntegerSet>(workload: &Workload) -> Result<CaseMeasurement, CaseError> {
    let mut case = BenchmarkCase::<S>::new(workload);
    case.build()?;
    case.iterate()?;
    case.finish()
}

//! Benchmark case results.

use super::case::CaseError;
use super::workload::Density;
use std::fmt;
use std::time::Duration;

/// A timed unit of work within a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Inserting every workload key into a fresh set.
    Build,
    /// Full forward traversal of the set.
    Iterate,
}

impl Phase {
    /// Phase name as reported.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Iterate => "iterate",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurement of one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseResult {
    /// Which phase.
    pub phase: Phase,
    /// Monotonic elapsed time.
    pub elapsed: Duration,
    /// Keys inserted (build) or yielded (iterate).
    pub entries: u64,
    /// Wrapping sum of yielded keys; iterate phase only.
    pub checksum: Option<u64>,
}

impl PhaseResult {
    /// Result of a build phase.
    #[must_use]
    pub fn build(elapsed: Duration, inserted: u64) -> Self {
        Self {
            phase: Phase::Build,
            elapsed,
            entries: inserted,
            checksum: None,
        }
    }

    /// Result of an iterate phase.
    #[must_use]
    pub fn iterate(elapsed: Duration, entries: u64, checksum: u64) -> Self {
        Self {
            phase: Phase::Iterate,
            elapsed,
            entries,
            checksum: Some(checksum),
        }
    }
}

/// A correctness problem in the candidate, reported as a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// Iteration yielded a different number of keys than were inserted.
    EntryCountMismatch {
        /// Keys in the workload.
        expected: u64,
        /// Keys yielded.
        observed: u64,
    },
    /// Iteration yielded keys whose sum differs from the workload's.
    ChecksumMismatch {
        /// Workload checksum.
        expected: u64,
        /// Iteration checksum.
        observed: u64,
    },
    /// A key was not strictly greater than its predecessor.
    OutOfOrder {
        /// The preceding key.
        previous: u32,
        /// The offending key.
        key: u32,
    },
    /// A repetition disagreed with the first run of the same case.
    RepetitionDivergence {
        /// `(entries, checksum)` of the first run.
        first: (u64, u64),
        /// `(entries, checksum)` of this run.
        observed: (u64, u64),
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntryCountMismatch { expected, observed } => {
                write!(f, "entry count mismatch: expected {expected}, observed {observed}")
            },
            Self::ChecksumMismatch { expected, observed } => {
                write!(f, "checksum mismatch: expected {expected}, observed {observed}")
            },
            Self::OutOfOrder { previous, key } => {
                write!(f, "iteration out of order: {key} after {previous}")
            },
            Self::RepetitionDivergence { first, observed } => write!(
                f,
                "repetition diverged: first run {}/{}, this run {}/{} (entries/checksum)",
                first.0, first.1, observed.0, observed.1
            ),
        }
    }
}

/// Measurements of a case that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseMeasurement {
    /// Build phase.
    pub build: PhaseResult,
    /// Iterate phase.
    pub iterate: PhaseResult,
    /// Footprint after build and finalize.
    pub footprint_bytes: u64,
    /// The footprint is a payload estimate, not a library-reported size.
    pub footprint_estimated: bool,
    /// Warnings attached to this case.
    pub anomalies: Vec<Anomaly>,
}

impl CaseMeasurement {
    /// Keys yielded by iteration.
    #[must_use]
    pub fn entries(&self) -> u64 {
        self.iterate.entries
    }

    /// Iteration checksum.
    #[must_use]
    pub fn checksum(&self) -> u64 {
        self.iterate.checksum.unwrap_or_default()
    }

    /// Footprint in KiB, truncated.
    #[must_use]
    pub fn footprint_kb(&self) -> u64 {
        self.footprint_bytes / 1024
    }
}

/// How a case ended.
#[derive(Debug)]
pub enum CaseOutcome {
    /// Both phases ran.
    Completed(CaseMeasurement),
    /// The candidate failed; no measurements are reported.
    Failed(CaseError),
}

/// Result record of one benchmark case.
#[derive(Debug)]
pub struct CaseResult {
    /// Registered candidate name.
    pub candidate: String,
    /// Density of the workload.
    pub density: Density,
    /// Zero-based repetition index.
    pub repetition: u32,
    /// Measurements or failure.
    pub outcome: CaseOutcome,
}

impl CaseResult {
    /// Measurements, if the case completed.
    #[must_use]
    pub fn measurement(&self) -> Option<&CaseMeasurement> {
        match self.outcome {
            CaseOutcome::Completed(ref m) => Some(m),
            CaseOutcome::Failed(_) => None,
        }
    }

    /// The failure, if the case did not complete.
    #[must_use]
    pub fn error(&self) -> Option<&CaseError> {
        match self.outcome {
            CaseOutcome::Completed(_) => None,
            CaseOutcome::Failed(ref e) => Some(e),
        }
    }

    /// Returns `true` if the case failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Failed(_))
    }

    /// Warnings of a completed case.
    #[must_use]
    pub fn anomalies(&self) -> &[Anomaly] {
        self.measurement().map_or(&[], |m| m.anomalies.as_slice())
    }
}

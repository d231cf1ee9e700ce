//! # Benchmark Harness
//!
//! Drives [`IntegerSet`](crate::set::IntegerSet) candidates through timed
//! build and iterate phases over a sweep of densities.
//!
//! ## Components
//!
//! - **Workload**: deterministic multiples of a density in `[0, universe]`
//! - **Timer**: single monotonic measurement per phase
//! - **Case**: `Unbuilt -> Built -> Measured` for one candidate
//! - **Registry**: candidates in reporting order
//! - **Sweep**: densities x candidates, sequential
//! - **Report**: grouped text or JSON lines
//!
//! ## Example
//!
//! ```rust,no_run
//! use bitmap_bench::perf::{
//!     CandidateRegistry, DensityProgression, ReportEmitter, ReportFormat, Resolution,
//!     SweepController,
//! };
//!
//! let candidates = CandidateRegistry::builtin().select(None).unwrap();
//! let progression = DensityProgression::new(10, 10, 1000).unwrap();
//! let controller = SweepController::new(1_000_000, progression, candidates);
//!
//! let mut emitter =
//!     ReportEmitter::new(std::io::stdout(), ReportFormat::Text, Resolution::Nanos, 1_000_000);
//! let summary = controller.run_with(|group| emitter.emit_group(group)).unwrap();
//! assert!(summary.is_success());
//! ```

pub mod case;
pub mod registry;
pub mod report;
pub mod result;
pub mod sweep;
pub mod timer;
pub mod workload;

pub use case::{run_case, BenchmarkCase, CaseError, CaseState, Stage};
pub use registry::{Candidate, CandidateRegistry, CaseRunner};
pub use report::{case_lines, CaseRecord, CaseStatus, ReportEmitter, ReportFormat};
pub use result::{Anomaly, CaseMeasurement, CaseOutcome, CaseResult, Phase, PhaseResult};
pub use sweep::{DensityGroup, DensityProgression, SweepController, SweepSummary};
pub use timer::{measure, Resolution};
pub use workload::{Density, Keys, Workload};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let _ = DensityProgression::default();
        let _ = Resolution::default();
        let _ = ReportFormat::default();
        assert!(!CandidateRegistry::builtin().is_empty());
    }
}

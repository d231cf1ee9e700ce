//! Sweep controller.
//!
//! Runs every selected candidate over a geometric progression of densities,
//! strictly sequentially on the calling thread. Each case gets a fresh set
//! that is dropped before the next case starts.

use super::registry::{Candidate, CandidateRegistry};
use super::result::{Anomaly, CaseOutcome, CaseResult};
use super::workload::{Density, Workload};
use crate::config::{ConfigError, ConfigResult, HarnessConfig};
use std::convert::Infallible;
use tracing::{error, info, warn};

/// Geometric progression `start, start * factor, ...` up to `limit` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityProgression {
    /// Always at least 1.
    start: u32,
    factor: u32,
    limit: u32,
}

impl Default for DensityProgression {
    fn default() -> Self {
        Self {
            start: 10,
            factor: 10,
            limit: 100_000,
        }
    }
}

impl DensityProgression {
    /// Create a progression.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDensity`] for a zero start and
    /// [`ConfigError::InvalidProgression`] when the factor is below 2 or the
    /// start exceeds the limit.
    pub fn new(start: u32, factor: u32, limit: u32) -> ConfigResult<Self> {
        let start = Density::new(start)?;
        if factor < 2 {
            return Err(ConfigError::InvalidProgression(format!(
                "factor {factor} must be at least 2"
            )));
        }
        if start.get() > limit {
            return Err(ConfigError::InvalidProgression(format!(
                "start {start} exceeds limit {limit}"
            )));
        }
        Ok(Self {
            start: start.get(),
            factor,
            limit,
        })
    }

    /// A progression with a single density.
    #[must_use]
    pub fn single(density: Density) -> Self {
        Self {
            start: density.get(),
            factor: 2,
            limit: density.get(),
        }
    }

    /// All densities, ascending.
    #[must_use]
    pub fn densities(&self) -> Vec<Density> {
        let mut densities = Vec::new();
        let mut current = Some(self.start);
        while let Some(value) = current.filter(|&v| v <= self.limit) {
            if let Ok(density) = Density::new(value) {
                densities.push(density);
            }
            current = value.checked_mul(self.factor);
        }
        densities
    }
}

/// Results of all candidates at one density, in registration order.
#[derive(Debug)]
pub struct DensityGroup {
    /// The density.
    pub density: Density,
    /// One result per candidate and repetition.
    pub results: Vec<CaseResult>,
}

/// Everything a sweep produced.
#[derive(Debug)]
pub struct SweepSummary {
    /// Universe the sweep ran over.
    pub universe: u32,
    /// Groups in ascending density order.
    pub groups: Vec<DensityGroup>,
}

impl SweepSummary {
    /// All case results, in execution order.
    pub fn results(&self) -> impl Iterator<Item = &CaseResult> {
        self.groups.iter().flat_map(|g| g.results.iter())
    }

    /// Number of cases run.
    #[must_use]
    pub fn cases(&self) -> usize {
        self.results().count()
    }

    /// Number of failed cases.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.results().filter(|r| r.is_failed()).count()
    }

    /// Number of anomalies across all completed cases.
    #[must_use]
    pub fn anomalies(&self) -> usize {
        self.results().map(|r| r.anomalies().len()).sum()
    }

    /// Returns `true` if no case failed. Anomalies do not count.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

/// Drives benchmark cases across densities and candidates.
#[derive(Debug)]
pub struct SweepController {
    universe: u32,
    progression: DensityProgression,
    repetitions: u32,
    candidates: Vec<Candidate>,
}

impl SweepController {
    /// Create a controller running each case once.
    #[must_use]
    pub fn new(universe: u32, progression: DensityProgression, candidates: Vec<Candidate>) -> Self {
        Self {
            universe,
            progression,
            repetitions: 1,
            candidates,
        }
    }

    /// Build a controller from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an out-of-range universe, an invalid
    /// progression or an unknown candidate.
    pub fn from_config(config: &HarnessConfig, registry: &CandidateRegistry) -> ConfigResult<Self> {
        let sweep = &config.sweep;
        let universe = sweep
            .universe()
            .ok_or(ConfigError::UniverseTooLarge(sweep.universe_size))?;
        let progression =
            DensityProgression::new(sweep.density_start, sweep.density_factor, sweep.density_limit)?;
        let candidates = registry.select(sweep.candidates.as_deref())?;

        Ok(Self::new(universe, progression, candidates).with_repetitions(sweep.repetitions))
    }

    /// Run every case `repetitions` times.
    #[must_use]
    pub fn with_repetitions(mut self, repetitions: u32) -> Self {
        self.repetitions = repetitions.max(1);
        self
    }

    /// Universe size.
    #[must_use]
    pub fn universe(&self) -> u32 {
        self.universe
    }

    /// Candidates, in reporting order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Run the full sweep.
    #[must_use]
    pub fn run(&self) -> SweepSummary {
        match self.run_with(|_| Ok::<(), Infallible>(())) {
            Ok(summary) => summary,
            Err(never) => match never {},
        }
    }

    /// Run the full sweep, handing each density group to `on_group` as soon
    /// as it completes.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first error from `on_group`.
    pub fn run_with<F, E>(&self, mut on_group: F) -> Result<SweepSummary, E>
    where
        F: FnMut(&DensityGroup) -> Result<(), E>,
    {
        let densities = self.progression.densities();
        info!(
            universe = self.universe,
            densities = densities.len(),
            candidates = self.candidates.len(),
            repetitions = self.repetitions,
            "starting sweep"
        );

        let mut groups = Vec::with_capacity(densities.len());
        for density in densities {
            let group = self.run_group(density);
            on_group(&group)?;
            groups.push(group);
        }

        Ok(SweepSummary {
            universe: self.universe,
            groups,
        })
    }

    fn run_group(&self, density: Density) -> DensityGroup {
        let workload = Workload::new(self.universe, density);
        let mut results = Vec::new();

        for candidate in &self.candidates {
            let mut first: Option<(u64, u64)> = None;
            for repetition in 0..self.repetitions {
                let outcome = match candidate.run(&workload) {
                    Ok(mut measurement) => {
                        let observed = (measurement.entries(), measurement.checksum());
                        match first {
                            None => first = Some(observed),
                            Some(expected) if expected != observed => {
                                measurement.anomalies.push(Anomaly::RepetitionDivergence {
                                    first: expected,
                                    observed,
                                });
                            },
                            Some(_) => {},
                        }

                        info!(
                            candidate = candidate.name(),
                            %density,
                            repetition,
                            entries = measurement.entries(),
                            build_ns = measurement.build.elapsed.as_nanos() as u64,
                            iterate_ns = measurement.iterate.elapsed.as_nanos() as u64,
                            footprint_bytes = measurement.footprint_bytes,
                            "case complete"
                        );
                        for anomaly in &measurement.anomalies {
                            warn!(candidate = candidate.name(), %density, %anomaly, "measurement anomaly");
                        }
                        CaseOutcome::Completed(measurement)
                    },
                    Err(e) => {
                        error!(candidate = candidate.name(), %density, repetition, error = %e, "case failed");
                        CaseOutcome::Failed(e)
                    },
                };

                results.push(CaseResult {
                    candidate: candidate.name().to_string(),
                    density,
                    repetition,
                    outcome,
                });
            }
        }

        DensityGroup { density, results }
    }
}

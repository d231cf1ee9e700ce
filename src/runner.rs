//! Wiring from configuration to a finished report.

use crate::config::{BasicValidator, CandidateValidator, ConfigLoader, HarnessConfig};
use crate::error::BenchResult;
use crate::perf::{CandidateRegistry, ReportEmitter, SweepController, SweepSummary};
use std::io::Write;
use tracing::{debug, info};

/// A loader with the standard validators for `registry`.
#[must_use]
pub fn config_loader(registry: &CandidateRegistry) -> ConfigLoader {
    ConfigLoader::new()
        .with_validator(BasicValidator::new())
        .with_validator(CandidateValidator::new(registry.names()))
}

/// Run the configured sweep, streaming the report to `out`.
///
/// Configuration problems are returned before any case runs. Case failures
/// are not errors here; check [`SweepSummary::is_success`].
///
/// # Errors
///
/// Returns a configuration error or the first report write error.
pub fn run<W: Write>(
    config: &HarnessConfig,
    registry: &CandidateRegistry,
    out: W,
) -> BenchResult<SweepSummary> {
    debug!(?config, "effective configuration");
    let controller = SweepController::from_config(config, registry)?;
    let mut emitter = ReportEmitter::new(
        out,
        config.report.format,
        config.report.resolution,
        controller.universe(),
    );

    emitter.begin()?;
    let summary = controller.run_with(|group| emitter.emit_group(group))?;
    emitter.finish(&summary)?;

    info!(
        cases = summary.cases(),
        failures = summary.failures(),
        anomalies = summary.anomalies(),
        "sweep complete"
    );
    Ok(summary)
}

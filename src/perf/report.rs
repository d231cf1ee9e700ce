//! Report emitter.
//!
//! Text output groups cases by density:
//!
//! ```text
//! Density 100
//! roaring    Entries : 1000001 Build: 9120344 ns Iterate: 1510222 ns Size: 1963 KB
//! croaring   Entries : 1000001 Build: 8012991 ns Iterate: 1203343 ns Size: 1963 KB
//!
//! ```
//!
//! JSON output writes one [`CaseRecord`] per line.

use super::result::{CaseOutcome, CaseResult};
use super::sweep::{DensityGroup, SweepSummary};
use super::timer::Resolution;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable lines grouped by density (default).
    #[default]
    Text,
    /// One JSON object per case.
    Json,
}

/// Whether a case produced measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// Both phases ran.
    Completed,
    /// The candidate failed.
    Failed,
}

/// Machine-readable form of a [`CaseResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Sweep start, RFC 3339.
    pub started_at: String,
    /// Universe size.
    pub universe: u32,
    /// Density.
    pub density: u32,
    /// Candidate name.
    pub candidate: String,
    /// Zero-based repetition index.
    pub repetition: u32,
    /// Completed or failed.
    pub status: CaseStatus,
    /// Unit of `build` and `iterate`.
    pub resolution: Resolution,
    /// Keys yielded by iteration.
    pub entries: Option<u64>,
    /// Iteration checksum.
    pub checksum: Option<u64>,
    /// Build phase duration.
    pub build: Option<u64>,
    /// Iterate phase duration.
    pub iterate: Option<u64>,
    /// Footprint in bytes.
    pub footprint_bytes: Option<u64>,
    /// Footprint in KiB, truncated.
    pub footprint_kb: Option<u64>,
    /// The footprint is a payload estimate.
    #[serde(default)]
    pub footprint_estimated: bool,
    /// Anomalies, rendered.
    pub warnings: Vec<String>,
    /// Failure, rendered.
    pub error: Option<String>,
}

impl CaseRecord {
    /// Convert a result.
    #[must_use]
    pub fn new(
        result: &CaseResult,
        universe: u32,
        resolution: Resolution,
        started_at: &DateTime<Utc>,
    ) -> Self {
        let mut record = Self {
            started_at: started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            universe,
            density: result.density.get(),
            candidate: result.candidate.clone(),
            repetition: result.repetition,
            status: CaseStatus::Failed,
            resolution,
            entries: None,
            checksum: None,
            build: None,
            iterate: None,
            footprint_bytes: None,
            footprint_kb: None,
            footprint_estimated: false,
            warnings: Vec::new(),
            error: None,
        };

        match result.outcome {
            CaseOutcome::Completed(ref m) => {
                record.status = CaseStatus::Completed;
                record.entries = Some(m.entries());
                record.checksum = m.iterate.checksum;
                record.build = Some(resolution.count(m.build.elapsed));
                record.iterate = Some(resolution.count(m.iterate.elapsed));
                record.footprint_bytes = Some(m.footprint_bytes);
                record.footprint_kb = Some(m.footprint_kb());
                record.footprint_estimated = m.footprint_estimated;
                record.warnings = m.anomalies.iter().map(ToString::to_string).collect();
            },
            CaseOutcome::Failed(ref e) => record.error = Some(e.to_string()),
        }

        record
    }
}

fn label(result: &CaseResult) -> String {
    if result.repetition == 0 {
        result.candidate.clone()
    } else {
        format!("{}#{}", result.candidate, result.repetition + 1)
    }
}

/// Text lines for one case: the measurement or failure line, then one
/// warning line per anomaly.
#[must_use]
pub fn case_lines(result: &CaseResult, resolution: Resolution) -> Vec<String> {
    let label = label(result);
    match result.outcome {
        CaseOutcome::Completed(ref m) => {
            let mut lines = vec![format!(
                "{label:<10} Entries : {} Build: {} Iterate: {} Size: {} KB{}",
                m.entries(),
                resolution.format(m.build.elapsed),
                resolution.format(m.iterate.elapsed),
                m.footprint_kb(),
                if m.footprint_estimated { " (payload estimate)" } else { "" }
            )];
            lines.extend(
                m.anomalies
                    .iter()
                    .map(|a| format!("{label:<10} WARNING: {a}")),
            );
            lines
        },
        CaseOutcome::Failed(ref e) => vec![format!("{label:<10} FAILED: {e}")],
    }
}

/// Writes sweep results as they arrive.
#[derive(Debug)]
pub struct ReportEmitter<W: Write> {
    out: W,
    format: ReportFormat,
    resolution: Resolution,
    universe: u32,
    started_at: DateTime<Utc>,
}

impl<W: Write> ReportEmitter<W> {
    /// Create an emitter; the sweep start time is taken now.
    pub fn new(out: W, format: ReportFormat, resolution: Resolution, universe: u32) -> Self {
        Self {
            out,
            format,
            resolution,
            universe,
            started_at: Utc::now(),
        }
    }

    /// Override the recorded sweep start time.
    #[must_use]
    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Write the preamble (text only).
    ///
    /// # Errors
    ///
    /// Returns any write error.
    pub fn begin(&mut self) -> io::Result<()> {
        if self.format == ReportFormat::Text {
            writeln!(
                self.out,
                "Bitmap benchmark: keys 0..={}, started {}",
                self.universe,
                self.started_at.to_rfc3339_opts(SecondsFormat::Secs, true)
            )?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    /// Write one density group.
    ///
    /// # Errors
    ///
    /// Returns any write or serialization error.
    pub fn emit_group(&mut self, group: &DensityGroup) -> io::Result<()> {
        match self.format {
            ReportFormat::Text => {
                writeln!(self.out, "Density {}", group.density)?;
                for result in &group.results {
                    for line in case_lines(result, self.resolution) {
                        writeln!(self.out, "{line}")?;
                    }
                }
                writeln!(self.out)?;
            },
            ReportFormat::Json => {
                for result in &group.results {
                    let record =
                        CaseRecord::new(result, self.universe, self.resolution, &self.started_at);
                    serde_json::to_writer(&mut self.out, &record)?;
                    writeln!(self.out)?;
                }
            },
        }
        self.out.flush()
    }

    /// Write the closing summary (text only) and flush.
    ///
    /// # Errors
    ///
    /// Returns any write error.
    pub fn finish(&mut self, summary: &SweepSummary) -> io::Result<()> {
        if self.format == ReportFormat::Text {
            writeln!(
                self.out,
                "Sweep complete: {} cases, {} failed, {} anomalies",
                summary.cases(),
                summary.failures(),
                summary.anomalies()
            )?;
        }
        self.out.flush()
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

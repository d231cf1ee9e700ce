//! Timed phase runner.
//!
//! Durations are measured with [`Instant`], which is monotonic and immune to
//! wall-clock adjustments. Measurement always keeps the full [`Duration`];
//! [`Resolution`] only decides how durations are reported.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Measure wall-clock time for a single execution of `f`.
///
/// No warmup and no retries: repetition is the sweep's concern.
pub fn measure<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    (result, elapsed)
}

/// Reporting unit applied uniformly to every duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Nanoseconds (default).
    #[default]
    Nanos,
    /// Microseconds.
    Micros,
    /// Milliseconds.
    Millis,
}

impl Resolution {
    /// Unit suffix.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::Nanos => "ns",
            Self::Micros => "us",
            Self::Millis => "ms",
        }
    }

    /// Whole units in `duration`, truncated, saturating at `u64::MAX`.
    #[must_use]
    pub fn count(self, duration: Duration) -> u64 {
        let count = match self {
            Self::Nanos => duration.as_nanos(),
            Self::Micros => duration.as_micros(),
            Self::Millis => duration.as_millis(),
        };
        u64::try_from(count).unwrap_or(u64::MAX)
    }

    /// `duration` rendered with its unit, e.g. `1500 ns`.
    #[must_use]
    pub fn format(self, duration: Duration) -> String {
        format!("{} {}", self.count(duration), self.unit())
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_returns_value() {
        let (value, elapsed) = measure(|| {
            std::thread::sleep(Duration::from_millis(2));
            42
        });
        assert_eq!(value, 42);
        assert!(elapsed >= Duration::from_millis(2));
    }

    #[test]
    fn test_measure_runs_once() {
        let mut calls = 0;
        let _ = measure(|| calls += 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_resolution_counts() {
        let d = Duration::from_nanos(1_234_567);
        assert_eq!(Resolution::Nanos.count(d), 1_234_567);
        assert_eq!(Resolution::Micros.count(d), 1_234);
        assert_eq!(Resolution::Millis.count(d), 1);
    }

    #[test]
    fn test_resolution_format() {
        assert_eq!(Resolution::Nanos.format(Duration::from_micros(3)), "3000 ns");
        assert_eq!(Resolution::Millis.to_string(), "ms");
    }

    #[test]
    fn test_resolution_saturates() {
        assert_eq!(Resolution::Nanos.count(Duration::MAX), u64::MAX);
    }
}

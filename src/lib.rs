//! # bitmap-bench
//!
//! A microbenchmark harness measuring how fast compressed integer-set
//! libraries are populated and iterated across a range of bit densities.
//!
//! ## Features
//!
//! - Deterministic workloads: every multiple of a density in `[0, universe]`
//! - Separately timed build and iterate phases on a monotonic clock
//! - Footprint measured after an optional, untimed post-build hook
//! - Iteration validated by entry count and checksum
//! - Text or JSON-lines reports grouped by density
//!
//! ## Architecture
//!
//! Set libraries are reached only through the [`set::IntegerSet`] trait.
//! The [`perf`] module holds the harness: workload generation, the timed
//! phase runner, the benchmark case state machine, the sweep controller and
//! the report emitter. [`config`] loads and validates the sweep parameters.

pub mod config;
pub mod error;
pub mod logging;
pub mod perf;
pub mod runner;
pub mod set;

pub use error::{BenchError, BenchResult};

//! bitmap-bench binary entry point.
//!
//! Takes no arguments. Set `BITMAP_BENCH_CONFIG` to a TOML file to change
//! the sweep; the report goes to stdout, diagnostics to stderr.
//!
//! Exit status: 0 when every case completed, 1 when any case failed, 2 when
//! the configuration is invalid or the report cannot be written.

use bitmap_bench::perf::CandidateRegistry;
use bitmap_bench::{logging, runner};
use std::process::ExitCode;

fn main() -> ExitCode {
    let registry = CandidateRegistry::builtin();

    let loaded = match runner::config_loader(&registry).load_from_env() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("bitmap-bench: {e}");
            return ExitCode::from(2);
        },
    };

    // The level comes from the file, so validation warnings wait until now.
    if let Err(e) = logging::init(&loaded.config.logging) {
        eprintln!("bitmap-bench: {e}");
    }
    loaded.log_warnings();
    let config = loaded.into_config();

    let stdout = std::io::stdout();
    match runner::run(&config, &registry, stdout.lock()) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(summary) => {
            tracing::error!(failures = summary.failures(), "sweep finished with failed cases");
            ExitCode::from(1)
        },
        Err(e) => {
            eprintln!("bitmap-bench: {e}");
            ExitCode::from(2)
        },
    }
}

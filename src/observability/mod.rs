//! Logging setup for the `riskgauge` binary.
//!
//! The library logs through the `log` facade and `tracing` spans; the
//! binary installs a `tracing-subscriber` formatter on stderr that also
//! receives `log` records.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter from `-v`, falling back to `RUST_LOG` when no `-v` was given.
pub fn env_filter(verbosity: u8) -> EnvFilter {
    let level = level_for_verbosity(verbosity);
    if verbosity == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    }
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init_logging(verbosity: u8) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .try_init();
    if result.is_err() {
        log::debug!("Logging already initialized");
    }
}

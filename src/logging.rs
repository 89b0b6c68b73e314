//! Logging setup
//!
//! Installs a `tracing-subscriber` fmt subscriber on stderr. `RUST_LOG`
//! takes precedence; otherwise the level follows the CLI verbosity.

use crate::output::Verbosity;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity level
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbosity == Verbosity::Verbose)
        .without_time()
        .try_init();
}

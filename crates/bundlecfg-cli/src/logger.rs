//! Logging infrastructure for the bundlecfg CLI.
//!
//! Structured logging through `tracing`. The library emits events while it
//! discovers, merges and materializes configuration; this module decides how
//! much of that reaches the terminal.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "bundlecfg=debug,bundlecfg_config=debug,bundlecfg_cli=debug";
const QUIET_FILTER: &str = "bundlecfg=error,bundlecfg_config=error,bundlecfg_cli=error";
const DEFAULT_FILTER: &str = "bundlecfg=warn,bundlecfg_config=warn,bundlecfg_cli=info";

/// Initialize the tracing subscriber with the specified options.
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for bundlecfg crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: warnings from the library, info from the CLI
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = build_filter(verbose, quiet);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // try_init: tests may install a subscriber first
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

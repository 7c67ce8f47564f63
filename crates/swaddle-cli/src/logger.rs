//! Logging setup for the swaddle CLI.
//!
//! Uses the `tracing` ecosystem. Log lines always go to stderr so that
//! `swaddle render` can stream the rendered wrapper on stdout.
//!
//! # Example
//!
//! ```rust,no_run
//! use swaddle_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("rendering");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "swaddle_gen=debug,swaddle_config=debug,swaddle_cli=debug";
const QUIET_FILTER: &str = "swaddle_gen=error,swaddle_config=error,swaddle_cli=error";
const DEFAULT_FILTER: &str = "swaddle_gen=warn,swaddle_config=warn,swaddle_cli=info";

/// Initialize the tracing subscriber.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: debug for the swaddle crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. warnings from the libraries, info from the CLI
///
/// Calling it twice is harmless; the second subscriber is dropped.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    init_logger_with_filter(filter, no_color);
}

/// Initialize logging with a custom filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Check if colored output should be enabled on stderr.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}

//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;
use swaddle_config::ConfigError;

/// Convert CliError to miette Report
///
/// Render errors keep their diagnostic codes and help; config errors carry
/// their fix-it hint as help.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Render(e) | CliError::Config(ConfigError::Body(e)) => Report::new(e),
        CliError::Config(e) => match e.hint().map(str::to_string) {
            Some(hint) => miette::miette!(help = hint, "Configuration error: {}", e),
            None => miette::miette!("Configuration error: {}", e),
        },
        CliError::Options(e) => miette::miette!(
            help = "check the [render] table, SWADDLE_* variables and command-line flags",
            "Invalid render options: {}",
            e
        ),
        other => miette::miette!("{}", other),
    }
}

//! Status message functions for terminal output.

use owo_colors::OwoColorize;

use super::{color_enabled, quiet};

/// Print a success message to stderr.
///
/// ```no_run
/// use swaddle_cli::ui::success;
///
/// success("Wrote dist/lib.umd.js (1.20 KB)");
/// ```
pub fn success(message: &str) {
    if quiet() {
        return;
    }
    if color_enabled() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {}", message);
    }
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if quiet() {
        return;
    }
    if color_enabled() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {}", message);
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if quiet() {
        return;
    }
    if color_enabled() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {}", message);
    }
}

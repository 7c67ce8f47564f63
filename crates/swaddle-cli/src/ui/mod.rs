//! Terminal output for status messages.
//!
//! Everything here writes to stderr; stdout is reserved for rendered code.
//! Errors are not printed here, they go through miette from `main`.
//!
//! # Examples
//!
//! ```no_run
//! use swaddle_cli::ui;
//!
//! ui::init(false, false);
//! ui::success("Wrote dist/lib.umd.js");
//! ui::warning("jQuery is assumed global but never referenced");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::format_size;
pub use messages::{info, success, warning};

static COLOR: AtomicBool = AtomicBool::new(true);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Configure colors and quiet mode from the global flags.
///
/// Should be called once, early in `main`.
pub fn init(no_color: bool, quiet: bool) {
    COLOR.store(!no_color && should_use_color(), Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, then falls back to whether stderr is
/// a terminal.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

pub(crate) fn color_enabled() -> bool {
    COLOR.load(Ordering::Relaxed)
}

pub(crate) fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

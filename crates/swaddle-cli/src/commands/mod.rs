//! Command implementations for the swaddle CLI.
//!
//! - [`render`] - Wrap one body configured from flags
//! - [`build`] - Render every output of a config file
//! - [`check`] - Validate a config file and dry-run its outputs
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod build;
pub mod check;
pub mod render;
pub(crate) mod utils;

pub use build::execute as build_execute;
pub use check::execute as check_execute;
pub use render::execute as render_execute;

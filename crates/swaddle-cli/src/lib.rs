//! swaddle CLI - wrap flattened JavaScript bundles in module-format wrappers.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `render`, `build` and `check`
//! - [`config`] - render option layering (file, `SWADDLE_*`, flags) with figment
//! - [`error`] - CLI errors and their miette reports
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines on stderr
//!
//! # Example
//!
//! ```rust,no_run
//! use swaddle_cli::{commands, error::Result, logger};
//! use swaddle_cli::cli::BuildArgs;
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     commands::build_execute(BuildArgs::default())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

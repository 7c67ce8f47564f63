//! Command-line interface definition for swaddle.
//!
//! Built with clap v4's derive macros.
//!
//! # Command Structure
//!
//! - `swaddle render` - Wrap one flattened body, configured from flags
//! - `swaddle build` - Render every output listed in the config file
//! - `swaddle check` - Validate the config and dry-run every output

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{BuildArgs, CheckArgs, Command, RenderArgs};
pub use enums::*;
pub use validation::{parse_export, parse_external, parse_key_value};

/// swaddle - wrap flattened JavaScript bundles in module-format wrappers
#[derive(Parser, Debug)]
#[command(
    name = "swaddle",
    version,
    about = "Wrap flattened JavaScript bundles in UMD, AMD, CommonJS, ESM, IIFE or SystemJS",
    long_about = "swaddle takes the flattened, tree-shaken body of a bundle plus the list of\n\
                  external modules it reads, and renders the module-format wrapper around it.\n\
                  The body text is emitted verbatim; only the wrapper is generated."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every render decision, including guessed globals and resolved
    /// export modes.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

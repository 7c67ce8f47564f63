//! Check command implementation.
//!
//! Validates the config and dry-runs every output without writing files.

use swaddle_config::{ConfigValidator, FsValidator};

use crate::cli::CheckArgs;
use crate::commands::{build::render_target, utils};
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load the config and apply the profile
/// 2. Schema and filesystem validation
/// 3. Parse the input body
/// 4. Render every output in memory
///
/// # Errors
///
/// Returns the first failure; a precondition violation means the bundler
/// and its external list disagree.
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking configuration...");

    let (config, root) =
        utils::load_project(args.config.as_deref(), args.profile.as_deref(), args.cwd.as_deref())?;
    FsValidator::new(&root).validate(&config)?;
    ui::success("Configuration is valid");

    let body = config.module_body(&root)?;
    for name in &config.assume_globals {
        if !body.host_globals().contains(name) {
            ui::warning(&format!(
                "assume_globals lists `{}`, which the body never references",
                name
            ));
        }
    }

    for target in &config.output {
        let output = render_target(&config, target, &body)?;
        ui::success(&format!(
            "{} {} renders ({})",
            output.format(),
            target.file.display(),
            ui::format_size(output.code().len() as u64)
        ));
    }

    ui::success("All outputs render");
    Ok(())
}

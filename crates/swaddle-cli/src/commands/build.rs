//! Build command implementation.
//!
//! Renders every `[[output]]` of the project config and writes the files.

use serde_json::Map;
use swaddle_config::{ConfigValidator, FsValidator, OutputTarget, SwaddleConfig};
use swaddle_gen::{ModuleBody, WrapperOutput, render};

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::config::layer_render_options;
use crate::error::Result;
use crate::ui;

/// Execute the build command.
///
/// All outputs are rendered before the first file is written, so a
/// precondition failure in any output leaves the disk untouched.
pub fn execute(args: BuildArgs) -> Result<()> {
    let (config, root) =
        utils::load_project(args.config.as_deref(), args.profile.as_deref(), args.cwd.as_deref())?;
    FsValidator::new(&root).validate(&config)?;

    let body = config.module_body(&root)?;
    tracing::debug!(
        input = %config.input.display(),
        outputs = config.output.len(),
        "building"
    );

    let rendered = config
        .output
        .iter()
        .map(|target| render_target(&config, target, &body).map(|output| (target, output)))
        .collect::<Result<Vec<_>>>()?;

    for (target, output) in &rendered {
        let path = utils::resolve_path(&target.file, &root);
        utils::write_output(&path, output.code())?;
        ui::success(&format!(
            "{} {} ({})",
            output.format(),
            target.file.display(),
            ui::format_size(output.code().len() as u64)
        ));
    }

    ui::info(&format!(
        "Wrapped {} into {} output{}",
        config.input.display(),
        rendered.len(),
        if rendered.len() == 1 { "" } else { "s" }
    ));
    Ok(())
}

/// Render one output with its layered options (shared table, output keys,
/// `SWADDLE_*` environment)
pub(crate) fn render_target(
    config: &SwaddleConfig,
    target: &OutputTarget,
    body: &ModuleBody,
) -> Result<WrapperOutput> {
    let options = layer_render_options(&config.render_options(target)?, Map::new())?;
    Ok(render(target.format, body, &config.externals, &options)?)
}

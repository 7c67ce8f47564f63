//! Render command implementation.
//!
//! Wraps one flattened body described entirely by flags (plus, optionally,
//! the `[render]` table of a config file).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use swaddle_gen::{ModuleBody, OutputFormat, WrapperOutput, render_all};

use crate::cli::{Format, RenderArgs};
use crate::commands::utils;
use crate::config::{layer_render_options, render_overrides};
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Execute the render command.
///
/// # Steps
///
/// 1. Read and analyse the input body, applying `--export`,
///    `--default-export` and `--assume-global`
/// 2. Layer render options: defaults, `--config`, `SWADDLE_*`, flags
/// 3. Render every requested format
/// 4. Print to stdout, or write `--out-file` / `--out-dir`
///
/// # Errors
///
/// Fails on unreadable input, unusable options, or any precondition the
/// renderer rejects. Nothing is written when any format fails.
pub fn execute(args: RenderArgs) -> Result<()> {
    let body = read_body(&args)?;

    let base = match &args.config {
        Some(path) => utils::shared_render_table(path)?,
        None => serde_json::Value::Object(Default::default()),
    };
    let options = layer_render_options(&base, render_overrides(&args))?;

    let formats = dedup_formats(&args.formats);
    if formats.len() > 1 && args.out_dir.is_none() {
        return Err(CliError::InvalidArgument(
            "several formats need --out-dir, one file per format".to_string(),
        ));
    }

    let outputs = render_all(&formats, &body, &args.externals, &options)?;

    match (&args.out_file, &args.out_dir) {
        (Some(file), _) => {
            for output in &outputs {
                write_reported(file, output)?;
            }
        }
        (None, Some(dir)) => {
            for output in &outputs {
                let file = dir.join(output_file_name(&args.input, output.format()));
                write_reported(&file, output)?;
            }
        }
        (None, None) => {
            let mut stdout = std::io::stdout().lock();
            for output in &outputs {
                stdout.write_all(output.code().as_bytes())?;
            }
            stdout.flush()?;
        }
    }

    Ok(())
}

fn read_body(args: &RenderArgs) -> Result<ModuleBody> {
    let code = fs::read_to_string(&args.input).with_path(&args.input)?;

    let mut body = ModuleBody::parse(code)?;
    for name in &args.assume_globals {
        body = body.assume_global(name);
    }
    for (exported, local) in &args.exports {
        body = body.with_export(exported, local);
    }
    if let Some(local) = &args.default_export {
        body = body.with_default_export(local);
    }
    Ok(body)
}

fn write_reported(file: &Path, output: &WrapperOutput) -> Result<()> {
    utils::write_output(file, output.code())?;
    ui::success(&format!(
        "{} {} ({})",
        output.format(),
        file.display(),
        ui::format_size(output.code().len() as u64)
    ));
    Ok(())
}

/// `dist/flat.js` rendered as UMD becomes `flat.umd.js`
pub(crate) fn output_file_name(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bundle".to_string());
    PathBuf::from(format!("{}.{}.js", stem, format))
}

/// Requested formats in order, each once
fn dedup_formats(formats: &[Format]) -> Vec<OutputFormat> {
    let mut out: Vec<OutputFormat> = Vec::with_capacity(formats.len());
    for format in formats.iter().copied().map(OutputFormat::from) {
        if !out.contains(&format) {
            out.push(format);
        }
    }
    out
}

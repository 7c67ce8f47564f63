//! Rendering flattened bodies into module-format wrappers
//!
//! [`render`] validates its input once, then dispatches on the closed
//! [`OutputFormat`] enum to exactly one format module. Every format shares the
//! same [`RenderContext`]: the resolved export mode, the indent unit, and the
//! interop, export and body blocks.

mod amd;
mod cjs;
mod esm;
mod iife;
mod system;
mod text;
mod umd;

use crate::body::ModuleBody;
use crate::error::{RenderError, Result};
use crate::external::{ExternalReference, ImportKind};
use crate::identifier::{is_valid_identifier, keypath, single_quoted};
use crate::options::{ExportMode, RenderOptions};
use crate::output::{OutputFormat, WrapperOutput};
use indexmap::IndexSet;
use rayon::prelude::*;

/// Render `body` as a `format` bundle that receives `externals` in order.
///
/// Fails fast, before producing any text, when the body's free variables do
/// not exactly match the bindings of `externals`, or when a binding would be
/// captured by the wrapper.
///
/// # Example
///
/// ```rust
/// use swaddle_gen::{ExternalReference, ModuleBody, OutputFormat, RenderOptions, render};
///
/// let body = ModuleBody::parse("const doubled = _.map([1, 2], (n) => n * 2);")?
///     .with_default_export("doubled");
/// let externals = [ExternalReference::namespace("lodash", "_")];
/// let options = RenderOptions::new().name("doubled").global("lodash", "_");
///
/// let output = render(OutputFormat::Umd, &body, &externals, &options)?;
/// assert!(output.code().contains("factory(require('lodash'))"));
/// assert!(output.code().contains("define(['lodash'], factory)"));
/// # Ok::<(), swaddle_gen::RenderError>(())
/// ```
pub fn render(
    format: OutputFormat,
    body: &ModuleBody,
    externals: &[ExternalReference],
    options: &RenderOptions,
) -> Result<WrapperOutput> {
    let exports = resolve_exports(format, body, options)?;
    check_preconditions(format, exports, body, externals, options)?;

    let ctx = RenderContext::new(body, externals, options, exports);
    let code = match format {
        OutputFormat::Umd => umd::render(&ctx)?,
        OutputFormat::Amd => amd::render(&ctx)?,
        OutputFormat::Cjs => cjs::render(&ctx)?,
        OutputFormat::Esm => esm::render(&ctx)?,
        OutputFormat::Iife => iife::render(&ctx)?,
        OutputFormat::System => system::render(&ctx)?,
    };
    let code = finish(code, options, body.line_ending());

    tracing::debug!(
        format = %format,
        externals = externals.len(),
        exports = ?exports,
        bytes = code.len(),
        "rendered wrapper"
    );

    Ok(WrapperOutput::new(format, code))
}

/// Render the same bundle in several formats in parallel.
///
/// Outputs come back in the order of `formats`; the first error wins.
pub fn render_all(
    formats: &[OutputFormat],
    body: &ModuleBody,
    externals: &[ExternalReference],
    options: &RenderOptions,
) -> Result<Vec<WrapperOutput>> {
    formats
        .par_iter()
        .map(|&format| render(format, body, externals, options))
        .collect()
}

/// Export mode after `Auto` has been resolved against the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exports {
    None,
    Default,
    Named,
}

fn resolve_exports(
    format: OutputFormat,
    body: &ModuleBody,
    options: &RenderOptions,
) -> Result<Exports> {
    let names: Vec<String> = body.exports().iter().map(|e| e.exported.clone()).collect();
    let sole_default = names.len() == 1 && names[0] == "default";

    match options.exports {
        ExportMode::Default if !sole_default => Err(RenderError::InvalidExportMode {
            requested: "default",
            exports: names,
        }),
        ExportMode::Default => Ok(Exports::Default),
        ExportMode::None if !names.is_empty() => Err(RenderError::InvalidExportMode {
            requested: "none",
            exports: names,
        }),
        ExportMode::None => Ok(Exports::None),
        ExportMode::Named => Ok(Exports::Named),
        ExportMode::Auto if names.is_empty() => Ok(Exports::None),
        ExportMode::Auto if sole_default => Ok(Exports::Default),
        ExportMode::Auto => {
            if format != OutputFormat::Esm && names.iter().any(|name| name == "default") {
                tracing::warn!(
                    code = "MIXED_EXPORTS",
                    "Using named and default exports together. Consumers of your bundle will have to use {}['default'] to access the default export. Set exports to 'named' to disable this warning",
                    options.name.as_deref().unwrap_or("bundle")
                );
            }
            Ok(Exports::Named)
        }
    }
}

/// Input invariants, checked once before any text is produced.
fn check_preconditions(
    format: OutputFormat,
    exports: Exports,
    body: &ModuleBody,
    externals: &[ExternalReference],
    options: &RenderOptions,
) -> Result<()> {
    if let Some(offset) = body.top_level_await().filter(|_| format != OutputFormat::Esm) {
        return Err(RenderError::invalid_option(
            "format",
            format!(
                "the body awaits at top level (byte {}), which only an ES module can do; render it as esm",
                offset
            ),
        ));
    }

    let mut ids = IndexSet::new();
    let duplicate_ids: Vec<&str> = externals
        .iter()
        .filter(|external| !ids.insert(external.id.as_str()))
        .map(|external| external.id.as_str())
        .collect();
    if !duplicate_ids.is_empty() {
        return Err(RenderError::precondition(
            "external module ids must be unique",
            duplicate_ids,
        ));
    }

    let invalid: Vec<&str> = externals
        .iter()
        .map(|external| external.name.as_str())
        .filter(|name| !is_valid_identifier(name))
        .collect();
    if !invalid.is_empty() {
        return Err(RenderError::precondition(
            "external bindings must be legal identifiers",
            invalid,
        ));
    }

    let mut bindings: IndexSet<String> = IndexSet::new();
    let mut duplicate_bindings = Vec::new();
    for binding in externals.iter().flat_map(ExternalReference::bindings) {
        if bindings.contains(&binding) {
            duplicate_bindings.push(binding);
        } else {
            bindings.insert(binding);
        }
    }
    if !duplicate_bindings.is_empty() {
        return Err(RenderError::precondition(
            "external bindings must be unique",
            duplicate_bindings,
        ));
    }

    // An external may shadow a host global of the same name.
    let free: IndexSet<&str> = body
        .free_variables()
        .iter()
        .map(String::as_str)
        .chain(
            body.host_globals()
                .iter()
                .map(String::as_str)
                .filter(|name| bindings.contains(*name)),
        )
        .collect();

    let undeclared: Vec<&str> = free
        .iter()
        .copied()
        .filter(|name| !bindings.contains(*name))
        .collect();
    if !undeclared.is_empty() {
        return Err(RenderError::precondition(
            "the body references free variables no external supplies",
            undeclared,
        ));
    }

    let unused: Vec<&str> = bindings
        .iter()
        .map(String::as_str)
        .filter(|binding| !free.contains(binding))
        .collect();
    if !unused.is_empty() {
        return Err(RenderError::precondition(
            "externals declare bindings the body never references",
            unused,
        ));
    }

    let mut exported = IndexSet::new();
    let duplicate_exports: Vec<&str> = body
        .exports()
        .iter()
        .filter(|export| !exported.insert(export.exported.as_str()))
        .map(|export| export.exported.as_str())
        .collect();
    if !duplicate_exports.is_empty() {
        return Err(RenderError::precondition(
            "export names must be unique",
            duplicate_exports,
        ));
    }

    let dangling: Vec<&str> = body
        .exports()
        .iter()
        .map(|export| export.local.as_str())
        .filter(|local| !body.declarations().contains(*local) && !bindings.contains(*local))
        .collect();
    if !dangling.is_empty() {
        return Err(RenderError::precondition(
            "exports refer to bindings the body does not declare at top level",
            dangling,
        ));
    }

    let captured = captured_names(format, exports, body, externals, options, &bindings);
    if !captured.is_empty() {
        return Err(RenderError::precondition(
            format!("names collide with bindings of the {} wrapper", format),
            captured,
        ));
    }

    Ok(())
}

/// Names of the body or its externals that a wrapper parameter or helper of
/// `format` would shadow or redeclare.
fn captured_names(
    format: OutputFormat,
    exports: Exports,
    body: &ModuleBody,
    externals: &[ExternalReference],
    options: &RenderOptions,
    bindings: &IndexSet<String>,
) -> Vec<String> {
    // CommonJS module-scope variables are the body's own; only redeclaring them breaks.
    let (wrapper, references_allowed): (&[&str], bool) = match format {
        OutputFormat::Umd | OutputFormat::Amd | OutputFormat::Iife if exports == Exports::Named => {
            (&["exports"], false)
        }
        OutputFormat::Umd | OutputFormat::Amd | OutputFormat::Iife | OutputFormat::Esm => {
            (&[], false)
        }
        OutputFormat::System => (&["exports", "module"], false),
        OutputFormat::Cjs => (
            &["exports", "module", "require", "__filename", "__dirname"],
            true,
        ),
    };

    let in_use = |name: &str, with_references: bool| {
        bindings.contains(name)
            || body.declarations().contains(name)
            || (with_references && body.references().any(|reference| reference == name))
    };

    let mut captured: Vec<String> = wrapper
        .iter()
        .filter(|name| in_use(**name, !references_allowed))
        .map(|name| name.to_string())
        .collect();

    if format == OutputFormat::Cjs
        && options.interop
        && externals.iter().any(ExternalReference::uses_default)
        && in_use(cjs::INTEROP_HELPER_NAME, true)
    {
        captured.push(cjs::INTEROP_HELPER_NAME.to_string());
    }

    captured
}

/// Everything a format module needs to render one bundle
pub(crate) struct RenderContext<'r> {
    body: &'r ModuleBody,
    externals: &'r [ExternalReference],
    options: &'r RenderOptions,
    exports: Exports,
    indent: String,
}

impl<'r> RenderContext<'r> {
    fn new(
        body: &'r ModuleBody,
        externals: &'r [ExternalReference],
        options: &'r RenderOptions,
        exports: Exports,
    ) -> Self {
        let indent = options.indent.unit(body.code().lines());
        Self {
            body,
            externals,
            options,
            exports,
            indent,
        }
    }

    pub(crate) fn options(&self) -> &RenderOptions {
        self.options
    }

    pub(crate) fn externals(&self) -> &[ExternalReference] {
        self.externals
    }

    pub(crate) fn exports(&self) -> Exports {
        self.exports
    }

    pub(crate) fn body(&self) -> &ModuleBody {
        self.body
    }

    /// One level of indentation
    pub(crate) fn indent(&self) -> &str {
        &self.indent
    }

    /// Factory parameters, in external order
    pub(crate) fn args(&self) -> Vec<String> {
        self.externals.iter().map(|e| e.name.clone()).collect()
    }

    /// Quoted module path for `require`, `define` and `import`
    pub(crate) fn quoted_path(&self, external: &ExternalReference) -> String {
        let path = self
            .options
            .paths
            .get(&external.id)
            .unwrap_or(&external.id);
        single_quoted(path)
    }

    /// Global variable names holding each external for script-tag loading
    pub(crate) fn global_names(&self) -> Vec<String> {
        self.externals
            .iter()
            .map(|external| match self.options.globals.get(&external.id) {
                Some(global) => global.clone(),
                None => {
                    tracing::warn!(
                        code = "MISSING_GLOBAL_NAME",
                        "No name was provided for external module '{}' in globals, guessing '{}'",
                        external.id,
                        external.name
                    );
                    external.name.clone()
                }
            })
            .collect()
    }

    /// Bundle name, required whenever the bundle has exports
    pub(crate) fn required_name(&self, format: OutputFormat) -> Result<Option<&'r str>> {
        let name = self.options.name.as_deref();
        if let Some(name) = name.filter(|name| name.split('.').any(str::is_empty)) {
            return Err(RenderError::invalid_option(
                "name",
                format!("'{}' is not a valid name or dotted path", name),
            ));
        }
        match (self.exports, name) {
            (Exports::None, Some(name)) => {
                tracing::debug!(name, "bundle has no exports, name is not assigned");
                Ok(None)
            }
            (Exports::None, None) => Ok(None),
            (_, Some(name)) => Ok(Some(name)),
            (_, None) => Err(RenderError::invalid_option(
                "name",
                format!(
                    "{} bundles with exports need a name to expose them under",
                    format.as_str().to_uppercase()
                ),
            )),
        }
    }

    /// `'use strict'` directive on the wrapper line, with a leading space
    pub(crate) fn inline_use_strict(&self) -> &'static str {
        if self.options.strict {
            " 'use strict';"
        } else {
            ""
        }
    }

    pub(crate) fn intro(&self) -> Option<String> {
        non_empty(self.options.intro.as_deref())
    }

    pub(crate) fn outro(&self) -> Option<String> {
        non_empty(self.options.outro.as_deref())
    }

    /// `__esModule` marker for named-export bundles
    pub(crate) fn es_module_marker(&self) -> Option<String> {
        (self.exports == Exports::Named && self.options.es_module)
            .then(|| "Object.defineProperty(exports, '__esModule', { value: true });".to_string())
    }

    /// Default-export normalisation for externals loaded as plain values
    pub(crate) fn interop_block(&self) -> Option<String> {
        let lines: Vec<String> = self
            .externals
            .iter()
            .filter_map(|external| {
                let name = &external.name;
                match (external.kind, self.options.interop) {
                    (ImportKind::Namespace, _) | (ImportKind::Default, false) => None,
                    (ImportKind::Default, true) => Some(format!(
                        "{name} = {name} && {name}.hasOwnProperty('default') ? {name}['default'] : {name};"
                    )),
                    (ImportKind::NamespaceAndDefault, true) => Some(format!(
                        "var {name}__default = 'default' in {name} ? {name}['default'] : {name};"
                    )),
                    (ImportKind::NamespaceAndDefault, false) => {
                        Some(format!("var {name}__default = {name}['default'];"))
                    }
                }
            })
            .collect();
        (!lines.is_empty()).then(|| lines.join("\n"))
    }

    /// Export statements; `mechanism` introduces the default export
    /// (`return`, `module.exports =`)
    pub(crate) fn export_block(&self, mechanism: &str) -> Option<String> {
        match self.exports {
            Exports::None => None,
            Exports::Default => self
                .body
                .exports()
                .first()
                .map(|export| format!("{} {};", mechanism, export.local)),
            Exports::Named => {
                let lines: Vec<String> = self
                    .body
                    .exports()
                    .iter()
                    .map(|export| {
                        format!("{} = {};", keypath("exports", &export.exported), export.local)
                    })
                    .collect();
                (!lines.is_empty()).then(|| lines.join("\n"))
            }
        }
    }

    /// The trimmed body between `prefix` and `suffix` blocks, blank-line
    /// separated, indented `depth` levels
    pub(crate) fn indented_body(&self, prefix: &[String], suffix: &[String], depth: usize) -> String {
        let block = text::compose(prefix, self.body, suffix);
        text::indent(&block, &self.indent.repeat(depth))
    }

    /// Append the indented body to a wrapper opened with a blank line, then
    /// the blank line that separates it from what follows. An empty body
    /// leaves the opening blank line as the only one.
    pub(crate) fn push_body(&self, out: &mut String, prefix: &[String], suffix: &[String], depth: usize) {
        let body = self.indented_body(prefix, suffix, depth);
        if !body.is_empty() {
            out.push_str(&body);
            out.push_str("\n\n");
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Apply banner and footer; the output ends with exactly one newline, using
/// the body's line ending throughout.
fn finish(code: String, options: &RenderOptions, line_ending: &str) -> String {
    let mut out = String::with_capacity(code.len() + 1);
    if let Some(banner) = non_empty(options.banner.as_deref()) {
        out.push_str(&banner);
        out.push('\n');
    }
    out.push_str(code.trim_end());
    if let Some(footer) = non_empty(options.footer.as_deref()) {
        out.push('\n');
        out.push_str(&footer);
    }
    out.push('\n');
    if line_ending != "\n" {
        out = out.replace("\r\n", "\n").replace('\n', line_ending);
    }
    out
}

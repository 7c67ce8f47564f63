//! SystemJS `System.register`
//!
//! Externals arrive through setters; the body runs inside `execute` and
//! publishes bindings through the injected `exports` function.

use super::{Exports, RenderContext};
use crate::error::Result;
use crate::external::{ExternalReference, ImportKind};
use crate::identifier::single_quoted;

pub(super) fn render(ctx: &RenderContext<'_>) -> Result<String> {
    let options = ctx.options();
    let externals = ctx.externals();
    let t = ctx.indent();

    let deps: Vec<String> = externals.iter().map(|e| ctx.quoted_path(e)).collect();
    let registered = options
        .name
        .as_deref()
        .map(|name| format!("{}, ", single_quoted(name)))
        .unwrap_or_default();

    let mut out = format!(
        "System.register({registered}[{}], function (exports, module) {{\n",
        deps.join(", ")
    );
    if options.strict {
        out.push_str(&format!("{t}'use strict';\n"));
    }

    let bindings: Vec<String> = externals
        .iter()
        .flat_map(ExternalReference::bindings)
        .collect();
    if !bindings.is_empty() {
        out.push_str(&format!("{t}var {};\n", bindings.join(", ")));
    }

    out.push_str(&format!("{t}return {{\n"));
    if !externals.is_empty() {
        let setters: Vec<String> = externals
            .iter()
            .map(|external| {
                let lines: Vec<String> = setter_lines(external)
                    .iter()
                    .map(|line| format!("{t}{t}{t}{line}"))
                    .collect();
                format!("function (module) {{\n{}\n{t}{t}}}", lines.join("\n"))
            })
            .collect();
        out.push_str(&format!("{t}{t}setters: [{}],\n", setters.join(", ")));
    }
    out.push_str(&format!("{t}{t}execute: function () {{\n\n"));

    let mut prefix = Vec::new();
    prefix.extend(ctx.intro());

    let mut suffix = Vec::new();
    suffix.extend(export_calls(ctx));
    suffix.extend(ctx.outro());

    ctx.push_body(&mut out, &prefix, &suffix, 3);
    out.push_str(&format!("{t}{t}}}\n{t}}};\n}});"));

    Ok(out)
}

fn setter_lines(external: &ExternalReference) -> Vec<String> {
    let name = &external.name;
    match external.kind {
        ImportKind::Namespace => vec![format!("{name} = module;")],
        ImportKind::Default => vec![format!("{name} = module['default'];")],
        ImportKind::NamespaceAndDefault => vec![
            format!("{name} = module;"),
            format!("{name}__default = module['default'];"),
        ],
    }
}

fn export_calls(ctx: &RenderContext<'_>) -> Option<String> {
    if ctx.exports() == Exports::None {
        return None;
    }
    let calls: Vec<String> = ctx
        .body()
        .exports()
        .iter()
        .map(|export| {
            format!(
                "exports({}, {});",
                single_quoted(&export.exported),
                export.local
            )
        })
        .collect();
    (!calls.is_empty()).then(|| calls.join("\n"))
}

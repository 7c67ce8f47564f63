//! Immediately invoked function expression for `<script>` tags

use super::{Exports, RenderContext};
use crate::error::{RenderError, Result};
use crate::identifier::{is_valid_identifier, keypath};
use crate::output::OutputFormat;

pub(super) fn render(ctx: &RenderContext<'_>) -> Result<String> {
    let options = ctx.options();
    let exports = ctx.exports();
    let name = ctx.required_name(OutputFormat::Iife)?;
    let t = ctx.indent();

    let namespaced = name.is_some_and(|name| name.contains('.'));
    let extend = options.extend && exports == Exports::Named;

    let illegal = name.filter(|name| !extend && !namespaced && !is_valid_identifier(name));
    if let Some(name) = illegal {
        return Err(RenderError::invalid_option(
            "name",
            format!(
                "Given name ({}) is not a legal JS identifier. If you need this you can try extend: true",
                name
            ),
        ));
    }

    let mut deps = ctx.global_names();
    let mut args = ctx.args();
    if exports == Exports::Named {
        let target = match name {
            Some(name) if extend => format!("({0} = {0} || {{}})", keypath("this", name)),
            _ => "{}".to_string(),
        };
        deps.insert(0, target);
        args.insert(0, "exports".to_string());
    }

    let mut out = String::new();
    if let Some(name) = name {
        let segments: Vec<&str> = name.split('.').collect();
        if segments.len() > 1 {
            for depth in 1..segments.len() {
                let parent = keypath("this", &segments[..depth].join("."));
                out.push_str(&format!("{0} = {0} || {{}};\n", parent));
            }
        }
        if !extend {
            if namespaced {
                out.push_str(&format!("{} = ", keypath("this", name)));
            } else {
                out.push_str(&format!("var {} = ", name));
            }
        }
    }

    out.push_str(&format!("(function ({}) {{\n", args.join(", ")));
    if options.strict {
        out.push_str(&format!("{t}'use strict';\n\n"));
    }

    let mut prefix = Vec::new();
    prefix.extend(ctx.intro());
    prefix.extend(ctx.interop_block());

    let mut suffix = Vec::new();
    suffix.extend(ctx.export_block("return"));
    suffix.extend(ctx.outro());

    ctx.push_body(&mut out, &prefix, &suffix, 1);
    if exports == Exports::Named && !extend {
        out.push_str(&format!("{t}return exports;\n\n"));
    }
    out.push_str(&format!("}}({}));", deps.join(", ")));

    Ok(out)
}

//! Universal Module Definition
//!
//! One factory, three loaders probed in order: CommonJS (`exports`/`module`),
//! AMD (`define.amd`), then script-tag globals on `this`.

use super::{Exports, RenderContext};
use crate::error::Result;
use crate::identifier::{keypath, setup_namespace, single_quoted};
use crate::output::OutputFormat;

pub(super) fn render(ctx: &RenderContext<'_>) -> Result<String> {
    let options = ctx.options();
    let exports = ctx.exports();
    let name = ctx.required_name(OutputFormat::Umd)?;
    let t = ctx.indent();

    let externals = ctx.externals();
    let external_globals: Vec<String> = ctx
        .global_names()
        .iter()
        .map(|global| keypath("global", global))
        .collect();

    let mut amd_deps: Vec<String> = externals.iter().map(|e| ctx.quoted_path(e)).collect();
    let mut cjs_deps: Vec<String> = externals
        .iter()
        .map(|e| format!("require({})", ctx.quoted_path(e)))
        .collect();
    let mut global_deps = external_globals.clone();
    let mut args = ctx.args();

    if let (Exports::Named, Some(name)) = (exports, name) {
        let initial = if options.extend {
            format!("{} || {{}}", keypath("global", name))
        } else {
            "{}".to_string()
        };
        amd_deps.insert(0, "'exports'".to_string());
        cjs_deps.insert(0, "exports".to_string());
        global_deps.insert(0, format!("({} = {})", setup_namespace("global", name), initial));
        args.insert(0, "exports".to_string());
    }

    let define = options.amd.define.as_deref().unwrap_or("define");
    let mut amd_params = String::new();
    if let Some(id) = &options.amd.id {
        amd_params.push_str(&single_quoted(id));
        amd_params.push_str(", ");
    }
    if !amd_deps.is_empty() {
        amd_params.push_str(&format!("[{}], ", amd_deps.join(", ")));
    }

    let cjs_export = if exports == Exports::Default {
        "module.exports = "
    } else {
        ""
    };

    let global_export = match name {
        Some(name) if options.no_conflict => no_conflict(t, name, exports, &external_globals),
        Some(name) if exports == Exports::Default => format!(
            "({} = factory({}))",
            setup_namespace("global", name),
            global_deps.join(", ")
        ),
        _ => format!("(factory({}))", global_deps.join(", ")),
    };

    let mut prefix = Vec::new();
    prefix.extend(ctx.intro());
    prefix.extend(ctx.interop_block());

    let mut suffix = Vec::new();
    suffix.extend(ctx.export_block("return"));
    suffix.extend(ctx.es_module_marker());
    suffix.extend(ctx.outro());

    let mut out = format!(
        "(function (global, factory) {{\n\
         {t}typeof exports === 'object' && typeof module !== 'undefined' ? {cjs_export}factory({cjs}) :\n\
         {t}typeof {define} === 'function' && {define}.amd ? {define}({amd_params}factory) :\n\
         {t}{global_export};\n\
         }}(this, (function ({args}) {{{use_strict}\n\n",
        cjs = cjs_deps.join(", "),
        args = args.join(", "),
        use_strict = ctx.inline_use_strict(),
    );
    ctx.push_body(&mut out, &prefix, &suffix, 1);
    out.push_str("})));");

    Ok(out)
}

/// Global fallback that remembers the previous value of the global and
/// exposes `noConflict()` to restore it
fn no_conflict(t: &str, name: &str, exports: Exports, external_globals: &[String]) -> String {
    let current = keypath("global", name);
    let create = match exports {
        Exports::Named => {
            let mut args = vec!["exports".to_string()];
            args.extend(external_globals.iter().cloned());
            format!(
                "{t}{t}var exports = {{}};\n{t}{t}factory({});\n",
                args.join(", ")
            )
        }
        Exports::Default | Exports::None => format!(
            "{t}{t}var exports = factory({});\n",
            external_globals.join(", ")
        ),
    };

    format!(
        "(function () {{\n\
         {t}{t}var current = {current};\n\
         {create}\
         {t}{t}{target} = exports;\n\
         {t}{t}exports.noConflict = function () {{ {current} = current; return exports; }};\n\
         {t}}}())",
        target = setup_namespace("global", name),
    )
}

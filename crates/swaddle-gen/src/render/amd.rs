use super::{Exports, RenderContext};
use crate::error::Result;
use crate::identifier::single_quoted;

pub(super) fn render(ctx: &RenderContext<'_>) -> Result<String> {
    let options = ctx.options();

    let mut deps: Vec<String> = ctx.externals().iter().map(|e| ctx.quoted_path(e)).collect();
    let mut args = ctx.args();
    if ctx.exports() == Exports::Named {
        deps.insert(0, "'exports'".to_string());
        args.insert(0, "exports".to_string());
    }

    let mut params = String::new();
    if let Some(id) = &options.amd.id {
        params.push_str(&single_quoted(id));
        params.push_str(", ");
    }
    if !deps.is_empty() {
        params.push_str(&format!("[{}], ", deps.join(", ")));
    }

    let mut prefix = Vec::new();
    prefix.extend(ctx.intro());
    prefix.extend(ctx.interop_block());

    let mut suffix = Vec::new();
    suffix.extend(ctx.export_block("return"));
    suffix.extend(ctx.es_module_marker());
    suffix.extend(ctx.outro());

    let define = options.amd.define.as_deref().unwrap_or("define");
    let mut out = format!(
        "{define}({params}function ({}) {{{}\n\n",
        args.join(", "),
        ctx.inline_use_strict()
    );
    ctx.push_body(&mut out, &prefix, &suffix, 1);
    out.push_str("});");

    Ok(out)
}

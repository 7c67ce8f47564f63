//! CommonJS: `require` calls up front, `module.exports` at the end

use super::RenderContext;
use crate::error::Result;
use crate::external::ImportKind;

/// Helper unwrapping the default export of a required module
pub(crate) const INTEROP_HELPER_NAME: &str = "_interopDefault";

const INTEROP_HELPER: &str = "function _interopDefault (ex) { return (ex && (typeof ex === 'object') && 'default' in ex) ? ex['default'] : ex; }";

pub(super) fn render(ctx: &RenderContext<'_>) -> Result<String> {
    let options = ctx.options();
    let interop = options.interop;

    let mut needs_helper = false;
    let mut imports = Vec::new();
    for external in ctx.externals() {
        let name = &external.name;
        let required = format!("require({})", ctx.quoted_path(external));
        match (external.kind, interop) {
            (ImportKind::Namespace, _) => imports.push(format!("var {name} = {required};")),
            (ImportKind::Default, true) => {
                needs_helper = true;
                imports.push(format!("var {name} = {INTEROP_HELPER_NAME}({required});"));
            }
            (ImportKind::Default, false) => {
                imports.push(format!("var {name} = {required}['default'];"))
            }
            (ImportKind::NamespaceAndDefault, true) => {
                needs_helper = true;
                imports.push(format!("var {name} = {required};"));
                imports.push(format!("var {name}__default = {INTEROP_HELPER_NAME}({name});"));
            }
            (ImportKind::NamespaceAndDefault, false) => {
                imports.push(format!("var {name} = {required};"));
                imports.push(format!("var {name}__default = {name}['default'];"));
            }
        }
    }

    let mut prefix = Vec::new();
    if options.strict {
        prefix.push("'use strict';".to_string());
    }
    prefix.extend(ctx.intro());
    prefix.extend(ctx.es_module_marker());
    if needs_helper {
        prefix.push(INTEROP_HELPER.to_string());
    }
    if !imports.is_empty() {
        prefix.push(imports.join("\n"));
    }

    let mut suffix = Vec::new();
    suffix.extend(ctx.export_block("module.exports ="));
    suffix.extend(ctx.outro());

    Ok(ctx.indented_body(&prefix, &suffix, 0))
}

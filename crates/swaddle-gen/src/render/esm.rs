use super::{Exports, RenderContext};
use crate::error::Result;
use crate::external::ImportKind;
use crate::identifier::{is_valid_identifier, single_quoted};

pub(super) fn render(ctx: &RenderContext<'_>) -> Result<String> {
    let imports: Vec<String> = ctx
        .externals()
        .iter()
        .flat_map(|external| {
            let name = &external.name;
            let path = ctx.quoted_path(external);
            match external.kind {
                ImportKind::Namespace => vec![format!("import * as {name} from {path};")],
                ImportKind::Default => vec![format!("import {name} from {path};")],
                ImportKind::NamespaceAndDefault => vec![
                    format!("import * as {name} from {path};"),
                    format!("import {name}__default from {path};"),
                ],
            }
        })
        .collect();

    let mut prefix = Vec::new();
    prefix.extend(ctx.intro());
    if !imports.is_empty() {
        prefix.push(imports.join("\n"));
    }

    let mut suffix = Vec::new();
    suffix.extend(export_statements(ctx));
    suffix.extend(ctx.outro());

    Ok(ctx.indented_body(&prefix, &suffix, 0))
}

fn export_statements(ctx: &RenderContext<'_>) -> Option<String> {
    if ctx.exports() == Exports::None {
        return None;
    }

    let mut specifiers = Vec::new();
    let mut default = None;
    for export in ctx.body().exports() {
        if export.exported == "default" {
            default = Some(format!("export default {};", export.local));
        } else if export.exported == export.local {
            specifiers.push(export.local.clone());
        } else if is_valid_identifier(&export.exported) {
            specifiers.push(format!("{} as {}", export.local, export.exported));
        } else {
            specifiers.push(format!("{} as {}", export.local, single_quoted(&export.exported)));
        }
    }

    let mut lines = Vec::new();
    if !specifiers.is_empty() {
        lines.push(format!("export {{ {} }};", specifiers.join(", ")));
    }
    lines.extend(default);
    (!lines.is_empty()).then(|| lines.join("\n"))
}

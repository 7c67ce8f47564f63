//! Body composition and indentation

use crate::body::ModuleBody;
use std::ops::Range;

/// Text with byte ranges that must be emitted verbatim
pub(crate) struct Block {
    pub(crate) text: String,
    pub(crate) verbatim: Vec<Range<usize>>,
}

/// Join `prefix` blocks, the trimmed body and `suffix` blocks with blank lines.
pub(crate) fn compose(prefix: &[String], body: &ModuleBody, suffix: &[String]) -> Block {
    let code = body.code();
    let trimmed = code.trim();
    let leading = code.len() - code.trim_start().len();

    let mut text = String::with_capacity(code.len() + 64);
    let mut verbatim = Vec::new();

    let push_part = |text: &mut String, part: &str| {
        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(part);
    };

    for block in prefix {
        push_part(&mut text, block);
    }

    if !trimmed.is_empty() {
        push_part(&mut text, "");
        let shift = text.len();
        text.push_str(trimmed);
        verbatim.extend(
            body.multiline_literals()
                .iter()
                .map(|range| range.start - leading + shift..range.end - leading + shift),
        );
    }

    for block in suffix {
        push_part(&mut text, block);
    }

    Block { text, verbatim }
}

/// Prefix every non-empty line with `unit`, except lines that start inside a
/// verbatim range.
pub(crate) fn indent(block: &Block, unit: &str) -> String {
    if unit.is_empty() {
        return block.text.clone();
    }

    let mut out = String::with_capacity(block.text.len() + block.text.len() / 8);
    let mut line_start = true;

    for (offset, ch) in block.text.char_indices() {
        if line_start && ch != '\n' && ch != '\r' && !inside(&block.verbatim, offset) {
            out.push_str(unit);
        }
        out.push(ch);
        line_start = ch == '\n';
    }

    out
}

fn inside(ranges: &[Range<usize>], offset: usize) -> bool {
    ranges
        .iter()
        .any(|range| range.start < offset && offset < range.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> Block {
        Block {
            text: text.to_string(),
            verbatim: Vec::new(),
        }
    }

    #[test]
    fn indents_non_empty_lines() {
        assert_eq!(indent(&block("a();\n\nb();"), "\t"), "\ta();\n\n\tb();");
    }

    #[test]
    fn empty_unit_is_identity() {
        assert_eq!(indent(&block("a();\n  b();"), ""), "a();\n  b();");
    }

    #[test]
    fn compose_separates_blocks_with_blank_lines() {
        let body = ModuleBody::parse("\n\nrun();\nfunction run() {}\n").unwrap();
        let composed = compose(
            &["var x = 1;".to_string()],
            &body,
            &["return run;".to_string()],
        );
        assert_eq!(
            composed.text,
            "var x = 1;\n\nrun();\nfunction run() {}\n\nreturn run;"
        );
    }

    #[test]
    fn compose_empty_body_yields_empty_block() {
        let body = ModuleBody::parse("\n\n").unwrap();
        assert_eq!(compose(&[], &body, &[]).text, "");
    }

    #[test]
    fn string_continuation_lines_stay_verbatim() {
        let body = ModuleBody::parse("const s = 'a\\\nb';\nconsole.log(s);").unwrap();
        let composed = compose(&[], &body, &[]);
        assert_eq!(
            indent(&composed, "\t"),
            "\tconst s = 'a\\\nb';\n\tconsole.log(s);"
        );
    }

    #[test]
    fn template_lines_stay_verbatim() {
        let body = ModuleBody::parse("const html = `<ul>\n  <li>one</li>\n</ul>`;").unwrap();
        let composed = compose(&["'use strict';".to_string()], &body, &[]);
        assert_eq!(
            indent(&composed, "  "),
            "  'use strict';\n\n  const html = `<ul>\n  <li>one</li>\n</ul>`;"
        );
    }
}

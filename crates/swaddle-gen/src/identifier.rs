//! JavaScript identifier checks and property-path rendering

/// Reserved words that can't be used as bindings or unquoted properties
const RESERVED: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
    "let",
    "static",
    "enum",
    "await",
    "implements",
    "interface",
    "package",
    "private",
    "protected",
    "public",
];

/// Check if a string is a valid JavaScript identifier
///
/// Valid identifiers start with a letter, `$` or `_`, continue with letters,
/// digits, `$` or `_`, and are not reserved words.
pub fn is_valid_identifier(name: &str) -> bool {
    if name.is_empty() || RESERVED.contains(&name) {
        return false;
    }

    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '$' || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_alphanumeric() || c == '$' || c == '_')
}

/// Escape a string for a double-quoted JavaScript string literal
pub(crate) fn escape_double(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 2);

    for ch in text.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\u{2028}' => result.push_str("\\u2028"),
            '\u{2029}' => result.push_str("\\u2029"),
            ch if ch.is_control() => result.push_str(&format!("\\u{:04x}", ch as u32)),
            _ => result.push(ch),
        }
    }

    result
}

/// Render a single-quoted string literal (module paths, export names)
pub(crate) fn single_quoted(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 2);
    result.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            _ => result.push(ch),
        }
    }
    result.push('\'');
    result
}

/// Property access for one key: `.key`, or `["key"]` when `key` is not a legal identifier
pub(crate) fn property(key: &str) -> String {
    if is_valid_identifier(key) {
        format!(".{}", key)
    } else {
        format!("[\"{}\"]", escape_double(key))
    }
}

/// Property path below `root` for a dotted name: `global.a.b`, `global["my-lib"]`
pub(crate) fn keypath(root: &str, name: &str) -> String {
    let mut path = root.to_string();
    for segment in name.split('.') {
        path.push_str(&property(segment));
    }
    path
}

/// Assignments creating the parent objects of a dotted name, followed by the
/// full path itself: `global.a = global.a || {}, global.a.b`
pub(crate) fn setup_namespace(root: &str, name: &str) -> String {
    let segments: Vec<&str> = name.split('.').collect();
    let mut parts = Vec::with_capacity(segments.len());
    let mut acc = root.to_string();
    for segment in &segments[..segments.len() - 1] {
        acc.push_str(&property(segment));
        parts.push(format!("{0} = {0} || {{}}", acc));
    }
    parts.push(keypath(root, name));
    parts.join(", ")
}

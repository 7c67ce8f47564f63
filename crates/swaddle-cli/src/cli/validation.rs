use swaddle_gen::{ExternalReference, ImportKind, is_valid_identifier};

/// Parse an external module declaration: `ID=NAME[:KIND]`.
///
/// `KIND` is `namespace` (the default), `default` or `namespace-and-default`.
/// The id may itself contain `:` (`node:fs=fs`), so the binding is split off
/// at the last `=`.
///
/// # Errors
///
/// Returns an error message if either side is missing, the binding is not a
/// legal identifier, or the kind is unknown.
pub fn parse_external(s: &str) -> Result<ExternalReference, String> {
    let (id, binding) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("Expected ID=NAME[:KIND], got '{}'", s))?;

    if id.is_empty() {
        return Err(format!("External module id cannot be empty: '{}'", s));
    }

    let (name, kind) = match binding.split_once(':') {
        Some((name, kind)) => (name, parse_kind(kind)?),
        None => (binding, ImportKind::Namespace),
    };

    if !is_valid_identifier(name) {
        return Err(format!(
            "External binding must be a legal JavaScript identifier: '{}'",
            name
        ));
    }

    Ok(ExternalReference {
        id: id.to_string(),
        name: name.to_string(),
        kind,
    })
}

fn parse_kind(kind: &str) -> Result<ImportKind, String> {
    match kind {
        "namespace" | "ns" => Ok(ImportKind::Namespace),
        "default" => Ok(ImportKind::Default),
        "namespace-and-default" | "both" => Ok(ImportKind::NamespaceAndDefault),
        other => Err(format!(
            "Unknown import kind '{}' (expected namespace, default or namespace-and-default)",
            other
        )),
    }
}

/// Parse a `KEY=VALUE` pair used by `--global` and `--path`.
///
/// # Errors
///
/// Returns an error message if the `=` or either side is missing.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => {
            Ok((key.to_string(), value.to_string()))
        }
        _ => Err(format!("Expected KEY=VALUE, got '{}'", s)),
    }
}

/// Parse an export declaration: `EXPORTED=LOCAL`.
///
/// The exported name may be any string (ESM allows quoted names), the local
/// must be an identifier.
pub fn parse_export(s: &str) -> Result<(String, String), String> {
    let (exported, local) = parse_key_value(s)?;
    if !is_valid_identifier(&local) {
        return Err(format!(
            "Exported binding must be a legal JavaScript identifier: '{}'",
            local
        ));
    }
    Ok((exported, local))
}

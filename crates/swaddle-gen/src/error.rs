//! Error types for wrapper rendering

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while analysing a module body or rendering a wrapper
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The module body could not be parsed, or is not a flattened body
    #[error("Failed to parse module body: {reason}")]
    #[diagnostic(
        code(swaddle::gen::parse),
        help("the body must be plain statements; imports and exports are declared separately")
    )]
    Parse { reason: String },

    /// The body and its external references disagree, or a binding would be
    /// captured by the wrapper. Always an upstream bug, never retried.
    #[error("Precondition violated: {message}{}", format_names(names))]
    #[diagnostic(code(swaddle::gen::precondition_violation))]
    PreconditionViolation { message: String, names: Vec<String> },

    /// A render option is missing or unusable for the requested format
    #[error("Invalid option `{option}`: {message}")]
    #[diagnostic(code(swaddle::gen::invalid_option))]
    InvalidOption {
        option: &'static str,
        message: String,
    },

    /// The requested export mode does not fit the body's exports
    #[error(
        "'{requested}' was specified for the exports option, but the module has the following exports: {}",
        if exports.is_empty() { "(none)".to_string() } else { exports.join(", ") }
    )]
    #[diagnostic(
        code(swaddle::gen::invalid_export_mode),
        help("use 'auto' to derive the export mode from the module's exports")
    )]
    InvalidExportMode {
        requested: &'static str,
        exports: Vec<String>,
    },
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        String::new()
    } else {
        format!(" ({})", names.join(", "))
    }
}

impl RenderError {
    /// Create a Parse error
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    /// Create a PreconditionViolation naming the offending identifiers
    pub fn precondition<I, S>(message: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::PreconditionViolation {
            message: message.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an InvalidOption error
    pub fn invalid_option(option: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            message: message.into(),
        }
    }

    /// True for errors caused by inconsistent input rather than options
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Self::PreconditionViolation { .. })
    }
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_message_lists_names() {
        let err = RenderError::precondition("undeclared free variables", ["React", "jQuery"]);
        assert_eq!(
            err.to_string(),
            "Precondition violated: undeclared free variables (React, jQuery)"
        );
        assert!(err.is_precondition_violation());
    }

    #[test]
    fn export_mode_message_without_exports() {
        let err = RenderError::InvalidExportMode {
            requested: "default",
            exports: Vec::new(),
        };
        assert!(err.to_string().ends_with("following exports: (none)"));
    }
}

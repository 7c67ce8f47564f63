//! Error types for configuration loading and validation.

use std::path::PathBuf;

use swaddle_gen::RenderError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    // Config parsing/loading errors
    #[error("config not found (looked for swaddle.toml and a \"swaddle\" field in package.json)")]
    NotFound,

    #[error("invalid config value for `{field}`{}", hint.as_ref().map(|h| format!(": {}", h)).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("unknown profile `{name}` (available: {})", if available.is_empty() { "none".to_string() } else { available.join(", ") })]
    UnknownProfile {
        name: String,
        available: Vec<String>,
    },

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    // Schema validation errors (no filesystem checks)
    #[error("no outputs configured")]
    NoOutputs,

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // The input body itself is unusable
    #[error(transparent)]
    Body(#[from] RenderError),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Optional fix-it hint, surfaced by the CLI as diagnostic help
    pub fn hint(&self) -> Option<&str> {
        match self {
            ConfigError::SchemaValidation { hint, .. } => hint.as_deref(),
            ConfigError::NotFound => Some("create a swaddle.toml or pass --config <path>"),
            ConfigError::NoOutputs => Some("add at least one [[output]] table with `file` and `format`"),
            _ => None,
        }
    }
}

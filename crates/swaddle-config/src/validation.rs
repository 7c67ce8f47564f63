//! Pluggable config validation strategies
//!
//! Schema validation needs no filesystem; the filesystem validator adds
//! checks for the CLI.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use swaddle_gen::is_valid_identifier;

use crate::config::SwaddleConfig;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &SwaddleConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use swaddle_config::{ConfigValidator, SchemaValidator, SwaddleConfig};
/// use serde_json::json;
///
/// let config = SwaddleConfig::from_value(json!({
///     "input": "dist/flat.js",
///     "output": [{ "file": "dist/lib.js", "format": "esm" }]
/// }))
/// .unwrap();
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &SwaddleConfig) -> Result<()> {
        if config.input.as_os_str().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "input path cannot be empty".to_string(),
                hint: Some("Point `input` at the flattened bundle body".to_string()),
            });
        }

        if config.output.is_empty() {
            return Err(ConfigError::NoOutputs);
        }

        let mut files = HashSet::new();
        for target in &config.output {
            if target.file.as_os_str().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "output file cannot be empty".to_string(),
                    hint: Some("Give every [[output]] a `file`".to_string()),
                });
            }
            if !files.insert(&target.file) {
                return Err(ConfigError::SchemaValidation {
                    message: format!("output file {} is listed twice", target.file.display()),
                    hint: None,
                });
            }
            // Surfaces unknown or mistyped render keys before any rendering starts
            config.render_options(target)?;
        }

        for external in &config.externals {
            if external.id.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "external module ids cannot be empty".to_string(),
                    hint: Some("Remove externals with an empty `id`".to_string()),
                });
            }
            if !is_valid_identifier(&external.name) {
                return Err(ConfigError::SchemaValidation {
                    message: format!(
                        "external `{}` has binding `{}`, which is not a legal identifier",
                        external.id, external.name
                    ),
                    hint: Some("Use the name the body refers to the module by".to_string()),
                });
            }
        }

        for (exported, local) in &config.exports {
            if exported.is_empty() || !is_valid_identifier(local) {
                return Err(ConfigError::SchemaValidation {
                    message: format!("invalid export `{}` = `{}`", exported, local),
                    hint: Some(
                        "Map each exported name to a top-level binding of the body".to_string(),
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs schema validation, then checks that the input body exists.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &SwaddleConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        let path = self.root.join(&config.input);
        if !path.is_file() {
            return Err(ConfigError::InputNotFound { path });
        }

        Ok(())
    }
}

/// Convenience: schema validation
pub fn validate_schema(config: &SwaddleConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience: schema plus filesystem validation relative to `root`
pub fn validate_fs(config: &SwaddleConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}

//! File-based config discovery for CLI use
//!
//! Finds and loads swaddle configuration files from the filesystem.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::SwaddleConfig;
use crate::error::{ConfigError, Result};

const CONFIG_FILE: &str = "swaddle.toml";
const PACKAGE_FIELD: &str = "swaddle";

/// File-based configuration discovery
///
/// Library users can build a [`SwaddleConfig`] with `from_value()` directly.
///
/// # Example
///
/// ```no_run
/// use swaddle_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. swaddle.toml
    /// 2. package.json with a non-null `swaddle` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let has_field = fs::read_to_string(&pkg_path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .is_some_and(|parsed| parsed.get(PACKAGE_FIELD).is_some_and(|v| !v.is_null()));
        has_field.then_some(pkg_path)
    }

    /// Load config from the discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<SwaddleConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        load_file(&path)
    }

    /// Load config and apply a profile
    pub fn load_with_profile(&self, profile: &str) -> Result<SwaddleConfig> {
        self.load()?.materialize_profile(Some(profile))
    }
}

/// Load config from an explicit file: `package.json` reads its `swaddle`
/// field, anything else is parsed as TOML.
pub fn load_file(path: &Path) -> Result<SwaddleConfig> {
    tracing::debug!(path = %path.display(), "loading config");

    if path.file_name() == Some(OsStr::new("package.json")) {
        return load_from_package_json(path);
    }

    let content = fs::read_to_string(path)?;

    let toml_val: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: Some(format!("Invalid TOML syntax: {}", e)),
    })?;

    let value = serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
        field: "toml".to_string(),
        hint: Some(format!("TOML to JSON conversion failed: {}", e)),
    })?;

    SwaddleConfig::from_value(value)
}

fn load_from_package_json(path: &Path) -> Result<SwaddleConfig> {
    let content = fs::read_to_string(path)?;

    let parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {}", e)),
    })?;

    match parsed.get(PACKAGE_FIELD) {
        None | Some(Value::Null) => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: Some("Add a non-null 'swaddle' field to your package.json".to_string()),
        }),
        Some(value) => SwaddleConfig::from_value(value.clone()),
    }
}

/// Discover and load config from the current directory
pub fn discover() -> Result<SwaddleConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

/// Discover and load config from the current directory with a profile
pub fn discover_with_profile(profile: &str) -> Result<SwaddleConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_with_profile(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn find_prefers_toml_over_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "swaddle": { "input": "a.js" } }"#).unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "input = \"b.js\"\n").unwrap();

        let found = ConfigDiscovery::new(dir.path()).find().unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE));
    }

    #[test]
    fn find_ignores_package_json_without_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app", "swaddle": null }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::NotFound));
    }

    #[test]
    fn invalid_toml_reports_syntax() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "input = ").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid TOML syntax"));
    }
}

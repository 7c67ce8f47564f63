//! Shared utilities for command implementations.

use std::fs;
use std::path::{Path, PathBuf};

use swaddle_config::{ConfigDiscovery, ConfigError, SwaddleConfig, load_file};

use crate::error::{CliError, Result};

/// Resolve a path relative to a working directory.
///
/// Absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        CliError::InvalidArgument(format!("Cannot determine current directory: {}", e))
    })
}

/// Load the project config with the requested profile applied.
///
/// Returns the config and the directory its relative paths resolve
/// against: the config file's directory when `config` is given, the working
/// directory otherwise.
pub fn load_project(
    config: Option<&Path>,
    profile: Option<&str>,
    cwd: Option<&Path>,
) -> Result<(SwaddleConfig, PathBuf)> {
    let cwd = match cwd {
        Some(dir) => dir.to_path_buf(),
        None => get_cwd()?,
    };

    let (loaded, root) = match config {
        Some(path) => {
            let path = resolve_path(path, &cwd);
            if !path.is_file() {
                return Err(CliError::FileNotFound(path));
            }
            let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
            (load_file(&path)?, root)
        }
        None => (ConfigDiscovery::new(&cwd).load()?, cwd),
    };

    let config = loaded.materialize_profile(profile)?;
    Ok((config, root))
}

/// Write rendered code, creating parent directories as needed.
pub fn write_output(path: &Path, code: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, code)?;
    Ok(())
}

/// Read a config file for its shared `[render]` table only.
pub fn shared_render_table(path: &Path) -> Result<serde_json::Value> {
    if !path.is_file() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    let config = load_file(path)?;
    match config.render {
        serde_json::Value::Null => Ok(serde_json::Value::Object(Default::default())),
        table @ serde_json::Value::Object(_) => Ok(table),
        _ => Err(ConfigError::InvalidValue {
            field: "render".to_string(),
            hint: Some("`render` must be a table".to_string()),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_path_relative() {
        let cwd = Path::new("/project");
        assert_eq!(resolve_path(Path::new("dist/flat.js"), cwd), PathBuf::from("/project/dist/flat.js"));
        assert_eq!(resolve_path(Path::new("/abs/flat.js"), cwd), PathBuf::from("/abs/flat.js"));
    }

    #[test]
    fn test_write_output_creates_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dist/nested/lib.js");
        write_output(&path, "x;\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "x;\n");
    }

    #[test]
    fn test_load_project_resolves_against_config_dir() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("pkg");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(
            pkg.join("lib.toml"),
            "input = \"flat.js\"\n\n[[output]]\nfile = \"lib.js\"\nformat = \"esm\"\n",
        )
        .unwrap();

        let (config, root) =
            load_project(Some(Path::new("pkg/lib.toml")), None, Some(temp.path())).unwrap();
        assert_eq!(root, pkg);
        assert_eq!(config.output.len(), 1);
    }

    #[test]
    fn test_load_project_missing_config_file() {
        let temp = TempDir::new().unwrap();
        let err = load_project(Some(Path::new("nope.toml")), None, Some(temp.path())).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_shared_render_table_defaults_to_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("swaddle.toml");
        fs::write(&path, "input = \"flat.js\"\n").unwrap();
        assert_eq!(shared_render_table(&path).unwrap(), serde_json::json!({}));
    }
}

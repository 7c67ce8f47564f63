//! Typed swaddle configuration and profile merging.
//!
//! A config names one flattened input body, the externals it reads, its
//! exports and a list of output targets. Shared render options live in the
//! `render` table; each `[[output]]` table may override any of them.
//! For file discovery, see the `discovery` module.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use swaddle_gen::{ExternalReference, ModuleBody, OutputFormat, RenderOptions};

use crate::error::{ConfigError, Result as ConfigResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwaddleConfig {
    /// Flattened, tree-shaken module body to wrap
    pub input: PathBuf,

    /// Exported name -> top-level binding of the body
    #[serde(default)]
    pub exports: IndexMap<String, String>,

    /// Free variables the host page supplies itself
    #[serde(default)]
    pub assume_globals: Vec<String>,

    #[serde(default)]
    pub externals: Vec<ExternalReference>,

    /// Render options shared by every output
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub render: Value,

    #[serde(default)]
    pub output: Vec<OutputTarget>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub profiles: IndexMap<String, Value>,
}

/// One file to write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputTarget {
    pub file: PathBuf,
    pub format: OutputFormat,

    /// Per-output overrides of the shared render options
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl SwaddleConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use swaddle_config::SwaddleConfig;
    /// use serde_json::json;
    ///
    /// let config = SwaddleConfig::from_value(json!({
    ///     "input": "dist/flat.js",
    ///     "externals": [{ "id": "lodash", "name": "_" }],
    ///     "output": [{ "file": "dist/lib.umd.js", "format": "umd", "name": "lib" }]
    /// }))
    /// .unwrap();
    /// assert_eq!(config.externals[0].name, "_");
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Apply the named profile on top of the base config.
    ///
    /// Tables merge key by key; arrays (`output`, `externals`) are replaced
    /// wholesale.
    pub fn materialize_profile(self, profile: Option<&str>) -> ConfigResult<Self> {
        let Some(name) = profile else {
            return Ok(self);
        };

        let Some(overrides) = self.profiles.get(name).cloned() else {
            return Err(ConfigError::UnknownProfile {
                name: name.to_string(),
                available: self.profiles.keys().cloned().collect(),
            });
        };

        if !overrides.is_object() {
            return Err(ConfigError::InvalidProfileOverride {
                message: format!("profile `{}` must be a table", name),
            });
        }

        let profiles = self.profiles.clone();
        let mut base = self.to_value()?;
        if let Value::Object(map) = &mut base {
            map.remove("profiles");
        }
        merge_values(&mut base, &overrides);

        let mut merged: SwaddleConfig =
            serde_json::from_value(base).map_err(|err| ConfigError::InvalidProfileOverride {
                message: err.to_string(),
            })?;
        merged.profiles = profiles;

        tracing::debug!(profile = name, "applied config profile");
        Ok(merged)
    }

    /// Render options for one output: the shared `render` table with the
    /// output's own keys merged over it
    pub fn render_options(&self, target: &OutputTarget) -> ConfigResult<RenderOptions> {
        let mut merged = match &self.render {
            Value::Null => Value::Object(Map::new()),
            shared => shared.clone(),
        };
        merge_values(&mut merged, &Value::Object(target.options.clone()));

        serde_json::from_value(merged).map_err(|e| ConfigError::InvalidValue {
            field: format!("output {}", target.file.display()),
            hint: Some(e.to_string()),
        })
    }

    /// Read and analyse the input body relative to `root`, with the
    /// configured exports and assumed globals applied
    pub fn module_body(&self, root: &Path) -> ConfigResult<ModuleBody> {
        let path = root.join(&self.input);
        let code = fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ConfigError::InputNotFound { path: path.clone() },
            _ => ConfigError::Io(err),
        })?;

        let mut body = ModuleBody::parse(code)?;
        for name in &self.assume_globals {
            body = body.assume_global(name);
        }
        for (exported, local) in &self.exports {
            body = body.with_export(exported, local);
        }
        Ok(body)
    }
}

pub(crate) fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

//! Schema and filesystem validation

use serde_json::json;
use std::fs;
use swaddle_config::{
    ConfigError, ConfigValidator, FsValidator, SchemaValidator, SwaddleConfig, validate_schema,
};
use tempfile::TempDir;

fn config(value: serde_json::Value) -> SwaddleConfig {
    SwaddleConfig::from_value(value).expect("config")
}

#[test]
fn minimal_config_is_valid() {
    let config = config(json!({
        "input": "flat.js",
        "output": [{ "file": "out.js", "format": "cjs" }]
    }));
    assert!(validate_schema(&config).is_ok());
}

#[test]
fn outputs_are_required() {
    let config = config(json!({ "input": "flat.js" }));
    assert!(matches!(
        SchemaValidator.validate(&config),
        Err(ConfigError::NoOutputs)
    ));
}

#[test]
fn duplicate_output_files_are_rejected() {
    let config = config(json!({
        "input": "flat.js",
        "output": [
            { "file": "out.js", "format": "cjs" },
            { "file": "out.js", "format": "esm" }
        ]
    }));
    let err = SchemaValidator.validate(&config).unwrap_err();
    assert!(err.to_string().contains("listed twice"));
}

#[test]
fn illegal_external_binding_is_rejected() {
    let config = config(json!({
        "input": "flat.js",
        "externals": [{ "id": "react-dom", "name": "react-dom" }],
        "output": [{ "file": "out.js", "format": "umd" }]
    }));
    assert!(matches!(
        SchemaValidator.validate(&config),
        Err(ConfigError::SchemaValidation { .. })
    ));
}

#[test]
fn mistyped_render_key_is_rejected() {
    let config = config(json!({
        "input": "flat.js",
        "output": [{ "file": "out.js", "format": "umd", "es_module": false }]
    }));
    assert!(matches!(
        SchemaValidator.validate(&config),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn fs_validator_requires_input_file() {
    let dir = TempDir::new().expect("tempdir");
    let config = config(json!({
        "input": "flat.js",
        "output": [{ "file": "out.js", "format": "cjs" }]
    }));

    let validator = FsValidator::new(dir.path());
    assert!(matches!(
        validator.validate(&config),
        Err(ConfigError::InputNotFound { .. })
    ));

    fs::write(dir.path().join("flat.js"), "console.log(1);\n").expect("write body");
    assert!(validator.validate(&config).is_ok());
}

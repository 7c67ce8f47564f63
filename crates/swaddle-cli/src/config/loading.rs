use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::Serialize;
use serde_json::{Map, Value};
use swaddle_gen::RenderOptions;

use crate::error::Result;

/// Prefix of the environment variables that override render options
pub const ENV_PREFIX: &str = "SWADDLE_";

/// Options read verbatim from the environment; `Env` would turn
/// `SWADDLE_AMD_ID=2024` into a number
const STRING_KEYS: &[&str] = &["name", "amd.id", "amd.define", "banner", "footer", "intro", "outro"];

/// Resolve the render options for one output.
///
/// Priority: `cli` > `SWADDLE_*` environment > `base` (config file) > defaults.
/// `cli` should hold only the options that were actually given on the
/// command line, keyed the way the config file spells them.
pub fn layer_render_options<T: Serialize>(base: &T, cli: Map<String, Value>) -> Result<RenderOptions> {
    let figment = Figment::new()
        .merge(Serialized::defaults(RenderOptions::default()))
        .merge(Serialized::defaults(base))
        .merge(env_provider())
        .merge(env_strings())
        .merge(Serialized::defaults(Value::Object(cli)));

    let options: RenderOptions = figment.extract()?;
    tracing::debug!(?options, "resolved render options");
    Ok(options)
}

fn env_provider() -> Env {
    // Mapped keys are already camelCase; lowercasing them would break `esModule`
    Env::prefixed(ENV_PREFIX)
        .filter_map(|key| {
            env_key(key.as_str())
                .filter(|key| !STRING_KEYS.contains(key))
                .map(Into::into)
        })
        .lowercase(false)
}

/// String-typed options, nested on their dotted key
fn env_strings() -> Serialized<Value> {
    let env = Env::prefixed(ENV_PREFIX)
        .filter_map(|key| {
            env_key(key.as_str())
                .filter(|key| STRING_KEYS.contains(key))
                .map(Into::into)
        })
        .lowercase(false);

    let mut values = Map::new();
    for (key, value) in env.iter() {
        match key.as_str().split_once('.') {
            Some((table, field)) => {
                let table = values
                    .entry(table)
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(table) = table {
                    table.insert(field.to_string(), Value::String(value));
                }
            }
            None => {
                values.insert(key.as_str().to_string(), Value::String(value));
            }
        }
    }
    Serialized::defaults(Value::Object(values))
}

/// Map an environment key (prefix stripped) to its config key.
///
/// Dotted results nest, so `SWADDLE_AMD_ID` sets `amd.id`. Unknown keys are
/// ignored.
pub fn env_key(key: &str) -> Option<&'static str> {
    let key = match key.to_ascii_lowercase().as_str() {
        "name" => "name",
        "exports" => "exports",
        "globals" => "globals",
        "paths" => "paths",
        "amd_id" => "amd.id",
        "amd_define" => "amd.define",
        "strict" => "strict",
        "interop" => "interop",
        "es_module" => "esModule",
        "extend" => "extend",
        "no_conflict" => "noConflict",
        "banner" => "banner",
        "footer" => "footer",
        "intro" => "intro",
        "outro" => "outro",
        "indent" => "indent",
        _ => return None,
    };
    Some(key)
}

use serde_json::{Map, Value, json};
use swaddle_gen::ExportMode;

use crate::cli::RenderArgs;

// CLI flags -> render option overrides. Only flags that were given appear in
// the map, so unset flags never mask the config file or the environment.
pub fn render_overrides(args: &RenderArgs) -> Map<String, Value> {
    let mut map = Map::new();

    let strings = [
        ("name", &args.name),
        ("banner", &args.banner),
        ("footer", &args.footer),
        ("intro", &args.intro),
        ("outro", &args.outro),
    ];
    for (key, value) in strings {
        if let Some(value) = value {
            map.insert(key.to_string(), json!(value));
        }
    }

    if let Some(mode) = args.export_mode {
        map.insert("exports".to_string(), json!(ExportMode::from(mode).as_str()));
    }

    if !args.globals.is_empty() {
        map.insert("globals".to_string(), pairs(&args.globals));
    }
    if !args.paths.is_empty() {
        map.insert("paths".to_string(), pairs(&args.paths));
    }

    let mut amd = Map::new();
    if let Some(id) = &args.amd_id {
        amd.insert("id".to_string(), json!(id));
    }
    if let Some(define) = &args.amd_define {
        amd.insert("define".to_string(), json!(define));
    }
    if !amd.is_empty() {
        map.insert("amd".to_string(), Value::Object(amd));
    }

    let switches = [
        ("strict", args.no_strict, false),
        ("interop", args.no_interop, false),
        ("esModule", args.no_es_module, false),
        ("extend", args.extend, true),
        ("noConflict", args.no_conflict, true),
    ];
    for (key, given, value) in switches {
        if given {
            map.insert(key.to_string(), json!(value));
        }
    }

    if let Some(indent) = args.indent {
        map.insert("indent".to_string(), json!(indent.to_string()));
    }

    map
}

fn pairs(entries: &[(String, String)]) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(key, value)| (key.clone(), json!(value)))
            .collect(),
    )
}

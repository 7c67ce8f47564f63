#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command, RenderArgs};
    use crate::config::{env_key, layer_render_options, render_overrides};
    use clap::Parser;
    use serde_json::{Map, json};
    use swaddle_gen::{ExportMode, IndentStyle, RenderOptions};

    fn render_args(extra: &[&str]) -> RenderArgs {
        let mut argv = vec!["swaddle", "render", "flat.js"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Render(args) => args,
            other => panic!("expected render, got {:?}", other),
        }
    }

    #[test]
    fn test_no_flags_means_no_overrides() {
        let args = render_args(&[]);
        assert!(render_overrides(&args).is_empty());
    }

    #[test]
    fn test_overrides_use_config_spelling() {
        let args = render_args(&[
            "--name",
            "Lib",
            "--no-es-module",
            "--no-conflict",
            "--amd-id",
            "lib",
            "--global",
            "lodash=_",
            "--exports",
            "named",
            "--indent",
            "2",
        ]);

        let map = render_overrides(&args);
        assert_eq!(map["name"], json!("Lib"));
        assert_eq!(map["esModule"], json!(false));
        assert_eq!(map["noConflict"], json!(true));
        assert_eq!(map["amd"], json!({ "id": "lib" }));
        assert_eq!(map["globals"], json!({ "lodash": "_" }));
        assert_eq!(map["exports"], json!("named"));
        assert_eq!(map["indent"], json!("2"));
        assert!(!map.contains_key("strict"));
    }

    #[test]
    fn test_defaults_fill_missing_options() {
        let options = layer_render_options(&json!({}), Map::new()).unwrap();
        assert_eq!(options, RenderOptions::default());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let base = json!({
            "name": "FromFile",
            "banner": "/* file */",
            "globals": { "react": "React" }
        });
        let args = render_args(&["--name", "FromCli", "--global", "lodash=_", "--no-strict"]);

        let options = layer_render_options(&base, render_overrides(&args)).unwrap();
        assert_eq!(options.name.as_deref(), Some("FromCli"));
        assert_eq!(options.banner.as_deref(), Some("/* file */"));
        assert_eq!(options.globals.get("react").map(String::as_str), Some("React"));
        assert_eq!(options.globals.get("lodash").map(String::as_str), Some("_"));
        assert!(!options.strict);
    }

    #[test]
    fn test_typed_base_survives_layering() {
        let base = RenderOptions::new()
            .name("Typed")
            .exports(ExportMode::Named)
            .indent(IndentStyle::Spaces(4))
            .amd_id("typed");

        let options = layer_render_options(&base, Map::new()).unwrap();
        assert_eq!(options, base);
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let err = layer_render_options(&json!({ "no_conflict": true }), Map::new());
        assert!(err.is_err());
    }

    #[test]
    fn test_env_keys_map_to_config_keys() {
        assert_eq!(env_key("banner"), Some("banner"));
        assert_eq!(env_key("ES_MODULE"), Some("esModule"));
        assert_eq!(env_key("no_conflict"), Some("noConflict"));
        assert_eq!(env_key("amd_id"), Some("amd.id"));
        assert_eq!(env_key("log"), None);
    }
}

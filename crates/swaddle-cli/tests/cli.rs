//! End-to-end tests for the `swaddle` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ANNOTATION_BODY: &str = include_str!("fixtures/body.js");
const ANNOTATION_UMD: &str = include_str!("fixtures/umd.js");

fn swaddle_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("swaddle"));
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().unwrap();
    for (path, content) in files {
        let path = temp.path().join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    temp
}

#[test]
fn test_help_lists_commands() {
    swaddle_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_render_annotation_fixture_to_stdout() {
    let temp = project(&[("body.js", ANNOTATION_BODY)]);

    swaddle_cmd()
        .current_dir(temp.path())
        .args(["render", "body.js"])
        .assert()
        .success()
        .stdout(ANNOTATION_UMD);
}

#[test]
fn test_render_cjs_with_external_and_export() {
    let temp = project(&[("flat.js", "var doubled = _.map([1, 2], x => x * 2);\n")]);

    swaddle_cmd()
        .current_dir(temp.path())
        .args([
            "render", "flat.js", "-f", "cjs", "-e", "lodash=_", "--export", "doubled=doubled",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("var _ = require('lodash');"))
        .stdout(predicate::str::contains("exports.doubled = doubled;"));
}

#[test]
fn test_render_several_formats_into_out_dir() {
    let temp = project(&[("flat.js", "const answer = 42;\n")]);

    swaddle_cmd()
        .current_dir(temp.path())
        .args([
            "render", "flat.js", "-f", "esm", "-f", "iife", "--default-export", "answer",
            "--name", "Answer", "-d", "out",
        ])
        .assert()
        .success();

    let esm = fs::read_to_string(temp.path().join("out/flat.esm.js")).unwrap();
    assert!(esm.contains("export default answer;"));
    let iife = fs::read_to_string(temp.path().join("out/flat.iife.js")).unwrap();
    assert!(iife.starts_with("var Answer = (function () {"));
}

#[test]
fn test_render_several_formats_need_out_dir() {
    let temp = project(&[("flat.js", "const answer = 42;\n")]);

    swaddle_cmd()
        .current_dir(temp.path())
        .args(["render", "flat.js", "-f", "esm", "-f", "cjs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--out-dir"));
}

#[test]
fn test_render_reports_unsupplied_free_variable() {
    let temp = project(&[("flat.js", "jQuery('#app');\n")]);

    swaddle_cmd()
        .current_dir(temp.path())
        .args(["render", "flat.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Precondition violated"))
        .stderr(predicate::str::contains("jQuery"));
}

#[test]
fn test_render_assume_global_supplies_free_variable() {
    let temp = project(&[("flat.js", "jQuery('#app');\n")]);

    swaddle_cmd()
        .current_dir(temp.path())
        .args(["render", "flat.js", "-f", "esm", "--assume-global", "jQuery"])
        .assert()
        .success()
        .stdout("jQuery('#app');\n");
}

#[test]
fn test_render_missing_input() {
    let temp = TempDir::new().unwrap();

    swaddle_cmd()
        .current_dir(temp.path())
        .args(["render", "missing.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_env_banner_applies_and_flag_wins() {
    let temp = project(&[("flat.js", "const answer = 42;\n")]);

    swaddle_cmd()
        .current_dir(temp.path())
        .env("SWADDLE_BANNER", "/* from env */")
        .args(["render", "flat.js", "-f", "esm"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/* from env */\n"));

    swaddle_cmd()
        .current_dir(temp.path())
        .env("SWADDLE_BANNER", "/* from env */")
        .args(["render", "flat.js", "-f", "esm", "--banner", "/* from flag */"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/* from flag */\n"));
}

#[test]
fn test_env_numeric_values_stay_strings() {
    let temp = project(&[("flat.js", "const answer = 42;\n")]);

    swaddle_cmd()
        .current_dir(temp.path())
        .env("SWADDLE_AMD_ID", "2024")
        .env("SWADDLE_BANNER", "2024")
        .args(["render", "flat.js", "-f", "amd"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "2024\ndefine('2024', function () { 'use strict';",
        ));

    swaddle_cmd()
        .current_dir(temp.path())
        .env("SWADDLE_NAME", "123")
        .args(["render", "flat.js", "--default-export", "answer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(global[\"123\"] = factory())"));
}

#[test]
fn test_build_writes_every_output() {
    let temp = project(&[
        ("src/flat.js", "var doubled = _.map([1, 2], x => x * 2);\n"),
        (
            "swaddle.toml",
            r#"input = "src/flat.js"

[exports]
doubled = "doubled"

[[externals]]
id = "lodash"
name = "_"

[render]
banner = "/* lib */"
globals = { lodash = "_" }

[[output]]
file = "dist/lib.umd.js"
format = "umd"
name = "lib"

[[output]]
file = "dist/lib.mjs"
format = "esm"
"#,
        ),
    ]);

    swaddle_cmd()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .success()
        .stderr(predicate::str::contains("dist/lib.umd.js"));

    let umd = fs::read_to_string(temp.path().join("dist/lib.umd.js")).unwrap();
    assert!(umd.starts_with("/* lib */\n(function (global, factory) {"));
    assert!(umd.contains("global.lib = {}"));

    let esm = fs::read_to_string(temp.path().join("dist/lib.mjs")).unwrap();
    assert!(esm.contains("import * as _ from 'lodash';"));
    assert!(esm.contains("export { doubled };"));
}

#[test]
fn test_build_without_config_fails_with_hint() {
    let temp = TempDir::new().unwrap();

    swaddle_cmd()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config not found"));
}

#[test]
fn test_check_writes_nothing() {
    let temp = project(&[
        ("flat.js", "const answer = 42;\n"),
        (
            "swaddle.toml",
            "input = \"flat.js\"\n\n[exports]\ndefault = \"answer\"\n\n[[output]]\nfile = \"dist/answer.cjs\"\nformat = \"cjs\"\n",
        ),
    ]);

    swaddle_cmd()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("All outputs render"));

    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_check_reports_unused_external() {
    let temp = project(&[
        ("flat.js", "const answer = 42;\n"),
        (
            "swaddle.toml",
            "input = \"flat.js\"\n\n[[externals]]\nid = \"lodash\"\nname = \"_\"\n\n[[output]]\nfile = \"out.js\"\nformat = \"amd\"\n",
        ),
    ]);

    swaddle_cmd()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("externals declare bindings"));
}

//! UMD wrapper tests, including the golden annotation fixture

use swaddle_gen::{
    ExportMode, ExternalReference, IndentStyle, ModuleBody, OutputFormat, RenderError,
    RenderOptions, render,
};

const ANNOTATION_BODY: &str = include_str!("fixtures/annotation/body.js");
const ANNOTATION_UMD: &str = include_str!("fixtures/annotation/umd.js");

fn umd(body: &ModuleBody, externals: &[ExternalReference], options: &RenderOptions) -> String {
    render(OutputFormat::Umd, body, externals, options)
        .unwrap()
        .into_code()
}

#[test]
fn test_annotation_fixture_is_byte_exact() {
    let body = ModuleBody::parse(ANNOTATION_BODY).unwrap();
    let output = umd(&body, &[], &RenderOptions::default());
    assert_eq!(output, ANNOTATION_UMD);
}

#[test]
fn test_annotation_fixture_from_statements() {
    let body = ModuleBody::from_statements([
        "/* rollup-tree-shake pure */\nconst cube = {};",
        "const square = () => {};\n\n",
        "cube.a = 'a';",
        "square.b = 'b';\n",
        "console.log( cube, square );",
    ])
    .unwrap();
    assert_eq!(umd(&body, &[], &RenderOptions::default()), ANNOTATION_UMD);
}

#[test]
fn test_rendering_is_deterministic() {
    let body = ModuleBody::parse(ANNOTATION_BODY).unwrap();
    let options = RenderOptions::default();
    assert_eq!(umd(&body, &[], &options), umd(&body, &[], &options));
}

#[test]
fn test_named_exports_with_external() {
    let body = ModuleBody::parse(
        "function add(a, b) { return _.sum([a, b]); }\nconst VERSION = '1.0.0';",
    )
    .unwrap()
    .with_export("add", "add")
    .with_export("VERSION", "VERSION");
    let externals = [ExternalReference::namespace("lodash", "_")];
    let options = RenderOptions::new().name("mathLib").global("lodash", "_");

    let expected = "(function (global, factory) {\n\
        \ttypeof exports === 'object' && typeof module !== 'undefined' ? factory(exports, require('lodash')) :\n\
        \ttypeof define === 'function' && define.amd ? define(['exports', 'lodash'], factory) :\n\
        \t(factory((global.mathLib = {}), global._));\n\
        }(this, (function (exports, _) { 'use strict';\n\
        \n\
        \tfunction add(a, b) { return _.sum([a, b]); }\n\
        \tconst VERSION = '1.0.0';\n\
        \n\
        \texports.add = add;\n\
        \texports.VERSION = VERSION;\n\
        \n\
        \tObject.defineProperty(exports, '__esModule', { value: true });\n\
        \n\
        })));\n";

    assert_eq!(umd(&body, &externals, &options), expected);
}

#[test]
fn test_default_export_with_interop() {
    let body = ModuleBody::parse("const App = React.createElement('div');")
        .unwrap()
        .with_default_export("App");
    let externals = [ExternalReference::default_import("react", "React")];
    let options = RenderOptions::new().name("App").global("react", "React");

    let expected = "(function (global, factory) {\n\
        \ttypeof exports === 'object' && typeof module !== 'undefined' ? module.exports = factory(require('react')) :\n\
        \ttypeof define === 'function' && define.amd ? define(['react'], factory) :\n\
        \t(global.App = factory(global.React));\n\
        }(this, (function (React) { 'use strict';\n\
        \n\
        \tReact = React && React.hasOwnProperty('default') ? React['default'] : React;\n\
        \n\
        \tconst App = React.createElement('div');\n\
        \n\
        \treturn App;\n\
        \n\
        })));\n";

    assert_eq!(umd(&body, &externals, &options), expected);
}

#[test]
fn test_external_order_is_preserved_everywhere() {
    let body = ModuleBody::parse("zeta(alpha, mid);").unwrap();
    let externals = [
        ExternalReference::namespace("zeta-lib", "zeta"),
        ExternalReference::namespace("alpha-lib", "alpha"),
        ExternalReference::namespace("mid-lib", "mid"),
    ];
    let options = RenderOptions::new()
        .global("zeta-lib", "Zeta")
        .global("alpha-lib", "Alpha")
        .global("mid-lib", "Mid");

    let output = umd(&body, &externals, &options);
    assert!(output.contains(
        "factory(require('zeta-lib'), require('alpha-lib'), require('mid-lib'))"
    ));
    assert!(output.contains("define(['zeta-lib', 'alpha-lib', 'mid-lib'], factory)"));
    assert!(output.contains("(factory(global.Zeta, global.Alpha, global.Mid))"));
    assert!(output.contains("(function (zeta, alpha, mid) { 'use strict';"));
}

#[test]
fn test_missing_global_falls_back_to_binding() {
    let body = ModuleBody::parse("$('#app').hide();").unwrap();
    let externals = [ExternalReference::namespace("jquery", "$")];
    let output = umd(&body, &externals, &RenderOptions::default());
    assert!(output.contains("(factory(global.$))"));
}

#[test]
fn test_paths_replace_ids_in_loader_calls() {
    let body = ModuleBody::parse("$('#app').hide();").unwrap();
    let externals = [ExternalReference::namespace("jquery", "$")];
    let options = RenderOptions::new()
        .path("jquery", "./vendor/jquery.js")
        .global("jquery", "jQuery");
    let output = umd(&body, &externals, &options);
    assert!(output.contains("factory(require('./vendor/jquery.js'))"));
    assert!(output.contains("define(['./vendor/jquery.js'], factory)"));
    assert!(output.contains("(factory(global.jQuery))"));
}

#[test]
fn test_amd_id_and_custom_define() {
    let body = ModuleBody::parse("console.log('ready');").unwrap();
    let options = RenderOptions::new().amd_id("ready").amd_define("requirejs.define");
    let output = umd(&body, &[], &options);
    assert!(output.contains(
        "typeof requirejs.define === 'function' && requirejs.define.amd ? requirejs.define('ready', factory) :"
    ));
}

#[test]
fn test_dotted_name_creates_namespace() {
    let body = ModuleBody::parse("const widget = {};")
        .unwrap()
        .with_default_export("widget");
    let options = RenderOptions::new().name("acme.ui.widget");
    let output = umd(&body, &[], &options);
    assert!(output.contains(
        "(global.acme = global.acme || {}, global.acme.ui = global.acme.ui || {}, global.acme.ui.widget = factory());"
    ));
}

#[test]
fn test_extend_reuses_existing_global() {
    let body = ModuleBody::parse("const one = 1;")
        .unwrap()
        .with_export("one", "one");
    let options = RenderOptions::new().name("numbers").extend(true);
    let output = umd(&body, &[], &options);
    assert!(output.contains("(factory((global.numbers = global.numbers || {})));"));
}

#[test]
fn test_no_conflict_restores_previous_global() {
    let body = ModuleBody::parse("const lib = {};")
        .unwrap()
        .with_default_export("lib");
    let options = RenderOptions::new().name("lib").no_conflict(true);
    let output = umd(&body, &[], &options);
    assert!(output.contains("\t\tvar current = global.lib;\n"));
    assert!(output.contains(
        "\t\texports.noConflict = function () { global.lib = current; return exports; };\n"
    ));
}

#[test]
fn test_wrapper_names_do_not_capture_body() {
    let body = ModuleBody::parse("const factory = () => global;\nfactory();")
        .unwrap()
        .with_default_export("factory");
    let options = RenderOptions::new().name("factory");
    let output = umd(&body, &[], &options);
    assert!(output.contains("(global.factory = factory());"));
    assert!(output.contains("\tconst factory = () => global;\n"));
}

#[test]
fn test_banner_footer_intro_outro() {
    let body = ModuleBody::parse("console.log(1);").unwrap();
    let options = RenderOptions::new()
        .banner("/*! v1.0.0 */")
        .footer("//# sourceMappingURL=out.js.map")
        .intro("var DEBUG = false;")
        .outro("console.log('done');");
    let output = umd(&body, &[], &options);

    assert!(output.starts_with("/*! v1.0.0 */\n(function (global, factory) {"));
    assert!(output.ends_with("})));\n//# sourceMappingURL=out.js.map\n"));
    assert!(output.contains("\tvar DEBUG = false;\n\n\tconsole.log(1);\n\n\tconsole.log('done');\n"));
}

#[test]
fn test_empty_body_keeps_single_blank_line() {
    let body = ModuleBody::parse("\n").unwrap();
    let output = umd(&body, &[], &RenderOptions::default());
    assert!(output.ends_with("(function () { 'use strict';\n\n})));\n"));
}

#[test]
fn test_string_line_continuation_is_not_indented() {
    let body = ModuleBody::parse("const s = 'a\\\nb';\nconsole.log(s);").unwrap();
    let output = umd(&body, &[], &RenderOptions::default());
    assert!(output.contains("\n\tconst s = 'a\\\nb';\n\tconsole.log(s);\n"));
}

#[test]
fn test_crlf_body_renders_crlf_throughout() {
    let body = ModuleBody::parse("const a = 1;\r\nconsole.log(a);\r\n").unwrap();
    let output = umd(&body, &[], &RenderOptions::default());
    assert!(output.contains("\tconst a = 1;\r\n\tconsole.log(a);\r\n\r\n})));\r\n"));
    assert!(!output.replace("\r\n", "").contains('\n'));
}

#[test]
fn test_non_strict_omits_directive() {
    let body = ModuleBody::parse("console.log(1);").unwrap();
    let output = umd(&body, &[], &RenderOptions::new().strict(false));
    assert!(output.contains("}(this, (function () {\n\n"));
    assert!(!output.contains("use strict"));
}

#[test]
fn test_space_indentation_is_detected() {
    let body = ModuleBody::parse("function page() {\n  return `<p>\nhi\n</p>`;\n}\npage();").unwrap();
    let output = umd(&body, &[], &RenderOptions::default());
    assert!(output.contains("\n  typeof exports === 'object'"));
    assert!(output.contains("\n  function page() {\n    return `<p>\nhi\n</p>`;\n  }\n  page();\n"));
}

#[test]
fn test_explicit_indent_overrides_detection() {
    let body = ModuleBody::parse("console.log(1);").unwrap();
    let output = umd(&body, &[], &RenderOptions::new().indent(IndentStyle::Spaces(4)));
    assert!(output.contains("\n    console.log(1);\n"));
}

#[test]
fn test_exports_require_name() {
    let body = ModuleBody::parse("const a = 1;").unwrap().with_export("a", "a");
    let err = render(OutputFormat::Umd, &body, &[], &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, RenderError::InvalidOption { option: "name", .. }));
}

#[test]
fn test_undeclared_free_variable_is_rejected() {
    let body = ModuleBody::parse("React.render(h('div'));").unwrap();
    let externals = [ExternalReference::namespace("react", "React")];
    let err = render(OutputFormat::Umd, &body, &externals, &RenderOptions::default()).unwrap_err();
    match err {
        RenderError::PreconditionViolation { names, .. } => assert_eq!(names, ["h"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unreferenced_external_is_rejected() {
    let body = ModuleBody::parse("console.log(1);").unwrap();
    let externals = [ExternalReference::namespace("lodash", "_")];
    let err = render(OutputFormat::Umd, &body, &externals, &RenderOptions::default()).unwrap_err();
    assert!(err.is_precondition_violation());
}

#[test]
fn test_duplicate_external_ids_are_rejected() {
    let body = ModuleBody::parse("a(b);").unwrap();
    let externals = [
        ExternalReference::namespace("dup", "a"),
        ExternalReference::namespace("dup", "b"),
    ];
    let err = render(OutputFormat::Umd, &body, &externals, &RenderOptions::default()).unwrap_err();
    assert!(err.to_string().contains("ids must be unique"));
}

#[test]
fn test_named_mode_rejects_body_exports_binding() {
    let body = ModuleBody::parse("var exports = {};\nexports.x = 1;")
        .unwrap()
        .with_export("x", "exports");
    let options = RenderOptions::new().name("lib").exports(ExportMode::Named);
    let err = render(OutputFormat::Umd, &body, &[], &options).unwrap_err();
    match err {
        RenderError::PreconditionViolation { names, .. } => assert_eq!(names, ["exports"]),
        other => panic!("unexpected error: {other}"),
    }
}

//! Render options shared by every output format

use crate::format::IndentStyle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the bundle's exports are exposed by the wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Derive from the exports: none, default (a sole `default` export) or named
    #[default]
    Auto,
    /// The factory returns the default export
    Default,
    /// The factory fills an injected `exports` object
    Named,
    /// The bundle exposes nothing
    None,
}

impl ExportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportMode::Auto => "auto",
            ExportMode::Default => "default",
            ExportMode::Named => "named",
            ExportMode::None => "none",
        }
    }
}

impl FromStr for ExportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ExportMode::Auto),
            "default" => Ok(ExportMode::Default),
            "named" => Ok(ExportMode::Named),
            "none" => Ok(ExportMode::None),
            other => Err(format!(
                "Invalid export mode: {} (expected auto, default, named or none)",
                other
            )),
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AMD-specific settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmdOptions {
    /// Explicit module id passed as the first `define` argument
    pub id: Option<String>,
    /// Name of the loader function, `define` when unset
    pub define: Option<String>,
}

/// Options for a render call
///
/// Use the builder methods for ergonomic configuration:
///
/// ```rust
/// use swaddle_gen::{ExportMode, RenderOptions};
///
/// let options = RenderOptions::new()
///     .name("MyLib")
///     .exports(ExportMode::Named)
///     .global("lodash", "_");
/// assert_eq!(options.name.as_deref(), Some("MyLib"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RenderOptions {
    /// Global (UMD, IIFE) or registered (SystemJS) name; dotted paths allowed
    pub name: Option<String>,

    pub exports: ExportMode,

    /// External id -> global variable name used by script-tag loading
    pub globals: IndexMap<String, String>,

    /// External id -> path used in `require`, `define` and `import`
    pub paths: IndexMap<String, String>,

    pub amd: AmdOptions,

    /// Emit `'use strict'`
    pub strict: bool,

    /// Normalise the default export of CommonJS externals
    pub interop: bool,

    /// Mark named-export bundles with `__esModule`
    pub es_module: bool,

    /// Merge named exports into an existing global object instead of replacing it
    pub extend: bool,

    /// Add a `noConflict()` method restoring the previous global
    pub no_conflict: bool,

    /// Text placed above the wrapper
    pub banner: Option<String>,

    /// Text placed below the wrapper
    pub footer: Option<String>,

    /// Text placed at the top of the module body, inside the wrapper
    pub intro: Option<String>,

    /// Text placed at the bottom of the module body, inside the wrapper
    pub outro: Option<String>,

    pub indent: IndentStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            name: None,
            exports: ExportMode::Auto,
            globals: IndexMap::new(),
            paths: IndexMap::new(),
            amd: AmdOptions::default(),
            strict: true,
            interop: true,
            es_module: true,
            extend: false,
            no_conflict: false,
            banner: None,
            footer: None,
            intro: None,
            outro: None,
            indent: IndentStyle::Auto,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bundle name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the export mode
    pub fn exports(mut self, mode: ExportMode) -> Self {
        self.exports = mode;
        self
    }

    /// Map an external id to the global variable holding it
    pub fn global(mut self, id: impl Into<String>, global: impl Into<String>) -> Self {
        self.globals.insert(id.into(), global.into());
        self
    }

    /// Map an external id to the path emitted in loader calls
    pub fn path(mut self, id: impl Into<String>, path: impl Into<String>) -> Self {
        self.paths.insert(id.into(), path.into());
        self
    }

    /// Register the AMD module under an explicit id
    pub fn amd_id(mut self, id: impl Into<String>) -> Self {
        self.amd.id = Some(id.into());
        self
    }

    /// Use a loader function other than `define`
    pub fn amd_define(mut self, define: impl Into<String>) -> Self {
        self.amd.define = Some(define.into());
        self
    }

    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    pub fn interop(mut self, enabled: bool) -> Self {
        self.interop = enabled;
        self
    }

    pub fn es_module(mut self, enabled: bool) -> Self {
        self.es_module = enabled;
        self
    }

    pub fn extend(mut self, enabled: bool) -> Self {
        self.extend = enabled;
        self
    }

    pub fn no_conflict(mut self, enabled: bool) -> Self {
        self.no_conflict = enabled;
        self
    }

    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = Some(intro.into());
        self
    }

    pub fn outro(mut self, outro: impl Into<String>) -> Self {
        self.outro = Some(outro.into());
        self
    }

    pub fn indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }
}

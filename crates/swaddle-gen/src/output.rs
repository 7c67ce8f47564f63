//! Output formats and rendered wrappers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Module format of a rendered bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Universal Module Definition: CommonJS, AMD or a plain script tag
    Umd,
    /// Asynchronous Module Definition (`define`)
    Amd,
    /// CommonJS (`require` / `module.exports`)
    #[serde(alias = "commonjs")]
    Cjs,
    /// ECMAScript module (`import` / `export`)
    #[serde(alias = "es", alias = "module")]
    Esm,
    /// Immediately Invoked Function Expression for script tags
    Iife,
    /// SystemJS (`System.register`)
    #[serde(alias = "systemjs")]
    System,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Umd,
        OutputFormat::Amd,
        OutputFormat::Cjs,
        OutputFormat::Esm,
        OutputFormat::Iife,
        OutputFormat::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Umd => "umd",
            OutputFormat::Amd => "amd",
            OutputFormat::Cjs => "cjs",
            OutputFormat::Esm => "esm",
            OutputFormat::Iife => "iife",
            OutputFormat::System => "system",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "umd" => Ok(OutputFormat::Umd),
            "amd" => Ok(OutputFormat::Amd),
            "cjs" | "commonjs" => Ok(OutputFormat::Cjs),
            "esm" | "es" | "module" => Ok(OutputFormat::Esm),
            "iife" => Ok(OutputFormat::Iife),
            "system" | "systemjs" => Ok(OutputFormat::System),
            other => Err(format!("Invalid output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The text produced by one render call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperOutput {
    format: OutputFormat,
    code: String,
}

impl WrapperOutput {
    pub(crate) fn new(format: OutputFormat, code: String) -> Self {
        Self { format, code }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn into_code(self) -> String {
        self.code
    }
}

impl fmt::Display for WrapperOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

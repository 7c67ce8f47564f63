use clap::ValueEnum;
use swaddle_gen::{ExportMode, OutputFormat};

/// Wrapper format to render
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Format {
    /// Universal Module Definition
    ///
    /// Works as CommonJS, as an AMD module, or from a plain script tag that
    /// reads its dependencies from globals.
    #[value(name = "umd")]
    Umd,

    /// Asynchronous Module Definition (`define`)
    #[value(name = "amd")]
    Amd,

    /// CommonJS (`require` / `module.exports`)
    #[value(name = "cjs", alias = "commonjs")]
    Cjs,

    /// ECMAScript module (`import` / `export`)
    #[value(name = "esm", alias = "es")]
    Esm,

    /// Immediately Invoked Function Expression for script tags
    #[value(name = "iife")]
    Iife,

    /// SystemJS (`System.register`)
    #[value(name = "system", alias = "systemjs")]
    System,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Umd => OutputFormat::Umd,
            Format::Amd => OutputFormat::Amd,
            Format::Cjs => OutputFormat::Cjs,
            Format::Esm => OutputFormat::Esm,
            Format::Iife => OutputFormat::Iife,
            Format::System => OutputFormat::System,
        }
    }
}

/// How the bundle's exports are exposed
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Exports {
    /// Pick none, default or named from the declared exports
    #[value(name = "auto")]
    Auto,

    /// Expose the sole `default` export as the module value
    #[value(name = "default")]
    Default,

    /// Expose every export as a property of an `exports` object
    #[value(name = "named")]
    Named,

    /// Expose nothing
    #[value(name = "none")]
    None,
}

impl From<Exports> for ExportMode {
    fn from(mode: Exports) -> Self {
        match mode {
            Exports::Auto => ExportMode::Auto,
            Exports::Default => ExportMode::Default,
            Exports::Named => ExportMode::Named,
            Exports::None => ExportMode::None,
        }
    }
}

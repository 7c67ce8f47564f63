use clap::{Args, Subcommand};
use std::path::PathBuf;
use swaddle_gen::{ExternalReference, IndentStyle};

use crate::cli::enums::*;
use crate::cli::validation::{parse_export, parse_external, parse_key_value};

/// Available swaddle subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wrap one flattened body
    ///
    /// Everything the wrapper needs (externals, exports, globals, name) is
    /// given as flags. Writes to stdout unless --out-file or --out-dir is set.
    Render(RenderArgs),

    /// Render every output listed in swaddle.toml
    ///
    /// Reads swaddle.toml (or the "swaddle" field of package.json), renders
    /// each [[output]] table and writes the files.
    Build(BuildArgs),

    /// Validate configuration without writing files
    ///
    /// Loads the config, analyses the input body and dry-runs every output,
    /// reporting the first precondition violation.
    Check(CheckArgs),
}

/// Arguments for the render command
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Flattened, tree-shaken module body to wrap
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output format; repeat to render several formats at once
    #[arg(short = 'f', long = "format", value_enum, default_value = "umd")]
    pub formats: Vec<Format>,

    /// Write the wrapper to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE", conflicts_with = "out_dir")]
    pub out_file: Option<PathBuf>,

    /// Write one `<input>.<format>.js` file per format into this directory
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Global (UMD, IIFE) or registered (SystemJS) name; dotted paths allowed
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// External module the body reads: ID=NAME[:KIND]
    ///
    /// Examples:
    ///   --external lodash=_
    ///   --external react=React:default
    #[arg(short = 'e', long = "external", value_name = "ID=NAME[:KIND]", value_parser = parse_external)]
    pub externals: Vec<ExternalReference>,

    /// Global variable for an external in script-tag builds: ID=GLOBAL
    #[arg(short = 'g', long = "global", value_name = "ID=GLOBAL", value_parser = parse_key_value)]
    pub globals: Vec<(String, String)>,

    /// Path to load an external from instead of its id: ID=PATH
    #[arg(long = "path", value_name = "ID=PATH", value_parser = parse_key_value)]
    pub paths: Vec<(String, String)>,

    /// Public export of the bundle: EXPORTED=LOCAL
    #[arg(long = "export", value_name = "EXPORTED=LOCAL", value_parser = parse_export)]
    pub exports: Vec<(String, String)>,

    /// Top-level binding exported as `default`
    #[arg(long, value_name = "LOCAL")]
    pub default_export: Option<String>,

    /// Free variable the host page supplies itself
    #[arg(long = "assume-global", value_name = "NAME")]
    pub assume_globals: Vec<String>,

    /// How exports are exposed
    #[arg(long = "exports", value_enum, value_name = "MODE")]
    pub export_mode: Option<Exports>,

    /// Explicit AMD module id
    #[arg(long, value_name = "ID")]
    pub amd_id: Option<String>,

    /// Name of the AMD loader function (default: define)
    #[arg(long, value_name = "NAME")]
    pub amd_define: Option<String>,

    /// Do not emit 'use strict'
    #[arg(long)]
    pub no_strict: bool,

    /// Do not normalise default imports of CommonJS externals
    #[arg(long)]
    pub no_interop: bool,

    /// Do not mark named-export bundles with __esModule
    #[arg(long)]
    pub no_es_module: bool,

    /// Merge named exports into an existing global instead of replacing it
    #[arg(long)]
    pub extend: bool,

    /// Add a noConflict() method to the UMD global
    #[arg(long)]
    pub no_conflict: bool,

    /// Text placed above the wrapper
    #[arg(long)]
    pub banner: Option<String>,

    /// Text placed below the wrapper
    #[arg(long)]
    pub footer: Option<String>,

    /// Text placed at the top of the body, inside the wrapper
    #[arg(long)]
    pub intro: Option<String>,

    /// Text placed at the bottom of the body, inside the wrapper
    #[arg(long)]
    pub outro: Option<String>,

    /// Indentation of the wrapped body: auto, tab or a number of spaces
    #[arg(long, value_name = "STYLE")]
    pub indent: Option<IndentStyle>,

    /// Read shared render options from the [render] table of this config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Config file (default: swaddle.toml or package.json in --cwd)
    ///
    /// Paths inside the config resolve against the config file's directory.
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Profile from the [profiles] table to apply
    #[arg(short = 'p', long)]
    pub profile: Option<String>,

    /// Working directory to search for the config
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Config file (default: swaddle.toml or package.json in --cwd)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Profile from the [profiles] table to apply
    #[arg(short = 'p', long)]
    pub profile: Option<String>,

    /// Working directory to search for the config
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

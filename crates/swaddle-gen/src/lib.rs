//! Module-format wrappers for flattened JavaScript bundles
//!
//! A bundler that has already tree-shaken and flattened a module graph is left
//! with a single body of plain statements plus the list of external modules
//! the body reads. This crate wraps that body so it can be loaded by
//! CommonJS, AMD and script tags at once (UMD), or by a single loader:
//! AMD, CommonJS, ES modules, an IIFE or SystemJS.
//!
//! # Features
//!
//! - **Verbatim bodies** - statements, comments and blank lines are kept as
//!   written; only indentation is added, never inside multi-line templates
//! - **Checked closure** - the body's free variables must match the external
//!   bindings exactly, and no binding may be captured by the wrapper
//! - **Deterministic output** - identical input renders byte-identical text
//!
//! # Example
//!
//! ```rust
//! use swaddle_gen::{ModuleBody, OutputFormat, RenderOptions, render};
//!
//! let body = ModuleBody::parse("const answer = 42;\nconsole.log(answer);")?;
//! let output = render(OutputFormat::Umd, &body, &[], &RenderOptions::default())?;
//!
//! assert!(output.code().starts_with("(function (global, factory) {\n"));
//! assert!(output.code().ends_with("})));\n"));
//! # Ok::<(), swaddle_gen::RenderError>(())
//! ```
//!
//! # Logging
//!
//! Render warnings (missing global names, mixed default and named exports) are
//! emitted as `tracing` events. Enable the `logging` feature for a ready-made
//! subscriber.

pub mod body;
pub mod error;
pub mod external;
pub mod format;
pub mod globals;
pub mod identifier;
pub mod options;
pub mod output;
pub mod render;

#[cfg(feature = "logging")]
pub mod logging;

pub use body::{ExportBinding, ModuleBody};
pub use error::{RenderError, Result};
pub use external::{ExternalReference, ImportKind};
pub use format::IndentStyle;
pub use globals::is_host_global;
pub use identifier::is_valid_identifier;
pub use options::{AmdOptions, ExportMode, RenderOptions};
pub use output::{OutputFormat, WrapperOutput};
pub use render::{render, render_all};

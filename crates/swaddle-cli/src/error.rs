//! Error handling for the swaddle CLI.
//!
//! [`CliError`] wraps the library errors via `#[from]`, so commands can use
//! `?` throughout. `main` converts it into a miette report with
//! [`cli_error_to_miette`].

pub mod miette;

use std::path::PathBuf;
use swaddle_config::ConfigError;
use swaddle_gen::RenderError;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file loading or validation failed
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The body or the render options were rejected by the renderer
    #[error("{0}")]
    Render(#[from] RenderError),

    /// Render options from file, environment and flags could not be merged
    #[error("Invalid render options: {0}")]
    Options(#[from] figment::Error),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_from_config_error() {
        let cli_err: CliError = ConfigError::NoOutputs.into();
        assert!(matches!(cli_err, CliError::Config(_)));
        assert_eq!(cli_err.to_string(), "no outputs configured");
    }

    #[test]
    fn test_cli_error_from_render_error() {
        let cli_err: CliError = RenderError::precondition("unsupplied free variables", ["jQuery"]).into();
        assert!(matches!(cli_err, CliError::Render(_)));
        assert!(cli_err.to_string().contains("jQuery"));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/flat.js").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
        assert_eq!(err.to_string(), "File not found: /test/flat.js");
    }

    #[test]
    fn test_result_ext_keeps_other_io_errors() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));

        let err = result.with_path("/test/flat.js").unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}

//! Error types for CSV-to-SQL conversion.
//!
//! Only run-level failures are errors. Problems confined to a single CSV row
//! are reported as warnings and never surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input CSV path does not exist.
    #[error("CSV file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// File I/O failure while reading input, config, or writing output.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        /// Path being accessed when the failure happened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config values that would produce unsafe or malformed SQL.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for results with [`ConvertError`].
pub type Result<T> = std::result::Result<T, ConvertError>;

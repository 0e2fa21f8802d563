//! Error types for the command-line front end.

use std::path::PathBuf;

use oxide_ddl_core::DiffError;

/// Errors that can occur while loading inputs or writing scripts.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// IO error reading an input or writing the script.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// One of the schemas cannot be diffed.
    #[error(transparent)]
    Diff(#[from] DiffError),

    /// The input kind cannot be determined or is not supported.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

//! Error types for the staging module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while staging file bytes locally.
#[derive(Debug, Error)]
pub enum StagingError {
    /// Failed to create the staging directory.
    #[error("Failed to create staging directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write staged bytes.
    #[error("Failed to write staged file: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

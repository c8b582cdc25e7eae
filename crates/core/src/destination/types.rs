//! Types for destination store operations.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while writing to the destination store.
#[derive(Debug, Error)]
pub enum DestinationError {
    #[error("Failed to read local file {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Credentials unavailable: {0}")]
    Credentials(String),

    #[error("Storage API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Stored object {key} has {actual} bytes, expected {expected}")]
    SizeMismatch {
        key: String,
        expected: u64,
        actual: u64,
    },

    #[error("Request timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Object store that files are moved into.
#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// Returns the name of this store implementation.
    fn name(&self) -> &str;

    /// Writes the object `key` from the local file at `path`.
    ///
    /// Returns the number of bytes written once the store has confirmed the write.
    async fn upload(&self, key: &str, path: &Path) -> Result<u64, DestinationError>;
}

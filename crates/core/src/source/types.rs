//! Types for source store operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during source store operations.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Credentials unavailable: {0}")]
    Credentials(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Drive API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A file listed in the source folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Opaque source-system ID, unique within the folder.
    pub id: String,
    /// Display name, also used as the destination object key.
    pub name: String,
}

impl FileDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Document store that files are moved out of.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Returns the name of this store implementation.
    fn name(&self) -> &str;

    /// Lists files directly under `folder_id`, excluding trashed files.
    async fn list_folder(&self, folder_id: &str) -> Result<Vec<FileDescriptor>, SourceError>;

    /// Fetches the full byte content of a file.
    async fn download(&self, file_id: &str) -> Result<Vec<u8>, SourceError>;

    /// Permanently deletes a file.
    async fn delete(&self, file_id: &str) -> Result<(), SourceError>;
}

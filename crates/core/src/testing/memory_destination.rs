//! In-memory destination store for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::destination::{DestinationError, DestinationStore};

use super::operation_log::{OperationLog, StoreOperation};

/// A recorded upload for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    /// Object key.
    pub key: String,
    /// Local path the bytes were read from.
    pub staged_path: PathBuf,
    /// Whether the staged file was on disk when the upload started.
    pub staged_existed: bool,
    /// Whether the upload succeeded.
    pub success: bool,
}

/// In-memory implementation of the DestinationStore trait.
///
/// Uploads read the staged file from disk, so a missing staging file fails
/// the upload the same way it would against a real bucket.
#[derive(Debug, Default)]
pub struct MemoryDestinationStore {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    uploads: Arc<RwLock<Vec<RecordedUpload>>>,
    failing_keys: Arc<RwLock<HashSet<String>>>,
    log: OperationLog,
}

impl MemoryDestinationStore {
    /// Create an empty store with its own operation log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store recording into a shared operation log.
    pub fn with_log(log: OperationLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// The operation log this store records into.
    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    /// Make uploads to this key fail.
    pub async fn fail_upload(&self, key: &str) {
        self.failing_keys.write().await.insert(key.to_string());
    }

    /// Content stored under `key`, if any.
    pub async fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(key).cloned()
    }

    /// Stored object keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Get all recorded uploads.
    pub async fn recorded_uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.read().await.clone()
    }
}

#[async_trait]
impl DestinationStore for MemoryDestinationStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn upload(&self, key: &str, path: &Path) -> Result<u64, DestinationError> {
        self.log.record(StoreOperation::Upload(key.to_string())).await;

        let failed = self.failing_keys.read().await.contains(key);
        let staged_existed = tokio::fs::try_exists(path).await.unwrap_or(false);
        let content = tokio::fs::read(path).await;

        self.uploads.write().await.push(RecordedUpload {
            key: key.to_string(),
            staged_path: path.to_path_buf(),
            staged_existed,
            success: !failed && content.is_ok(),
        });

        let content = content.map_err(|e| DestinationError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        if failed {
            return Err(DestinationError::Api {
                status: 503,
                body: format!("injected upload failure for {}", key),
            });
        }

        let bytes = content.len() as u64;
        self.objects.write().await.insert(key.to_string(), content);
        Ok(bytes)
    }
}

//! In-memory source store for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::source::{FileDescriptor, SourceError, SourceStore};

use super::operation_log::{OperationLog, StoreOperation};

#[derive(Debug, Clone)]
struct StoredFile {
    descriptor: FileDescriptor,
    content: Vec<u8>,
}

/// In-memory implementation of the SourceStore trait.
///
/// Provides controllable behavior for testing:
/// - Seed files in listing order
/// - Record every call in a shared [`OperationLog`]
/// - Fail listing, or downloads/deletes of specific files
/// - Delay downloads to exercise deadlines
///
/// # Example
///
/// ```rust,ignore
/// let source = MemorySourceStore::new();
/// source.add_file("id-1", "track.wav", b"bytes".to_vec()).await;
/// source.fail_download("id-1").await;
///
/// let files = source.list_folder("any-folder").await?;
/// assert_eq!(files.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemorySourceStore {
    files: Arc<RwLock<Vec<StoredFile>>>,
    log: OperationLog,
    fail_listing: Arc<RwLock<bool>>,
    failing_downloads: Arc<RwLock<HashSet<String>>>,
    failing_deletes: Arc<RwLock<HashSet<String>>>,
    download_delay: Arc<RwLock<Option<Duration>>>,
}

impl MemorySourceStore {
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

    /// Add a file at the end of the listing.
    pub async fn add_file(&self, id: &str, name: &str, content: Vec<u8>) -> FileDescriptor {
        let descriptor = FileDescriptor::new(id, name);
        self.files.write().await.push(StoredFile {
            descriptor: descriptor.clone(),
            content,
        });
        descriptor
    }

    /// Whether the file is still in the store.
    pub async fn contains(&self, id: &str) -> bool {
        self.files
            .read()
            .await
            .iter()
            .any(|f| f.descriptor.id == id)
    }

    /// IDs of the remaining files, in listing order.
    pub async fn file_ids(&self) -> Vec<String> {
        self.files
            .read()
            .await
            .iter()
            .map(|f| f.descriptor.id.clone())
            .collect()
    }

    /// Make listing fail.
    pub async fn set_fail_listing(&self, fail: bool) {
        *self.fail_listing.write().await = fail;
    }

    /// Make downloads of this file fail.
    pub async fn fail_download(&self, id: &str) {
        self.failing_downloads.write().await.insert(id.to_string());
    }

    /// Make deletes of this file fail.
    pub async fn fail_delete(&self, id: &str) {
        self.failing_deletes.write().await.insert(id.to_string());
    }

    /// Delay every download by `delay`.
    pub async fn set_download_delay(&self, delay: Duration) {
        *self.download_delay.write().await = Some(delay);
    }
}

fn injected(what: &str, id: &str) -> SourceError {
    SourceError::Api {
        status: 500,
        body: format!("injected {} failure for {}", what, id),
    }
}

#[async_trait]
impl SourceStore for MemorySourceStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_folder(&self, folder_id: &str) -> Result<Vec<FileDescriptor>, SourceError> {
        self.log
            .record(StoreOperation::List(folder_id.to_string()))
            .await;

        if *self.fail_listing.read().await {
            return Err(injected("listing", folder_id));
        }

        Ok(self
            .files
            .read()
            .await
            .iter()
            .map(|f| f.descriptor.clone())
            .collect())
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>, SourceError> {
        self.log
            .record(StoreOperation::Download(file_id.to_string()))
            .await;

        let delay = *self.download_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing_downloads.read().await.contains(file_id) {
            return Err(injected("download", file_id));
        }

        self.files
            .read()
            .await
            .iter()
            .find(|f| f.descriptor.id == file_id)
            .map(|f| f.content.clone())
            .ok_or_else(|| SourceError::NotFound(file_id.to_string()))
    }

    async fn delete(&self, file_id: &str) -> Result<(), SourceError> {
        self.log
            .record(StoreOperation::Delete(file_id.to_string()))
            .await;

        if self.failing_deletes.read().await.contains(file_id) {
            return Err(injected("delete", file_id));
        }

        let mut files = self.files.write().await;
        let before = files.len();
        files.retain(|f| f.descriptor.id != file_id);
        if files.len() == before {
            return Err(SourceError::NotFound(file_id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listing_preserves_insertion_order() {
        let store = MemorySourceStore::new();
        store.add_file("3", "c", vec![]).await;
        store.add_file("1", "a", vec![]).await;

        let files = store.list_folder("folder").await.unwrap();
        assert_eq!(files[0].id, "3");
        assert_eq!(files[1].id, "1");
    }

    #[tokio::test]
    async fn test_download_and_delete() {
        let store = MemorySourceStore::new();
        store.add_file("1", "a", b"content".to_vec()).await;

        assert_eq!(store.download("1").await.unwrap(), b"content");
        store.delete("1").await.unwrap();
        assert!(!store.contains("1").await);
        assert!(matches!(
            store.delete("1").await,
            Err(SourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemorySourceStore::new();
        store.add_file("1", "a", vec![]).await;
        store.fail_download("1").await;
        store.fail_delete("1").await;
        store.set_fail_listing(true).await;

        assert!(store.list_folder("f").await.is_err());
        assert!(store.download("1").await.is_err());
        assert!(store.delete("1").await.is_err());
        assert!(store.contains("1").await);
        assert_eq!(store.log().operations().await.len(), 3);
    }
}

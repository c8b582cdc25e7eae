//! Shared record of store calls, in call order.

use std::sync::Arc;
use tokio::sync::RwLock;

/// A store call recorded when it was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    /// Folder listing (folder ID).
    List(String),
    /// Source download (file ID).
    Download(String),
    /// Destination upload (object key).
    Upload(String),
    /// Source delete (file ID).
    Delete(String),
}

/// Call log shared by the in-memory stores so tests can assert cross-store ordering.
#[derive(Debug, Clone, Default)]
pub struct OperationLog {
    operations: Arc<RwLock<Vec<StoreOperation>>>,
}

impl OperationLog {
    pub(crate) async fn record(&self, operation: StoreOperation) {
        self.operations.write().await.push(operation);
    }

    /// All operations recorded so far.
    pub async fn operations(&self) -> Vec<StoreOperation> {
        self.operations.read().await.clone()
    }

    /// Number of recorded operations matching `predicate`.
    pub async fn count(&self, predicate: impl Fn(&StoreOperation) -> bool) -> usize {
        self.operations
            .read()
            .await
            .iter()
            .filter(|op| predicate(op))
            .count()
    }

    /// Operations that touched one file, by source ID or destination key.
    pub async fn for_file(&self, id: &str, name: &str) -> Vec<StoreOperation> {
        self.operations
            .read()
            .await
            .iter()
            .filter(|op| match op {
                StoreOperation::Download(i) | StoreOperation::Delete(i) => i == id,
                StoreOperation::Upload(key) => key == name,
                StoreOperation::List(_) => false,
            })
            .cloned()
            .collect()
    }

    /// Forget all recorded operations.
    pub async fn clear(&self) {
        self.operations.write().await.clear();
    }
}

//! Testing utilities and in-memory store implementations.
//!
//! This module provides in-memory implementations of the store traits and
//! client factories, allowing batch runs to be tested without Google APIs.
//!
//! # Example
//!
//! ```rust,ignore
//! use drivemove_core::testing::{MemoryDestinationStore, MemorySourceStore, OperationLog, StaticStoreFactory};
//!
//! let log = OperationLog::default();
//! let source = Arc::new(MemorySourceStore::with_log(log.clone()));
//! let destination = Arc::new(MemoryDestinationStore::with_log(log.clone()));
//!
//! source.add_file("id-1", "a.wav", b"...".to_vec()).await;
//! destination.fail_upload("a.wav").await;
//!
//! let factory = StaticStoreFactory::new(source.clone(), destination.clone());
//! // Use with BatchOrchestrator...
//! ```

mod memory_destination;
mod memory_source;
mod operation_log;

pub use memory_destination::{MemoryDestinationStore, RecordedUpload};
pub use memory_source::MemorySourceStore;
pub use operation_log::{OperationLog, StoreOperation};

use async_trait::async_trait;
use std::sync::Arc;

use crate::batch::{BatchError, StoreFactory, StoreHandles};
use crate::destination::DestinationStore;
use crate::source::SourceStore;

/// Store factory that always hands out the same store instances.
pub struct StaticStoreFactory {
    handles: StoreHandles,
}

impl StaticStoreFactory {
    pub fn new(source: Arc<dyn SourceStore>, destination: Arc<dyn DestinationStore>) -> Self {
        Self {
            handles: StoreHandles {
                source,
                destination,
            },
        }
    }
}

#[async_trait]
impl StoreFactory for StaticStoreFactory {
    async fn connect(&self) -> Result<StoreHandles, BatchError> {
        Ok(self.handles.clone())
    }
}

/// Store factory whose client setup always fails.
pub struct FailingStoreFactory {
    message: String,
}

impl FailingStoreFactory {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl StoreFactory for FailingStoreFactory {
    async fn connect(&self) -> Result<StoreHandles, BatchError> {
        Err(BatchError::ClientSetup(self.message.clone()))
    }
}

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::{
        Config, CredentialsConfig, CredentialsMethod, DestinationConfig, ServerConfig,
        SourceConfig, TransferSettings,
    };

    /// A config with static credentials and the given folder and bucket.
    pub fn config(folder_id: &str, bucket: &str) -> Config {
        Config {
            server: ServerConfig::default(),
            source: SourceConfig {
                folder_id: folder_id.to_string(),
                api_url: "http://127.0.0.1:1".to_string(),
                page_size: 100,
                timeout_secs: 5,
            },
            destination: DestinationConfig {
                bucket: bucket.to_string(),
                api_url: "http://127.0.0.1:1".to_string(),
                timeout_secs: 5,
            },
            credentials: CredentialsConfig {
                method: CredentialsMethod::Static,
                token: Some("test-token".to_string()),
                ..Default::default()
            },
            transfer: TransferSettings::default(),
        }
    }

    /// Deterministic file content of `len` bytes, distinct per `seed`.
    pub fn content(seed: u8, len: usize) -> Vec<u8> {
        (0..len).map(|i| seed.wrapping_add(i as u8)).collect()
    }
}

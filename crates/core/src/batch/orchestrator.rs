//! Batch orchestrator implementation.
//!
//! Drives one run over the source folder:
//! - Connect: obtain store clients (fatal on failure)
//! - List: fetch every file in the folder (fatal on failure)
//! - Process: move files one at a time, in listing order; per-file failures
//!   are logged and skipped

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{error, info};

use crate::transfer::{TransferOutcome, TransferUnit};

use super::factory::StoreFactory;
use super::types::{BatchConfig, BatchError, BatchStats, BatchSummary};

/// Moves every file in the configured source folder to the destination.
pub struct BatchOrchestrator {
    config: BatchConfig,
    factory: Arc<dyn StoreFactory>,
    /// Held for the whole of a run so concurrent triggers run one after another.
    run_lock: Mutex<()>,
}

impl BatchOrchestrator {
    pub fn new(config: BatchConfig, factory: Arc<dyn StoreFactory>) -> Self {
        Self {
            config,
            factory,
            run_lock: Mutex::new(()),
        }
    }

    /// Runs one batch and summarises it. Never fails; errors become an
    /// `error` summary.
    pub async fn run(&self) -> BatchSummary {
        let _guard = self.run_lock.lock().await;
        info!(folder_id = %self.config.folder_id, "Starting batch run");

        match self.process().await {
            Ok(summary) => summary,
            Err(e) => {
                error!(folder_id = %self.config.folder_id, error = %e, "Batch run failed");
                BatchSummary::failed(&e)
            }
        }
    }

    async fn process(&self) -> Result<BatchSummary, BatchError> {
        let started = Instant::now();
        let stores = self.factory.connect().await?;

        let files = stores
            .source
            .list_folder(&self.config.folder_id)
            .await
            .map_err(|e| BatchError::Listing {
                folder_id: self.config.folder_id.clone(),
                source: e,
            })?;

        if files.is_empty() {
            info!(folder_id = %self.config.folder_id, "No files found in source folder");
            return Ok(BatchSummary::empty());
        }

        info!(count = files.len(), "Listed files to move");

        let unit = TransferUnit::new(
            stores.source,
            stores.destination,
            self.config.staging.clone(),
            self.config.transfer.clone(),
        );

        let mut stats = BatchStats {
            listed: files.len(),
            ..Default::default()
        };

        for file in &files {
            match unit.move_file(file).await {
                TransferOutcome::Success(moved) => {
                    stats.moved += 1;
                    stats.bytes += moved.bytes;
                }
                TransferOutcome::Failure(_) => {
                    // Already logged with its cause by the transfer unit
                    stats.failed += 1;
                }
            }
        }

        info!(
            listed = stats.listed,
            moved = stats.moved,
            failed = stats.failed,
            bytes = stats.bytes,
            duration_ms = started.elapsed().as_millis() as u64,
            "Batch run complete"
        );

        Ok(BatchSummary::completed(stats.moved))
    }
}

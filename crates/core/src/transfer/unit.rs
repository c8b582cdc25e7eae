//! Moves one file from the source store to the destination store.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::destination::{DestinationError, DestinationStore};
use crate::source::{FileDescriptor, SourceError, SourceStore};
use crate::staging::StagingArea;

use super::config::TransferConfig;
use super::types::{MovedFile, TransferError, TransferFailure, TransferOutcome};

/// Moves single files: download to staging, upload, then delete from source.
pub struct TransferUnit {
    source: Arc<dyn SourceStore>,
    destination: Arc<dyn DestinationStore>,
    staging: StagingArea,
    config: TransferConfig,
}

impl TransferUnit {
    pub fn new(
        source: Arc<dyn SourceStore>,
        destination: Arc<dyn DestinationStore>,
        staging: StagingArea,
        config: TransferConfig,
    ) -> Self {
        Self {
            source,
            destination,
            staging,
            config,
        }
    }

    /// Moves one file and reports the outcome.
    ///
    /// The source file is deleted only after the destination confirmed the
    /// upload. The staged copy is removed before this returns, whatever the
    /// outcome.
    pub async fn move_file(&self, file: &FileDescriptor) -> TransferOutcome {
        let started = Instant::now();

        match self.try_move(file).await {
            Ok(bytes) => {
                info!(
                    file_id = %file.id,
                    file_name = %file.name,
                    bytes,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "File moved"
                );
                TransferOutcome::Success(MovedFile {
                    file: file.clone(),
                    bytes,
                })
            }
            Err(e) => {
                if e.leaves_duplicate() {
                    error!(
                        file_id = %file.id,
                        file_name = %file.name,
                        error = %e,
                        "File uploaded but not deleted from source; it now exists in both stores"
                    );
                } else {
                    error!(
                        file_id = %file.id,
                        file_name = %file.name,
                        step = e.step().as_str(),
                        error = %e,
                        "Failed to move file"
                    );
                }
                TransferOutcome::Failure(TransferFailure {
                    file: file.clone(),
                    error: e,
                })
            }
        }
    }

    async fn try_move(&self, file: &FileDescriptor) -> Result<u64, TransferError> {
        let staged = self
            .staging
            .acquire(&file.name)
            .await
            .map_err(TransferError::Staging)?;

        let content = self
            .with_deadline(self.source.download(&file.id), || SourceError::Timeout)
            .await
            .map_err(TransferError::Download)?;
        staged.write(&content).await.map_err(TransferError::Staging)?;
        drop(content);

        let bytes = self
            .with_deadline(
                self.destination.upload(&file.name, staged.path()),
                || DestinationError::Timeout,
            )
            .await
            .map_err(TransferError::Upload)?;

        self.with_deadline(self.source.delete(&file.id), || SourceError::Timeout)
            .await
            .map_err(TransferError::SourceDelete)?;

        Ok(bytes)
    }

    /// Applies the configured per-step deadline, if any.
    async fn with_deadline<T, E>(
        &self,
        step: impl Future<Output = Result<T, E>>,
        on_timeout: impl FnOnce() -> E,
    ) -> Result<T, E> {
        match self.config.step_timeout {
            Some(limit) => tokio::time::timeout(limit, step)
                .await
                .unwrap_or_else(|_| Err(on_timeout())),
            None => step.await,
        }
    }
}

//! Types for the batch module.

use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::source::SourceError;
use crate::staging::StagingArea;
use crate::transfer::TransferConfig;

/// Message returned when the source folder has nothing to move.
pub const EMPTY_FOLDER_MESSAGE: &str = "No files found in source folder.";

/// Message returned when a run fails before any file is attempted.
pub const RUN_FAILED_MESSAGE: &str = "Failed to process files.";

/// Errors that end a batch run before per-file processing.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Store clients or credentials could not be set up.
    #[error("Failed to set up store clients: {0}")]
    ClientSetup(String),

    /// The source folder could not be listed.
    #[error("Failed to list source folder {folder_id}: {source}")]
    Listing {
        folder_id: String,
        #[source]
        source: SourceError,
    },

    /// The task running the batch stopped before producing a summary.
    #[error("Batch run interrupted: {0}")]
    Interrupted(String),
}

/// Terminal status of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Nothing to move.
    Ok,
    /// Files were listed and each was attempted.
    Success,
    /// The run failed before any file was attempted.
    Error,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Ok => "ok",
            BatchStatus::Success => "success",
            BatchStatus::Error => "error",
        }
    }
}

/// Result of one batch run.
///
/// Failed files are reported only through logs; `processed_count` counts
/// files that were fully moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub status: BatchStatus,
    pub processed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl BatchSummary {
    /// The source folder was empty.
    pub fn empty() -> Self {
        Self {
            status: BatchStatus::Ok,
            processed_count: 0,
            message: Some(EMPTY_FOLDER_MESSAGE.to_string()),
            details: None,
        }
    }

    /// Every listed file was attempted; `processed_count` of them moved.
    pub fn completed(processed_count: usize) -> Self {
        Self {
            status: BatchStatus::Success,
            processed_count,
            message: None,
            details: None,
        }
    }

    /// The run failed before per-file processing.
    pub fn failed(error: &BatchError) -> Self {
        Self {
            status: BatchStatus::Error,
            processed_count: 0,
            message: Some(RUN_FAILED_MESSAGE.to_string()),
            details: Some(error.to_string()),
        }
    }
}

/// Immutable settings for batch runs.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Source folder whose direct children are moved.
    pub folder_id: String,
    /// Where file bytes are staged between download and upload.
    pub staging: StagingArea,
    /// Per-file transfer settings.
    pub transfer: TransferConfig,
}

impl BatchConfig {
    pub fn new(folder_id: impl Into<String>, staging: StagingArea) -> Self {
        Self {
            folder_id: folder_id.into(),
            staging,
            transfer: TransferConfig::default(),
        }
    }

    pub fn with_transfer(mut self, transfer: TransferConfig) -> Self {
        self.transfer = transfer;
        self
    }

    pub fn with_staging(mut self, staging: StagingArea) -> Self {
        self.staging = staging;
        self
    }
}

impl From<&Config> for BatchConfig {
    fn from(config: &Config) -> Self {
        Self {
            folder_id: config.source.folder_id.clone(),
            staging: StagingArea::from_config(config.transfer.staging_dir.as_deref()),
            transfer: TransferConfig::from(&config.transfer),
        }
    }
}

/// Per-run counters, logged when a run finishes.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BatchStats {
    pub listed: usize,
    pub moved: usize,
    pub failed: usize,
    pub bytes: u64,
}

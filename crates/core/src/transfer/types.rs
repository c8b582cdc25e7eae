//! Types for the transfer module.

use thiserror::Error;

use crate::destination::DestinationError;
use crate::source::{FileDescriptor, SourceError};
use crate::staging::StagingError;

/// Cause of a failed file move.
///
/// Each variant names the step that failed. Only `SourceDelete` leaves the
/// file in both stores; every earlier failure leaves the source untouched.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Staging path could not be acquired or written.
    #[error("staging failed: {0}")]
    Staging(#[source] StagingError),

    /// Fetching the file content from the source store failed.
    #[error("download failed: {0}")]
    Download(#[source] SourceError),

    /// Writing the object to the destination store failed.
    #[error("upload failed: {0}")]
    Upload(#[source] DestinationError),

    /// The destination copy exists but the source file could not be deleted.
    #[error("source delete failed: {0}")]
    SourceDelete(#[source] SourceError),
}

impl TransferError {
    /// Step of the move that failed.
    pub fn step(&self) -> TransferStep {
        match self {
            Self::Staging(_) => TransferStep::Staging,
            Self::Download(_) => TransferStep::Download,
            Self::Upload(_) => TransferStep::Upload,
            Self::SourceDelete(_) => TransferStep::SourceDelete,
        }
    }

    /// Whether the file now exists in both stores.
    pub fn leaves_duplicate(&self) -> bool {
        matches!(self, Self::SourceDelete(_))
    }
}

/// Steps of a single file move, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStep {
    Staging,
    Download,
    Upload,
    SourceDelete,
}

impl TransferStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStep::Staging => "staging",
            TransferStep::Download => "download",
            TransferStep::Upload => "upload",
            TransferStep::SourceDelete => "source_delete",
        }
    }
}

/// A file that was moved to the destination and removed from the source.
#[derive(Debug, Clone)]
pub struct MovedFile {
    pub file: FileDescriptor,
    /// Bytes confirmed written to the destination.
    pub bytes: u64,
}

/// A file whose move failed, with the cause.
#[derive(Debug, Error)]
#[error("failed to move {} ({}): {error}", .file.name, .file.id)]
pub struct TransferFailure {
    pub file: FileDescriptor,
    #[source]
    pub error: TransferError,
}

/// Result of moving one file. Failures are values, never propagated errors.
#[derive(Debug)]
pub enum TransferOutcome {
    Success(MovedFile),
    Failure(TransferFailure),
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

//! Batch trigger handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use drivemove_core::{BatchError, BatchStatus, BatchSummary};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::state::AppState;

/// Response body for a batch run
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub status: BatchStatus,
    /// Files fully moved; only present on `success`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_files: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<BatchSummary> for TransferResponse {
    fn from(summary: BatchSummary) -> Self {
        let processed_files = match summary.status {
            BatchStatus::Success => Some(summary.processed_count),
            BatchStatus::Ok | BatchStatus::Error => None,
        };
        Self {
            status: summary.status,
            processed_files,
            message: summary.message,
            details: summary.details,
        }
    }
}

fn status_code(status: BatchStatus) -> StatusCode {
    match status {
        BatchStatus::Ok | BatchStatus::Success => StatusCode::OK,
        BatchStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// POST /file_transfer - run one batch over the source folder
///
/// The run is spawned so it finishes even if the caller disconnects.
pub async fn file_transfer(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let orchestrator = state.orchestrator();
    let summary = match tokio::spawn(async move { orchestrator.run().await }).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Batch run task failed");
            BatchSummary::failed(&BatchError::Interrupted(e.to_string()))
        }
    };
    let code = status_code(summary.status);
    (code, Json(TransferResponse::from(summary)))
}

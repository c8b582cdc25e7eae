//! Configuration for the transfer unit.

use std::time::Duration;

use crate::config::TransferSettings;

/// Per-file transfer behaviour.
#[derive(Debug, Clone, Default)]
pub struct TransferConfig {
    /// Deadline applied to each download, upload and delete call.
    /// `None` waits indefinitely.
    pub step_timeout: Option<Duration>,
}

impl TransferConfig {
    /// Sets the per-step deadline.
    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = Some(timeout);
        self
    }
}

impl From<&TransferSettings> for TransferConfig {
    fn from(settings: &TransferSettings) -> Self {
        Self {
            step_timeout: settings.step_timeout_secs.map(Duration::from_secs),
        }
    }
}

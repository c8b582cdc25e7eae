use drivemove_core::{BatchOrchestrator, Config, SanitizedConfig};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: Arc<BatchOrchestrator>,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Arc<BatchOrchestrator>) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    /// Shared handle to the orchestrator, for runs that outlive a request
    pub fn orchestrator(&self) -> Arc<BatchOrchestrator> {
        Arc::clone(&self.orchestrator)
    }
}

//! Store client construction.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::{Config, DestinationConfig, SourceConfig};
use crate::credentials::{create_token_provider, CredentialsError, TokenProvider};
use crate::destination::{DestinationStore, GcsClient};
use crate::source::{DriveClient, SourceStore};

use super::types::BatchError;

/// Store clients for one batch run.
#[derive(Clone)]
pub struct StoreHandles {
    pub source: Arc<dyn SourceStore>,
    pub destination: Arc<dyn DestinationStore>,
}

/// Yields usable store clients, or fails fast when it cannot.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    async fn connect(&self) -> Result<StoreHandles, BatchError>;
}

/// Builds Drive and Cloud Storage clients sharing one token provider.
pub struct GoogleStoreFactory {
    source: SourceConfig,
    destination: DestinationConfig,
    tokens: Arc<dyn TokenProvider>,
}

impl GoogleStoreFactory {
    pub fn new(
        source: SourceConfig,
        destination: DestinationConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            source,
            destination,
            tokens,
        }
    }

    /// Create a factory from the full configuration.
    pub fn from_config(config: &Config) -> Result<Self, CredentialsError> {
        let tokens = create_token_provider(&config.credentials)?;
        Ok(Self::new(
            config.source.clone(),
            config.destination.clone(),
            tokens,
        ))
    }
}

#[async_trait]
impl StoreFactory for GoogleStoreFactory {
    async fn connect(&self) -> Result<StoreHandles, BatchError> {
        // Fetch a token up front so unusable credentials fail the run here
        self.tokens
            .access_token()
            .await
            .map_err(|e| BatchError::ClientSetup(e.to_string()))?;
        debug!(method = self.tokens.method_name(), "Obtained access token");

        let source = DriveClient::new(&self.source, Arc::clone(&self.tokens))
            .map_err(|e| BatchError::ClientSetup(e.to_string()))?;
        let destination = GcsClient::new(&self.destination, Arc::clone(&self.tokens))
            .map_err(|e| BatchError::ClientSetup(e.to_string()))?;

        Ok(StoreHandles {
            source: Arc::new(source),
            destination: Arc::new(destination),
        })
    }
}

//! Ambient service account credentials from the metadata server.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::{CredentialsError, TokenProvider};

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// Tokens are refreshed this long before they expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Token provider backed by the GCE / Cloud Run metadata server.
///
/// Tokens are cached until shortly before they expire.
pub struct MetadataTokenProvider {
    client: Client,
    base_url: String,
    cached: Arc<RwLock<Option<CachedToken>>>,
}

impl MetadataTokenProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CredentialsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CredentialsError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            cached: Arc::new(RwLock::new(None)),
        })
    }

    fn token_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), TOKEN_PATH)
    }

    async fn fetch_token(&self) -> Result<CachedToken, CredentialsError> {
        let response = self
            .client
            .get(self.token_url())
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| CredentialsError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialsError::Rejected {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| CredentialsError::InvalidResponse(e.to_string()))?;

        if parsed.access_token.is_empty() {
            return Err(CredentialsError::InvalidResponse(
                "empty access_token".to_string(),
            ));
        }

        debug!(expires_in = parsed.expires_in, "Fetched metadata server token");

        Ok(CachedToken {
            token: parsed.access_token,
            expires_at: Utc::now() + TimeDelta::seconds(parsed.expires_in.max(0)),
        })
    }
}

fn is_fresh(token: &CachedToken) -> bool {
    token.expires_at - TimeDelta::seconds(EXPIRY_MARGIN_SECS) > Utc::now()
}

#[async_trait]
impl TokenProvider for MetadataTokenProvider {
    async fn access_token(&self) -> Result<String, CredentialsError> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            if is_fresh(cached) {
                return Ok(cached.token.clone());
            }
        }

        let mut cached = self.cached.write().await;
        // Another caller may have refreshed while we waited for the lock
        if let Some(existing) = cached.as_ref() {
            if is_fresh(existing) {
                return Ok(existing.token.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    fn method_name(&self) -> &'static str {
        "metadata"
    }
}

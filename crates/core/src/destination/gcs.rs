//! Google Cloud Storage destination store.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Deserialize;
use tracing::debug;

use crate::config::DestinationConfig;
use crate::credentials::TokenProvider;

use super::{DestinationError, DestinationStore};

/// Cloud Storage JSON API client bound to one bucket.
pub struct GcsClient {
    client: Client,
    base_url: String,
    bucket: String,
    tokens: Arc<dyn TokenProvider>,
}

impl GcsClient {
    /// Create a new client for the configured bucket.
    pub fn new(
        config: &DestinationConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, DestinationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| DestinationError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            tokens,
        })
    }

    fn upload_url(&self, key: &str) -> String {
        format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.base_url,
            urlencoding::encode(&self.bucket),
            urlencoding::encode(key)
        )
    }
}

/// Subset of the object resource returned after an upload.
#[derive(Debug, Deserialize)]
struct ObjectResource {
    /// Object size, serialized by the API as a decimal string.
    #[serde(default)]
    size: Option<String>,
}

#[async_trait]
impl DestinationStore for GcsClient {
    fn name(&self) -> &str {
        "google_cloud_storage"
    }

    async fn upload(&self, key: &str, path: &Path) -> Result<u64, DestinationError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DestinationError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        let expected = bytes.len() as u64;

        let token = self
            .tokens
            .access_token()
            .await
            .map_err(|e| DestinationError::Credentials(e.to_string()))?;

        let response = self
            .client
            .post(self.upload_url(key))
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DestinationError::Timeout
                } else if e.is_connect() {
                    DestinationError::ConnectionFailed(e.to_string())
                } else {
                    DestinationError::Internal(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DestinationError::Api {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        // A body we cannot parse still means the write was accepted
        let object: Option<ObjectResource> = response.json().await.ok();
        if let Some(actual) = object
            .and_then(|o| o.size)
            .and_then(|s| s.parse::<u64>().ok())
        {
            if actual != expected {
                return Err(DestinationError::SizeMismatch {
                    key: key.to_string(),
                    expected,
                    actual,
                });
            }
        }

        debug!(bucket = %self.bucket, key, bytes = expected, "Uploaded object");
        Ok(expected)
    }
}

//! Google Drive v3 source store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::SourceConfig;
use crate::credentials::TokenProvider;

use super::{FileDescriptor, SourceError, SourceStore};

/// Fields requested from files.list; everything else is dropped by the API.
const LIST_FIELDS: &str = "nextPageToken,files(id,name)";

/// Drive REST client.
pub struct DriveClient {
    client: Client,
    base_url: String,
    page_size: u32,
    tokens: Arc<dyn TokenProvider>,
}

impl DriveClient {
    /// Create a new Drive client.
    pub fn new(config: &SourceConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| SourceError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
            tokens,
        })
    }

    fn files_url(&self) -> String {
        format!("{}/drive/v3/files", self.base_url)
    }

    fn file_url(&self, file_id: &str) -> String {
        format!(
            "{}/drive/v3/files/{}",
            self.base_url,
            urlencoding::encode(file_id)
        )
    }

    /// Attach the bearer token and send.
    async fn send(
        &self,
        request: RequestBuilder,
        file_id: Option<&str>,
    ) -> Result<Response, SourceError> {
        let token = self
            .tokens
            .access_token()
            .await
            .map_err(|e| SourceError::Credentials(e.to_string()))?;

        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = file_id {
                return Err(SourceError::NotFound(id.to_string()));
            }
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(response)
    }
}

fn map_request_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else if e.is_connect() {
        SourceError::ConnectionFailed(e.to_string())
    } else {
        SourceError::Internal(e.to_string())
    }
}

/// Builds the files.list query for direct, non-trashed children of a folder.
fn folder_query(folder_id: &str) -> String {
    let escaped = folder_id.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}' in parents and trashed=false", escaped)
}

/// Drive files.list response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileListResponse {
    #[serde(default)]
    files: Vec<DriveFile>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

#[async_trait]
impl SourceStore for DriveClient {
    fn name(&self) -> &str {
        "google_drive"
    }

    async fn list_folder(&self, folder_id: &str) -> Result<Vec<FileDescriptor>, SourceError> {
        let query = folder_query(folder_id);
        let page_size = self.page_size.to_string();
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("q", query.as_str()),
                ("fields", LIST_FIELDS),
                ("pageSize", page_size.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let request = self.client.get(self.files_url()).query(&params);
            let page: FileListResponse = self
                .send(request, None)
                .await?
                .json()
                .await
                .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

            debug!(count = page.files.len(), "Fetched Drive listing page");
            files.extend(
                page.files
                    .into_iter()
                    .map(|f| FileDescriptor::new(f.id, f.name)),
            );

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(files)
    }

    async fn download(&self, file_id: &str) -> Result<Vec<u8>, SourceError> {
        let request = self
            .client
            .get(self.file_url(file_id))
            .query(&[("alt", "media")]);

        let bytes = self
            .send(request, Some(file_id))
            .await?
            .bytes()
            .await
            .map_err(map_request_error)?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, file_id: &str) -> Result<(), SourceError> {
        let request = self.client.delete(self.file_url(file_id));
        self.send(request, Some(file_id)).await?;
        Ok(())
    }
}

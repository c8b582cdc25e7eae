use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub destination: DestinationConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub transfer: TransferSettings,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Google Drive folder the files are moved out of
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Drive folder ID whose direct children are moved
    pub folder_id: String,
    /// Drive API base URL (overridable for tests)
    #[serde(default = "default_drive_url")]
    pub api_url: String,
    /// Files requested per listing page (Drive caps this at 1000)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_source_timeout")]
    pub timeout_secs: u32,
}

fn default_drive_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_source_timeout() -> u32 {
    60
}

/// Cloud Storage bucket the files are moved into
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DestinationConfig {
    /// Bucket name
    pub bucket: String,
    /// Cloud Storage API base URL (overridable for tests)
    #[serde(default = "default_storage_url")]
    pub api_url: String,
    /// Request timeout in seconds (default: 300)
    #[serde(default = "default_destination_timeout")]
    pub timeout_secs: u32,
}

fn default_storage_url() -> String {
    "https://storage.googleapis.com".to_string()
}

fn default_destination_timeout() -> u32 {
    300
}

/// How access tokens for the Google APIs are obtained
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub method: CredentialsMethod,
    /// Bearer token (required when method = "static")
    #[serde(default)]
    pub token: Option<String>,
    /// Metadata server base URL (used when method = "metadata")
    #[serde(default = "default_metadata_url")]
    pub metadata_url: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            method: CredentialsMethod::default(),
            token: None,
            metadata_url: default_metadata_url(),
        }
    }
}

fn default_metadata_url() -> String {
    "http://metadata.google.internal".to_string()
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CredentialsMethod {
    /// Service account token from the GCE/Cloud Run metadata server.
    #[default]
    Metadata,
    /// Fixed bearer token from configuration.
    Static,
}

/// Per-file transfer settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TransferSettings {
    /// Directory for staged file bytes (OS temp dir when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging_dir: Option<PathBuf>,
    /// Deadline for each download/upload/delete step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_timeout_secs: Option<u64>,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub destination: DestinationConfig,
    pub credentials: SanitizedCredentialsConfig,
    pub transfer: TransferSettings,
}

/// Sanitized credentials config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedCredentialsConfig {
    pub method: CredentialsMethod,
    pub token_configured: bool,
    pub metadata_url: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            source: config.source.clone(),
            destination: config.destination.clone(),
            credentials: SanitizedCredentialsConfig {
                method: config.credentials.method,
                token_configured: config
                    .credentials
                    .token
                    .as_ref()
                    .is_some_and(|t| !t.is_empty()),
                metadata_url: config.credentials.metadata_url.clone(),
            },
            transfer: config.transfer.clone(),
        }
    }
}

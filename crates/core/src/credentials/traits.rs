use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("Credentials not configured: {0}")]
    NotConfigured(String),

    #[error("Token endpoint unavailable: {0}")]
    Unavailable(String),

    #[error("Token endpoint returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid token response: {0}")]
    InvalidResponse(String),
}

/// Source of OAuth2 bearer tokens for the Google APIs.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a currently valid access token.
    async fn access_token(&self) -> Result<String, CredentialsError>;

    /// Name of this credential source
    fn method_name(&self) -> &'static str;
}

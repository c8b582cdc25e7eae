//! Fixed bearer token credentials.

use async_trait::async_trait;

use super::{CredentialsError, TokenProvider};

/// Token provider that always returns the configured token.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, CredentialsError> {
        if self.token.is_empty() {
            return Err(CredentialsError::NotConfigured(
                "static token is empty".to_string(),
            ));
        }
        Ok(self.token.clone())
    }

    fn method_name(&self) -> &'static str {
        "static"
    }
}

//! Access tokens for the Google APIs.

mod metadata;
mod static_token;
mod traits;

pub use metadata::MetadataTokenProvider;
pub use static_token::StaticTokenProvider;
pub use traits::*;

use std::sync::Arc;

use crate::config::{CredentialsConfig, CredentialsMethod};

/// Factory function to create a token provider from config
pub fn create_token_provider(
    config: &CredentialsConfig,
) -> Result<Arc<dyn TokenProvider>, CredentialsError> {
    match config.method {
        CredentialsMethod::Metadata => {
            Ok(Arc::new(MetadataTokenProvider::new(config.metadata_url.clone())?))
        }
        CredentialsMethod::Static => {
            let token = config.token.clone().ok_or_else(|| {
                CredentialsError::NotConfigured(
                    "token must be set when using static credentials".to_string(),
                )
            })?;
            Ok(Arc::new(StaticTokenProvider::new(token)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_metadata_provider() {
        let provider = create_token_provider(&CredentialsConfig::default()).unwrap();
        assert_eq!(provider.method_name(), "metadata");
    }

    #[test]
    fn test_create_static_provider() {
        let config = CredentialsConfig {
            method: CredentialsMethod::Static,
            token: Some("secret".to_string()),
            ..Default::default()
        };
        let provider = create_token_provider(&config).unwrap();
        assert_eq!(provider.method_name(), "static");
    }

    #[test]
    fn test_create_static_provider_missing_token() {
        let config = CredentialsConfig {
            method: CredentialsMethod::Static,
            token: None,
            ..Default::default()
        };
        let result = create_token_provider(&config);
        assert!(matches!(result, Err(CredentialsError::NotConfigured(_))));
    }
}

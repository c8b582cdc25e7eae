use super::{
    types::{Config, CredentialsMethod},
    ConfigError,
};

/// Largest page size the Drive files.list endpoint accepts.
const MAX_PAGE_SIZE: u32 = 1000;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Source folder and destination bucket are set
/// - Static credentials carry a token
/// - Page size and timeouts are in range
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.source.folder_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "source.folder_id cannot be empty".to_string(),
        ));
    }

    if config.source.page_size == 0 || config.source.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::ValidationError(format!(
            "source.page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    if config.source.timeout_secs == 0 || config.destination.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.destination.bucket.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "destination.bucket cannot be empty".to_string(),
        ));
    }

    if config.credentials.method == CredentialsMethod::Static
        && config
            .credentials
            .token
            .as_ref()
            .is_none_or(|t| t.is_empty())
    {
        return Err(ConfigError::ValidationError(
            "credentials.token is required when credentials.method = \"static\"".to_string(),
        ));
    }

    if config.transfer.step_timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "transfer.step_timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

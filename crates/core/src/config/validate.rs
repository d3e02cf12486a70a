use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - API base URL is non-empty and absolute
/// - Timeouts are nonzero
/// - Page size is nonzero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // API validation
    if config.api.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "api.base_url cannot be empty".to_string(),
        ));
    }
    if !config.api.base_url.starts_with("http://") && !config.api.base_url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "api.base_url must be an http(s) URL, got '{}'",
            config.api.base_url
        )));
    }
    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "api.timeout_secs cannot be 0".to_string(),
        ));
    }

    // Download validation
    if config.download.connect_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "download.connect_timeout_secs cannot be 0".to_string(),
        ));
    }

    // Display validation
    if config.display.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "display.page_size cannot be 0".to_string(),
        ));
    }

    Ok(())
}

use crate::config::types::{Config, CrawlerConfig, EnrichmentConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Placeholder substituted with the target host in the enrichment endpoint
pub const HOST_PLACEHOLDER: &str = "{host}";

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_enrichment_config(&config.enrichment)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.expansion_concurrency < 1 || config.expansion_concurrency > 64 {
        return Err(ConfigError::Validation(format!(
            "expansion_concurrency must be between 1 and 64, got {}",
            config.expansion_concurrency
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.pool.is_empty() {
        return Err(ConfigError::Validation(
            "user agent pool cannot be empty".to_string(),
        ));
    }

    if let Some(index) = config.pool.iter().position(|ua| ua.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "user agent pool entry {} is blank",
            index
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.spill_threshold < 1 {
        return Err(ConfigError::Validation(format!(
            "spill_threshold must be >= 1, got {}",
            config.spill_threshold
        )));
    }

    Ok(())
}

/// Validates the enrichment endpoint template
fn validate_enrichment_config(config: &EnrichmentConfig) -> Result<(), ConfigError> {
    if !config.endpoint.contains(HOST_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "enrichment endpoint must contain '{}', got '{}'",
            HOST_PLACEHOLDER, config.endpoint
        )));
    }

    let sample = config.endpoint.replace(HOST_PLACEHOLDER, "example.com");
    let url = Url::parse(&sample)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid enrichment endpoint: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "enrichment endpoint must use http or https, got '{}'",
            url.scheme()
        )));
    }

    Ok(())
}

use crate::config::types::{
    Config, CrawlerConfig, InferenceConfig, OutputConfig, SummarizerConfig, UserAgentConfig,
    MAX_DELAY_SECS,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration, including the seed URLs
///
/// This is the gate in front of the pipeline: nothing is fetched until it passes.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_seeds(&config.seeds)?;
    validate_settings(config)
}

/// Validates every section except the seed list
pub(crate) fn validate_settings(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_inference_config(&config.inference)?;
    validate_summarizer_config(&config.summarizer)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates seed URLs: at least one, each an absolute http(s) URL with a host
fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Seed URL '{}' must use http or https",
                seed
            )));
        }

        if url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "Seed URL '{}' has no host",
                seed
            )));
        }
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if !config.delay.is_finite() || config.delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay must be a non-negative number of seconds, got {}",
            config.delay
        )));
    }

    if config.delay > MAX_DELAY_SECS {
        return Err(ConfigError::Validation(format!(
            "delay must be at most {}s, got {}s",
            MAX_DELAY_SECS, config.delay
        )));
    }

    if config.timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1s, got {}s",
            config.timeout
        )));
    }

    if config.max_redirects < 1 {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be >= 1, got {}",
            config.max_redirects
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    if !config.contact_email.is_empty() {
        validate_email(&config.contact_email)?;
    }

    Ok(())
}

/// Validates hierarchy inference thresholds
fn validate_inference_config(config: &InferenceConfig) -> Result<(), ConfigError> {
    if !(config.h1_page_fraction > 0.0 && config.h1_page_fraction <= 1.0) {
        return Err(ConfigError::Validation(format!(
            "h1_page_fraction must be in (0, 1], got {}",
            config.h1_page_fraction
        )));
    }

    if config.max_name_length < 1 {
        return Err(ConfigError::Validation(
            "max_name_length must be >= 1".to_string(),
        ));
    }

    if config.min_name_length > config.max_name_length {
        return Err(ConfigError::Validation(format!(
            "min_name_length ({}) must not exceed max_name_length ({})",
            config.min_name_length, config.max_name_length
        )));
    }

    Ok(())
}

/// Validates summarizer parameters
fn validate_summarizer_config(config: &SummarizerConfig) -> Result<(), ConfigError> {
    if config.max_sentences < 1 {
        return Err(ConfigError::Validation(
            "max_sentences must be >= 1".to_string(),
        ));
    }

    if config.max_chars < 1 {
        return Err(ConfigError::Validation("max_chars must be >= 1".to_string()));
    }

    if config.min_sentence_length > config.max_sentence_length {
        return Err(ConfigError::Validation(format!(
            "min_sentence_length ({}) cannot exceed max_sentence_length ({})",
            config.min_sentence_length, config.max_sentence_length
        )));
    }

    if !(0.0..=1.0).contains(&config.similarity_threshold) {
        return Err(ConfigError::Validation(format!(
            "similarity_threshold must be in [0, 1], got {}",
            config.similarity_threshold
        )));
    }

    if !config.position_weight.is_finite() || config.position_weight < 0.0 {
        return Err(ConfigError::Validation(format!(
            "position_weight must be a non-negative number, got {}",
            config.position_weight
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

use crate::config::types::{Config, CrawlerConfig, HttpConfig, OutputConfig, SpellingConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_spelling_config(&config.spelling)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_pages == 0 is allowed: it produces an empty report without fetching

    if config.max_workers < 1 || config.max_workers > 100 {
        return Err(ConfigError::Validation(format!(
            "max_workers must be between 1 and 100, got {}",
            config.max_workers
        )));
    }

    if config.politeness_delay < 100 {
        return Err(ConfigError::Validation(format!(
            "politeness_delay must be >= 100ms, got {}ms",
            config.politeness_delay
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // Header values must be visible ASCII
    if !config
        .user_agent
        .chars()
        .all(|c| c.is_ascii_graphic() || c == ' ')
    {
        return Err(ConfigError::Validation(format!(
            "user_agent must contain only printable ASCII characters, got '{}'",
            config.user_agent
        )));
    }

    for (name, value) in [
        ("page_timeout", config.page_timeout),
        ("link_check_timeout", config.link_check_timeout),
        ("robots_timeout", config.robots_timeout),
    ] {
        if value < 1 {
            return Err(ConfigError::Validation(format!(
                "{} must be >= 1s, got {}s",
                name, value
            )));
        }
    }

    Ok(())
}

/// Validates spell-checking configuration
fn validate_spelling_config(config: &SpellingConfig) -> Result<(), ConfigError> {
    if config.dictionary_path.as_deref() == Some("") {
        return Err(ConfigError::Validation(
            "dictionary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }

    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    if config.report_path == config.summary_path {
        return Err(ConfigError::Validation(format!(
            "report_path and summary_path must differ, both are '{}'",
            config.report_path
        )));
    }

    Ok(())
}

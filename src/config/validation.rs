use crate::config::types::{Config, DEFAULT_MAX_WORKERS, DEFAULT_USER_AGENT};
use crate::{ConfigError, ConfigResult};
use reqwest::header::HeaderValue;

/// Fills in unset fields with their defaults
///
/// A worker count of zero becomes [`DEFAULT_MAX_WORKERS`]; an empty user agent
/// becomes [`DEFAULT_USER_AGENT`]. Negative worker counts are left alone so
/// that [`validate`] rejects them.
pub fn apply_defaults(config: &mut Config) {
    if config.max_workers == 0 {
        config.max_workers = DEFAULT_MAX_WORKERS;
    }

    if config.user_agent.trim().is_empty() {
        config.user_agent = DEFAULT_USER_AGENT.to_string();
    }
}

/// Validates the entire configuration
///
/// Expects defaults to have been applied already.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_max_workers(config.max_workers)?;
    validate_user_agent(&config.user_agent)?;
    Ok(())
}

fn validate_max_workers(max_workers: i64) -> ConfigResult<()> {
    if max_workers < 1 {
        return Err(ConfigError::Validation(format!(
            "max_workers must be above 0, got {}",
            max_workers
        )));
    }

    Ok(())
}

fn validate_user_agent(user_agent: &str) -> ConfigResult<()> {
    if user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // Must be sendable as a header value
    HeaderValue::from_str(user_agent).map_err(|e| {
        ConfigError::Validation(format!("Invalid user_agent '{}': {}", user_agent, e))
    })?;

    Ok(())
}

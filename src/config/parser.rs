use crate::config::types::Config;
use crate::config::validation::{apply_defaults, validate};
use crate::ConfigResult;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded configuration, with defaults applied
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use smap::config::load_config;
///
/// let config = load_config(Path::new("smap.toml")).unwrap();
/// println!("User agent: {}", config.user_agent);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses configuration from TOML text, applying defaults and validating
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let mut config: Config = toml::from_str(content)?;

    apply_defaults(&mut config);
    validate(&config)?;

    Ok(config)
}

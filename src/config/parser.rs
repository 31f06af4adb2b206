use crate::config::types::{Config, Settings};
use crate::config::validation::{validate, validate_settings};
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use friend_sift::config::load_config;
///
/// let config = load_config(Path::new("friend-sift.toml")).unwrap();
/// println!("Page size: {}", config.api.page_size);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads saved settings, falling back to defaults when the file does not exist
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Stored settings, or defaults (threshold 3, max age 0)
/// * `Err(ConfigError)` - The file exists but could not be read or parsed
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(e) => return Err(e.into()),
    };

    let settings: Settings = toml::from_str(&content)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Writes settings to disk, replacing any previous file
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    validate_settings(settings)?;
    let content = toml::to_string(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

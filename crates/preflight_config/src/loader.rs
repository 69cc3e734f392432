//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::io::ErrorKind;
use std::path::Path;

/// The configuration file name discovered in a directory.
pub const CONFIG_FILE_NAME: &str = "preflight.toml";

/// Loads and validates `preflight.toml` from a directory.
pub fn load_config(dir: &Path) -> Result<ProjectConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Loads `preflight.toml` from a directory, or returns the defaults if the
/// directory has none. Any other read failure is still an error.
pub fn load_config_or_default(dir: &Path) -> Result<ProjectConfig, ConfigError> {
    match load_config(dir) {
        Err(ConfigError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
            Ok(ProjectConfig::default())
        }
        other => other,
    }
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.cluster.target_version.is_some() && config.cluster.current_version.is_none() {
        return Err(ConfigError::MissingField(
            "cluster.current_version".to_string(),
        ));
    }
    if let (Some(current), Some(target)) =
        (config.cluster.current_version, config.cluster.target_version)
    {
        if target < current {
            return Err(ConfigError::ValidationError(format!(
                "cluster.target_version {target} is older than cluster.current_version {current}"
            )));
        }
    }
    if config.run.workers == Some(0) {
        return Err(ConfigError::ValidationError(
            "run.workers must be greater than 0".to_string(),
        ));
    }
    if config.run.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "run.timeout_secs must be greater than 0".to_string(),
        ));
    }
    if config.run.pattern.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "run.pattern must not be empty".to_string(),
        ));
    }
    if let Some(index) = config.checks.skip.iter().position(|p| p.trim().is_empty()) {
        return Err(ConfigError::ValidationError(format!(
            "checks.skip[{index}] must not be empty"
        )));
    }
    Ok(())
}

//! Configuration file handling for ~/.nearby-photos/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::{ENV_BACKEND_URL, ENV_ENVIRONMENT};
use super::settings::ConfigFile;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFileError {
    pub(crate) fn invalid(section: &str, key: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl ConfigFile {
    /// Load configuration from the default path (~/.nearby-photos/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.nearby-photos/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Apply `BACKEND_URL` and `NEARBY_PHOTOS_ENV` from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigFileError> {
        self.apply_overrides_with(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides_with<F>(&mut self, lookup: F) -> Result<(), ConfigFileError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
            self.backend.url = Some(url.trim().to_string());
        }
        if let Some(env) = lookup(ENV_ENVIRONMENT).filter(|v| !v.trim().is_empty()) {
            self.backend.environment = env
                .parse()
                .map_err(|reason| ConfigFileError::invalid("backend", ENV_ENVIRONMENT, &env, reason))?;
        }
        Ok(())
    }
}

/// Get the path to the config directory (~/.nearby-photos).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nearby-photos")
}

/// Get the path to the config file (~/.nearby-photos/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, DEFAULT_LOG_FILE};
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert!(config.backend.url.is_none());
        assert_eq!(config.backend.environment, Environment::Development);
        assert_eq!(config.network.timeout_ms, 15_000);
        assert_eq!(config.network.retry_attempts, 3);
        assert_eq!(config.network.retry_delay_ms, 1_000);
        assert_eq!(config.position.timeout_ms, 15_000);
        assert_eq!(config.position.maximum_age_ms, 10_000);
        assert!(config.position.high_accuracy);
        assert_eq!(config.logging.file, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.backend.url = Some("https://photos.example.com".to_string());
        config.backend.environment = Environment::Production;
        config.network.retry_attempts = 5;
        config.position.latitude = Some(48.8566);
        config.position.longitude = Some(2.3522);
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BACKEND_URL", "http://staging.example.com:9000"),
            ("NEARBY_PHOTOS_ENV", "production"),
        ]
        .into_iter()
        .collect();

        let mut config = ConfigFile::default();
        config
            .apply_overrides_with(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(
            config.backend.url.as_deref(),
            Some("http://staging.example.com:9000")
        );
        assert_eq!(config.backend.environment, Environment::Production);
    }

    #[test]
    fn test_empty_env_override_ignored() {
        let mut config = ConfigFile::default();
        config.backend.url = Some("http://configured".to_string());

        config
            .apply_overrides_with(|_| Some("  ".to_string()))
            .unwrap();

        assert_eq!(config.backend.url.as_deref(), Some("http://configured"));
    }

    #[test]
    fn test_invalid_env_override() {
        let mut config = ConfigFile::default();
        let result = config.apply_overrides_with(|name| {
            (name == "NEARBY_PHOTOS_ENV").then(|| "staging".to_string())
        });

        assert!(matches!(result, Err(ConfigFileError::InvalidValue { .. })));
    }

    #[test]
    fn test_config_file_path() {
        let path = config_file_path();
        assert!(path.ends_with(".nearby-photos/config.ini"));
    }
}

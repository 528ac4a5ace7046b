//! Configuration key access and validation.
//!
//! Type-safe get/set of configuration values by `section.key` name, used by
//! the `config` CLI commands.

use std::str::FromStr;
use thiserror::Error;

use super::parser::{expand_tilde, optional_string, parse_bool};
use super::settings::ConfigFile;
use crate::coord::{MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    BackendUrl,
    BackendEnvironment,

    NetworkTimeoutMs,
    NetworkRetryAttempts,
    NetworkRetryDelayMs,

    PositionTimeoutMs,
    PositionMaximumAgeMs,
    PositionHighAccuracy,
    PositionLatitude,
    PositionLongitude,

    LoggingDirectory,
    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s.to_lowercase())
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "backend.url").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::BackendUrl => "backend.url",
            ConfigKey::BackendEnvironment => "backend.environment",
            ConfigKey::NetworkTimeoutMs => "network.timeout_ms",
            ConfigKey::NetworkRetryAttempts => "network.retry_attempts",
            ConfigKey::NetworkRetryDelayMs => "network.retry_delay_ms",
            ConfigKey::PositionTimeoutMs => "position.timeout_ms",
            ConfigKey::PositionMaximumAgeMs => "position.maximum_age_ms",
            ConfigKey::PositionHighAccuracy => "position.high_accuracy",
            ConfigKey::PositionLatitude => "position.latitude",
            ConfigKey::PositionLongitude => "position.longitude",
            ConfigKey::LoggingDirectory => "logging.directory",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "backend").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "url").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::BackendUrl => config.backend.url.clone().unwrap_or_default(),
            ConfigKey::BackendEnvironment => config.backend.environment.to_string(),
            ConfigKey::NetworkTimeoutMs => config.network.timeout_ms.to_string(),
            ConfigKey::NetworkRetryAttempts => config.network.retry_attempts.to_string(),
            ConfigKey::NetworkRetryDelayMs => config.network.retry_delay_ms.to_string(),
            ConfigKey::PositionTimeoutMs => config.position.timeout_ms.to_string(),
            ConfigKey::PositionMaximumAgeMs => config.position.maximum_age_ms.to_string(),
            ConfigKey::PositionHighAccuracy => config.position.high_accuracy.to_string(),
            ConfigKey::PositionLatitude => config
                .position
                .latitude
                .map(|v| v.to_string())
                .unwrap_or_default(),
            ConfigKey::PositionLongitude => config
                .position
                .longitude
                .map(|v| v.to_string())
                .unwrap_or_default(),
            ConfigKey::LoggingDirectory => config.logging.directory.to_string_lossy().into_owned(),
            ConfigKey::LoggingFile => config.logging.file.clone(),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value against the key's rules before setting.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;
        let value = value.trim();
        let invalid = |reason: &str| ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason: reason.to_string(),
        };

        match self {
            ConfigKey::BackendUrl => config.backend.url = optional_string(value),
            ConfigKey::BackendEnvironment => {
                config.backend.environment = value.parse().map_err(|r: String| invalid(&r))?;
            }
            ConfigKey::NetworkTimeoutMs => {
                config.network.timeout_ms = value.parse().map_err(|_| invalid(INTEGER))?;
            }
            ConfigKey::NetworkRetryAttempts => {
                config.network.retry_attempts = value.parse().map_err(|_| invalid(INTEGER))?;
            }
            ConfigKey::NetworkRetryDelayMs => {
                config.network.retry_delay_ms = value.parse().map_err(|_| invalid(INTEGER))?;
            }
            ConfigKey::PositionTimeoutMs => {
                config.position.timeout_ms = value.parse().map_err(|_| invalid(INTEGER))?;
            }
            ConfigKey::PositionMaximumAgeMs => {
                config.position.maximum_age_ms = value.parse().map_err(|_| invalid(INTEGER))?;
            }
            ConfigKey::PositionHighAccuracy => {
                config.position.high_accuracy = parse_bool(value).ok_or_else(|| invalid(BOOLEAN))?;
            }
            ConfigKey::PositionLatitude => {
                config.position.latitude = optional_degrees(value).map_err(|_| invalid(NUMBER))?;
            }
            ConfigKey::PositionLongitude => {
                config.position.longitude = optional_degrees(value).map_err(|_| invalid(NUMBER))?;
            }
            ConfigKey::LoggingDirectory => config.logging.directory = expand_tilde(value),
            ConfigKey::LoggingFile => config.logging.file = value.to_string(),
        }
        Ok(())
    }

    /// Validate a value against this key's rules.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value.trim())
            .map_err(|reason| ConfigKeyError::ValidationFailed {
                key: self.name().to_string(),
                reason,
            })
    }

    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::BackendUrl => Box::new(OptionalUrlSpec),
            ConfigKey::BackendEnvironment => {
                Box::new(OneOfSpec::new(&["development", "production"]))
            }
            ConfigKey::NetworkTimeoutMs => Box::new(PositiveIntegerSpec),
            ConfigKey::NetworkRetryAttempts => Box::new(NonNegativeIntegerSpec),
            ConfigKey::NetworkRetryDelayMs => Box::new(NonNegativeIntegerSpec),
            ConfigKey::PositionTimeoutMs => Box::new(PositiveIntegerSpec),
            ConfigKey::PositionMaximumAgeMs => Box::new(NonNegativeIntegerSpec),
            ConfigKey::PositionHighAccuracy => Box::new(BooleanSpec),
            ConfigKey::PositionLatitude => Box::new(OptionalRangeSpec::new(MIN_LAT, MAX_LAT)),
            ConfigKey::PositionLongitude => Box::new(OptionalRangeSpec::new(MIN_LNG, MAX_LNG)),
            ConfigKey::LoggingDirectory => Box::new(NonEmptySpec),
            ConfigKey::LoggingFile => Box::new(NonEmptySpec),
        }
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::BackendUrl,
            ConfigKey::BackendEnvironment,
            ConfigKey::NetworkTimeoutMs,
            ConfigKey::NetworkRetryAttempts,
            ConfigKey::NetworkRetryDelayMs,
            ConfigKey::PositionTimeoutMs,
            ConfigKey::PositionMaximumAgeMs,
            ConfigKey::PositionHighAccuracy,
            ConfigKey::PositionLatitude,
            ConfigKey::PositionLongitude,
            ConfigKey::LoggingDirectory,
            ConfigKey::LoggingFile,
        ]
    }
}

const INTEGER: &str = "must be a non-negative integer";
const BOOLEAN: &str = "must be true/false, yes/no, 1/0, or on/off";
const NUMBER: &str = "must be a number";

fn optional_degrees(value: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    if value.is_empty() {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

// ============================================================================
// Value rules
// ============================================================================

trait ValueSpecification {
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

struct OneOfSpec {
    options: &'static [&'static str],
}

impl OneOfSpec {
    fn new(options: &'static [&'static str]) -> Self {
        Self { options }
    }
}

impl ValueSpecification for OneOfSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        let lower = value.to_lowercase();
        if self.options.iter().any(|opt| *opt == lower) {
            Ok(())
        } else {
            Err(format!("must be one of: {}", self.options.join(", ")))
        }
    }
}

struct PositiveIntegerSpec;

impl ValueSpecification for PositiveIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err("must be a positive integer".to_string()),
        }
    }
}

struct NonNegativeIntegerSpec;

impl ValueSpecification for NonNegativeIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        value
            .parse::<u32>()
            .map(|_| ())
            .map_err(|_| INTEGER.to_string())
    }
}

struct BooleanSpec;

impl ValueSpecification for BooleanSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        parse_bool(value).map(|_| ()).ok_or_else(|| BOOLEAN.to_string())
    }
}

/// Empty clears the value.
struct OptionalRangeSpec {
    min: f64,
    max: f64,
}

impl OptionalRangeSpec {
    fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl ValueSpecification for OptionalRangeSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            return Ok(());
        }
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() && (self.min..=self.max).contains(&v) => Ok(()),
            _ => Err(format!(
                "must be a number between {} and {}",
                self.min, self.max
            )),
        }
    }
}

/// Empty clears the value.
struct OptionalUrlSpec;

impl ValueSpecification for OptionalUrlSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() || value.starts_with("http://") || value.starts_with("https://") {
            Ok(())
        } else {
            Err("must be an http:// or https:// URL, or empty".to_string())
        }
    }
}

struct NonEmptySpec;

impl ValueSpecification for NonEmptySpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err("must not be empty".to_string())
        } else {
            Ok(())
        }
    }
}

//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Backend location
    pub backend: BackendSettings,
    /// Request timeout and retry behavior
    pub network: NetworkSettings,
    /// Position fix options
    pub position: PositionSettings,
    /// Log output location
    pub logging: LoggingSettings,
}

/// Deployment environment, selecting the default backend URL and whether
/// plain HTTP is upgraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err("must be 'development' or 'production'".to_string()),
        }
    }
}

/// Backend configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSettings {
    /// Base URL; `None` uses the environment's default
    pub url: Option<String>,
    pub environment: Environment,
}

/// Network configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSettings {
    /// Per-attempt request timeout in milliseconds
    pub timeout_ms: u64,
    /// Retries after the first attempt
    pub retry_attempts: u32,
    /// Delay between attempts in milliseconds
    pub retry_delay_ms: u64,
}

/// Position configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSettings {
    /// Fix timeout in milliseconds
    pub timeout_ms: u64,
    /// Oldest reusable fix in milliseconds
    pub maximum_age_ms: u64,
    pub high_accuracy: bool,
    /// Fixed latitude reported on hosts without a positioning device
    pub latitude: Option<f64>,
    /// Fixed longitude reported on hosts without a positioning device
    pub longitude: Option<f64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

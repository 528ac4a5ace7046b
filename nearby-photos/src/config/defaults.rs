//! Default values and constants for all configuration settings.

use std::path::PathBuf;

use super::settings::*;
use crate::position::{DEFAULT_MAXIMUM_AGE_MS, DEFAULT_POSITION_TIMEOUT_MS};
use crate::service::{DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS};

/// Development backend: the host machine as seen from the Android emulator.
pub const DEFAULT_DEVELOPMENT_URL: &str = "http://10.0.2.2:8000";

/// Production backend before the HTTPS upgrade.
pub const DEFAULT_PRODUCTION_URL: &str = "http://localhost:8000";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "nearby-photos.log";

/// Environment variable overriding `backend.url`.
pub const ENV_BACKEND_URL: &str = "BACKEND_URL";

/// Environment variable overriding `backend.environment`.
pub const ENV_ENVIRONMENT: &str = "NEARBY_PHOTOS_ENV";

/// Default log directory (~/.nearby-photos/logs).
pub fn default_log_dir() -> PathBuf {
    super::file::config_directory().join("logs")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            backend: BackendSettings::default(),
            network: NetworkSettings::default(),
            position: PositionSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: None,
            environment: Environment::Development,
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl Default for PositionSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_POSITION_TIMEOUT_MS,
            maximum_age_ms: DEFAULT_MAXIMUM_AGE_MS,
            high_accuracy: true,
            latitude: None,
            longitude: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: default_log_dir(),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

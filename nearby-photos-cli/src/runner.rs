//! CLI runner for common setup.
//!
//! Loads configuration and initializes logging for commands that talk to
//! the backend.

use tracing::info;

use nearby_photos::config::ConfigFile;
use nearby_photos::logging::{init_logging, LoggingGuard};

use crate::error::CliError;

/// Runner that manages CLI lifecycle.
pub struct CliRunner {
    /// Keeps logging active while the runner exists
    _logging_guard: LoggingGuard,
    config: ConfigFile,
}

impl CliRunner {
    /// Load config (with environment overrides) and initialize logging.
    pub fn new() -> Result<Self, CliError> {
        let mut config = ConfigFile::load()?;
        config.apply_env_overrides()?;

        let logging_guard = init_logging(&config.logging.directory, &config.logging.file)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            _logging_guard: logging_guard,
            config,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("Nearby Photos v{}", nearby_photos::VERSION);
        info!(
            command,
            environment = %self.config.backend.environment,
            "Nearby Photos CLI started"
        );
    }
}

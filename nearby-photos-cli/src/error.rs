//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use nearby_photos::config::ConfigFileError;
use nearby_photos::controller::ReloadError;
use nearby_photos::service::TransportError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid or incomplete configuration
    Config(String),
    /// Failed to load or save the configuration file
    ConfigFile(ConfigFileError),
    /// Failed to build the HTTP client
    HttpClient(TransportError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// A reload cycle could not be started
    Reload(ReloadError),
    /// The last reload cycle failed; carries the user-facing message
    Fetch(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(_) | CliError::ConfigFile(_) => {
                eprintln!();
                eprintln!("Inspect the configuration with:");
                eprintln!("  nearby-photos config list");
                eprintln!("  nearby-photos config path");
            }
            CliError::Fetch(_) => {
                eprintln!();
                eprintln!("The backend URL can be checked with:");
                eprintln!("  nearby-photos config get backend.url");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Reload(e) => write!(f, "Failed to start reload: {}", e),
            CliError::Fetch(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Reload(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReloadError> for CliError {
    fn from(e: ReloadError) -> Self {
        CliError::Reload(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

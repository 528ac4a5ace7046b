//! Configuration for the nearby photos client.
//!
//! Settings are read from `~/.nearby-photos/config.ini` (missing file means
//! defaults) and may be overridden by the `BACKEND_URL` and
//! `NEARBY_PHOTOS_ENV` environment variables.
//!
//! # Example
//!
//! ```no_run
//! use nearby_photos::config::ConfigFile;
//!
//! let mut config = ConfigFile::load()?;
//! config.apply_env_overrides()?;
//! let endpoint = config.backend.endpoint_url()?;
//! # Ok::<(), nearby_photos::config::ConfigFileError>(())
//! ```

mod defaults;
mod file;
mod keys;
mod parser;
mod resolve;
mod settings;
mod writer;

pub use defaults::{
    default_log_dir, DEFAULT_DEVELOPMENT_URL, DEFAULT_LOG_FILE, DEFAULT_PRODUCTION_URL,
    ENV_BACKEND_URL, ENV_ENVIRONMENT,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{
    BackendSettings, ConfigFile, Environment, LoggingSettings, NetworkSettings, PositionSettings,
};

//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::defaults::{DEFAULT_DEVELOPMENT_URL, DEFAULT_PRODUCTION_URL};
use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let url = config.backend.url.as_deref().unwrap_or("");
    let latitude = config
        .position
        .latitude
        .map(|v| v.to_string())
        .unwrap_or_default();
    let longitude = config
        .position
        .longitude
        .map(|v| v.to_string())
        .unwrap_or_default();

    format!(
        r#"[backend]
; Base URL of the photo search backend. The client POSTs to <url>/fiveNearest.
; If empty, defaults to {dev} (development) or {prod} (production)
url = {url}
; Deployment environment: development or production
; In production, http:// URLs are upgraded to https://
environment = {environment}

[network]
; Per-attempt request timeout in milliseconds (default: 15000)
timeout_ms = {timeout_ms}
; Retries after the first attempt on network errors, timeouts and 5xx (default: 3)
retry_attempts = {retry_attempts}
; Delay between attempts in milliseconds (default: 1000)
retry_delay_ms = {retry_delay_ms}

[position]
; Time to wait for a position fix in milliseconds (default: 15000)
timeout_ms = {position_timeout_ms}
; A fix younger than this is reused, in milliseconds (default: 10000, 0 disables)
maximum_age_ms = {maximum_age_ms}
; Request a high accuracy fix (default: true)
high_accuracy = {high_accuracy}
; Fixed position reported by the command line client
latitude = {latitude}
longitude = {longitude}

[logging]
; Directory for log files
directory = {log_dir}
; Log file name (cleared at the start of each session)
file = {log_file}
"#,
        dev = DEFAULT_DEVELOPMENT_URL,
        prod = DEFAULT_PRODUCTION_URL,
        url = url,
        environment = config.backend.environment,
        timeout_ms = config.network.timeout_ms,
        retry_attempts = config.network.retry_attempts,
        retry_delay_ms = config.network.retry_delay_ms,
        position_timeout_ms = config.position.timeout_ms,
        maximum_age_ms = config.position.maximum_age_ms,
        high_accuracy = config.position.high_accuracy,
        latitude = latitude,
        longitude = longitude,
        log_dir = path_to_string(&config.logging.directory),
        log_file = config.logging.file,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_every_section() {
        let content = to_config_string(&ConfigFile::default());

        for section in ["[backend]", "[network]", "[position]", "[logging]"] {
            assert!(content.contains(section), "missing {}", section);
        }
        assert!(content.contains("environment = development"));
        assert!(content.contains("retry_attempts = 3"));
        assert!(content.contains("high_accuracy = true"));
    }

    #[test]
    fn test_unset_values_written_empty() {
        let content = to_config_string(&ConfigFile::default());
        assert!(content.contains("\nurl = \n"));
        assert!(content.contains("\nlatitude = \n"));
    }
}

//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::{MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [backend] section
    if let Some(section) = ini.section(Some("backend")) {
        if let Some(v) = section.get("url") {
            config.backend.url = optional_string(v);
        }
        if let Some(v) = section.get("environment") {
            config.backend.environment = v
                .parse()
                .map_err(|reason| ConfigFileError::invalid("backend", "environment", v, reason))?;
        }
    }

    // [network] section
    if let Some(section) = ini.section(Some("network")) {
        if let Some(v) = section.get("timeout_ms") {
            config.network.timeout_ms = parse_positive("network", "timeout_ms", v)?;
        }
        if let Some(v) = section.get("retry_attempts") {
            config.network.retry_attempts = parse_number("network", "retry_attempts", v)?;
        }
        if let Some(v) = section.get("retry_delay_ms") {
            config.network.retry_delay_ms = parse_number("network", "retry_delay_ms", v)?;
        }
    }

    // [position] section
    if let Some(section) = ini.section(Some("position")) {
        if let Some(v) = section.get("timeout_ms") {
            config.position.timeout_ms = parse_positive("position", "timeout_ms", v)?;
        }
        if let Some(v) = section.get("maximum_age_ms") {
            config.position.maximum_age_ms = parse_number("position", "maximum_age_ms", v)?;
        }
        if let Some(v) = section.get("high_accuracy") {
            config.position.high_accuracy = parse_bool(v)
                .ok_or_else(|| ConfigFileError::invalid("position", "high_accuracy", v, BOOL_REASON))?;
        }
        if let Some(v) = section.get("latitude") {
            config.position.latitude = parse_degrees("latitude", v, MIN_LAT, MAX_LAT)?;
        }
        if let Some(v) = section.get("longitude") {
            config.position.longitude = parse_degrees("longitude", v, MIN_LNG, MAX_LNG)?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

const BOOL_REASON: &str = "must be true/false, yes/no, 1/0, or on/off";

fn parse_number<T: FromStr>(section: &str, key: &str, v: &str) -> Result<T, ConfigFileError> {
    v.trim()
        .parse()
        .map_err(|_| ConfigFileError::invalid(section, key, v, "must be a non-negative integer"))
}

fn parse_positive(section: &str, key: &str, v: &str) -> Result<u64, ConfigFileError> {
    match v.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigFileError::invalid(
            section,
            key,
            v,
            "must be a positive integer (milliseconds)",
        )),
    }
}

fn parse_degrees(key: &str, v: &str, min: f64, max: f64) -> Result<Option<f64>, ConfigFileError> {
    let v = v.trim();
    if v.is_empty() {
        return Ok(None);
    }
    match v.parse::<f64>() {
        Ok(d) if d.is_finite() && (min..=max).contains(&d) => Ok(Some(d)),
        _ => Err(ConfigFileError::invalid(
            "position",
            key,
            v,
            format!("must be a number between {} and {}", min, max),
        )),
    }
}

/// Parse a boolean in any of the accepted spellings.
pub(super) fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Empty strings mean "unset".
pub(super) fn optional_string(v: &str) -> Option<String> {
    let v = v.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

/// Expand a leading `~` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

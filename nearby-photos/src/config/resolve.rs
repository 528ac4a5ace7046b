//! Conversion of loaded settings into runtime values.

use std::time::Duration;

use reqwest::Url;

use super::defaults::{DEFAULT_DEVELOPMENT_URL, DEFAULT_PRODUCTION_URL};
use super::file::ConfigFileError;
use super::settings::{BackendSettings, Environment, NetworkSettings, PositionSettings};
use crate::coord::{CoordError, Coordinates};
use crate::position::PositionOptions;
use crate::service::{RetryPolicy, NEARBY_PATH};

impl BackendSettings {
    /// The configured base URL, or the environment's default.
    pub fn base_url(&self) -> &str {
        match (&self.url, self.environment) {
            (Some(url), _) => url,
            (None, Environment::Development) => DEFAULT_DEVELOPMENT_URL,
            (None, Environment::Production) => DEFAULT_PRODUCTION_URL,
        }
    }

    /// Full nearest-photos endpoint.
    ///
    /// In production an `http` base URL is upgraded to `https`.
    pub fn endpoint_url(&self) -> Result<String, ConfigFileError> {
        let base = self.base_url();
        let mut url = Url::parse(base)
            .map_err(|e| ConfigFileError::invalid("backend", "url", base, e.to_string()))?;

        match url.scheme() {
            "https" => {}
            "http" if self.environment == Environment::Production => {
                url.set_scheme("https").map_err(|_| {
                    ConfigFileError::invalid("backend", "url", base, "cannot upgrade to https")
                })?;
            }
            "http" => {}
            _ => {
                return Err(ConfigFileError::invalid(
                    "backend",
                    "url",
                    base,
                    "must be an http or https URL",
                ))
            }
        }

        url.path_segments_mut()
            .map_err(|_| ConfigFileError::invalid("backend", "url", base, "cannot be a base URL"))?
            .pop_if_empty()
            .push(NEARBY_PATH);

        Ok(url.into())
    }
}

impl NetworkSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Fixed-delay policy with `retry_attempts` retries after the first attempt.
    pub fn retry_policy(&self) -> RetryPolicy {
        if self.retry_attempts == 0 {
            RetryPolicy::None
        } else {
            RetryPolicy::fixed(
                self.retry_attempts.saturating_add(1),
                Duration::from_millis(self.retry_delay_ms),
            )
        }
    }
}

impl PositionSettings {
    pub fn options(&self) -> PositionOptions {
        PositionOptions::default()
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_maximum_age(Duration::from_millis(self.maximum_age_ms))
            .with_high_accuracy(self.high_accuracy)
    }

    /// The configured fixed position, if both components are set.
    pub fn fixed_coordinates(&self) -> Result<Option<Coordinates>, ConfigFileError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Coordinates::new(lat, lng).map(Some).map_err(|e| {
                let (key, value) = match e {
                    CoordError::InvalidLatitude(lat) => ("latitude", lat),
                    CoordError::InvalidLongitude(lng) => ("longitude", lng),
                };
                ConfigFileError::invalid("position", key, &value.to_string(), e.to_string())
            }),
            (None, None) => Ok(None),
            (Some(lat), None) => Err(ConfigFileError::invalid(
                "position",
                "longitude",
                "",
                format!("required when latitude is set ({})", lat),
            )),
            (None, Some(lng)) => Err(ConfigFileError::invalid(
                "position",
                "latitude",
                "",
                format!("required when longitude is set ({})", lng),
            )),
        }
    }
}

//! Position types and errors

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::coord::Coordinates;

/// Default time allowed for a single position fix (15 seconds).
pub const DEFAULT_POSITION_TIMEOUT_MS: u64 = 15_000;

/// Default age under which a previous fix is reused (10 seconds).
pub const DEFAULT_MAXIMUM_AGE_MS: u64 = 10_000;

/// Options for a single position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Request GPS-grade accuracy rather than a coarse network fix.
    pub high_accuracy: bool,
    /// Maximum time to wait for a fix.
    pub timeout: Duration,
    /// A fix younger than this may be returned instead of acquiring a new one.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(DEFAULT_POSITION_TIMEOUT_MS),
            maximum_age: Duration::from_millis(DEFAULT_MAXIMUM_AGE_MS),
        }
    }
}

impl PositionOptions {
    /// Set the fix timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the acceptable cached-fix age.
    pub fn with_maximum_age(mut self, maximum_age: Duration) -> Self {
        self.maximum_age = maximum_age;
        self
    }

    /// Enable or disable high accuracy mode.
    pub fn with_high_accuracy(mut self, high_accuracy: bool) -> Self {
        self.high_accuracy = high_accuracy;
        self
    }
}

/// A single resolved position reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    /// Where the device was.
    pub coordinates: Coordinates,
    /// When the reading was taken.
    pub acquired_at: Instant,
}

impl Fix {
    /// Create a fix taken now.
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            acquired_at: Instant::now(),
        }
    }

    /// Create a fix with an explicit timestamp (for testing).
    pub fn with_timestamp(coordinates: Coordinates, acquired_at: Instant) -> Self {
        Self {
            coordinates,
            acquired_at,
        }
    }

    /// Returns true if this fix is no older than `maximum_age`.
    pub fn is_fresh(&self, maximum_age: Duration) -> bool {
        self.acquired_at.elapsed() <= maximum_age
    }
}

/// Outcome of a platform permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// The user granted fine location access.
    Granted,
    /// The user declined this time.
    Denied,
    /// The user declined and asked not to be prompted again.
    NeverAskAgain,
}

impl PermissionStatus {
    /// Returns true only for [`PermissionStatus::Granted`].
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Failure reported by the platform geolocation API through its error callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocationFailure {
    /// Location access was revoked between the permission check and the fix.
    PermissionDenied,
    /// The sensor or driver could not produce a position.
    PositionUnavailable(String),
    /// The platform gave up waiting for a fix.
    Timeout,
}

/// Errors from [`PositionProvider::resolve`](super::PositionProvider::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The user declined location access.
    #[error("Location permission denied")]
    PermissionDenied,

    /// No position could be produced.
    #[error("Position unavailable: {0}")]
    Unavailable(String),

    /// No fix arrived within the configured timeout.
    #[error("Position request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl PositionError {
    /// Map a platform failure reported during a request with the given timeout.
    pub(crate) fn from_failure(failure: GeolocationFailure, timeout: Duration) -> Self {
        match failure {
            GeolocationFailure::PermissionDenied => Self::PermissionDenied,
            GeolocationFailure::PositionUnavailable(reason) => Self::Unavailable(reason),
            GeolocationFailure::Timeout => Self::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            },
        }
    }
}

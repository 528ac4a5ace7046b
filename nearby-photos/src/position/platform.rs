//! Platform permission and geolocation interfaces.
//!
//! These traits mirror the shape of mobile platform APIs: each request takes
//! callbacks and returns immediately. Implementations may invoke the callbacks
//! from any thread, at most once per request.

use super::types::{Fix, GeolocationFailure, PermissionStatus, PositionOptions};
use crate::coord::Coordinates;

/// Callback receiving the outcome of a permission request.
pub type PermissionCallback = Box<dyn FnOnce(PermissionStatus) + Send + 'static>;

/// Callback receiving a successful position fix.
pub type FixCallback = Box<dyn FnOnce(Fix) + Send + 'static>;

/// Callback receiving a geolocation failure.
pub type FixErrorCallback = Box<dyn FnOnce(GeolocationFailure) + Send + 'static>;

/// Capability gate for fine-grained location access.
pub trait LocationPermission: Send + Sync {
    /// Ask for fine location access, reporting the outcome through `on_result`.
    fn request_fine_location(&self, on_result: PermissionCallback);
}

/// One-shot position query.
pub trait Geolocator: Send + Sync {
    /// Request a single position fix.
    ///
    /// Exactly one of `on_success` or `on_error` should be called.
    fn get_current_position(
        &self,
        options: &PositionOptions,
        on_success: FixCallback,
        on_error: FixErrorCallback,
    );
}

/// Permission gate for platforms that do not require an explicit grant.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysGranted;

impl LocationPermission for AlwaysGranted {
    fn request_fine_location(&self, on_result: PermissionCallback) {
        on_result(PermissionStatus::Granted);
    }
}

/// Geolocator that always reports the same position.
///
/// Used on hosts without a positioning radio, where the position comes from
/// configuration or the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    coordinates: Coordinates,
}

impl FixedGeolocator {
    /// Create a geolocator pinned to `coordinates`.
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

impl Geolocator for FixedGeolocator {
    fn get_current_position(
        &self,
        _options: &PositionOptions,
        on_success: FixCallback,
        _on_error: FixErrorCallback,
    ) {
        on_success(Fix::new(self.coordinates));
    }
}

/// Geolocator for hosts with no position source at all.
#[derive(Debug, Clone, Default)]
pub struct UnavailableGeolocator {
    reason: String,
}

impl UnavailableGeolocator {
    /// Create a geolocator that always fails with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Geolocator for UnavailableGeolocator {
    fn get_current_position(
        &self,
        _options: &PositionOptions,
        _on_success: FixCallback,
        on_error: FixErrorCallback,
    ) {
        on_error(GeolocationFailure::PositionUnavailable(self.reason.clone()));
    }
}

//! Position provider trait and the device-backed implementation.

use std::future::Future;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::platform::{Geolocator, LocationPermission};
use super::settle::settlement;
use super::types::{Fix, GeolocationFailure, PositionError, PositionOptions};
use crate::coord::Coordinates;

/// Resolves the current device position.
///
/// Implementations must not retry internally; callers decide whether to try
/// again.
pub trait PositionProvider: Send + Sync {
    /// Resolve a single position fix.
    fn resolve(&self) -> impl Future<Output = Result<Coordinates, PositionError>> + Send;
}

/// Position provider backed by platform permission and geolocation APIs.
///
/// Each `resolve()`:
/// 1. requests fine location permission (fails with `PermissionDenied`)
/// 2. reuses the previous fix if it is no older than `maximum_age`
/// 3. otherwise requests a fresh fix bounded by `timeout`
pub struct DevicePositionProvider<P: LocationPermission, G: Geolocator> {
    permission: P,
    geolocator: G,
    options: PositionOptions,
    last_fix: Mutex<Option<Fix>>,
}

impl<P: LocationPermission, G: Geolocator> DevicePositionProvider<P, G> {
    /// Create a provider with default options (high accuracy, 15s timeout,
    /// 10s maximum age).
    pub fn new(permission: P, geolocator: G) -> Self {
        Self::with_options(permission, geolocator, PositionOptions::default())
    }

    /// Create a provider with custom options.
    pub fn with_options(permission: P, geolocator: G, options: PositionOptions) -> Self {
        Self {
            permission,
            geolocator,
            options,
            last_fix: Mutex::new(None),
        }
    }

    async fn ensure_permission(&self) -> Result<(), PositionError> {
        let (settler, rx) = settlement();
        self.permission
            .request_fine_location(Box::new(move |status| {
                settler.settle(status);
            }));

        match rx.await {
            Ok(status) if status.is_granted() => Ok(()),
            Ok(status) => {
                warn!(status = ?status, "Location permission not granted");
                Err(PositionError::PermissionDenied)
            }
            Err(_) => {
                warn!("Permission request ended without a result");
                Err(PositionError::PermissionDenied)
            }
        }
    }

    fn cached_fix(&self) -> Option<Fix> {
        if self.options.maximum_age.is_zero() {
            return None;
        }
        let last = *self.last_fix.lock();
        last.filter(|fix| fix.is_fresh(self.options.maximum_age))
    }

    async fn request_fix(&self) -> Result<Fix, PositionError> {
        let (on_success, rx) = settlement::<Result<Fix, GeolocationFailure>>();
        let on_error = on_success.clone();

        self.geolocator.get_current_position(
            &self.options,
            Box::new(move |fix| {
                on_success.settle(Ok(fix));
            }),
            Box::new(move |failure| {
                on_error.settle(Err(failure));
            }),
        );

        let timeout = self.options.timeout;
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(Ok(fix))) => Ok(fix),
            Ok(Ok(Err(failure))) => {
                warn!(failure = ?failure, "Geolocation failed");
                Err(PositionError::from_failure(failure, timeout))
            }
            Ok(Err(_)) => Err(PositionError::Unavailable(
                "geolocation request ended without a result".to_string(),
            )),
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "Geolocation timed out");
                Err(PositionError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
        }
    }
}

impl<P: LocationPermission, G: Geolocator> PositionProvider for DevicePositionProvider<P, G> {
    async fn resolve(&self) -> Result<Coordinates, PositionError> {
        self.ensure_permission().await?;

        if let Some(fix) = self.cached_fix() {
            debug!(lat = fix.coordinates.lat, lng = fix.coordinates.lng, "Reusing recent fix");
            return Ok(fix.coordinates);
        }

        let fix = self.request_fix().await?;
        debug!(lat = fix.coordinates.lat, lng = fix.coordinates.lng, "Position fix acquired");
        *self.last_fix.lock() = Some(fix);
        Ok(fix.coordinates)
    }
}

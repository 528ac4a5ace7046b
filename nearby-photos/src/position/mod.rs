//! Device position resolution
//!
//! This module turns the platform's callback-based permission and geolocation
//! APIs into one async operation, [`PositionProvider::resolve`], that yields a
//! single [`Coordinates`](crate::coord::Coordinates) fix or a typed
//! [`PositionError`].
//!
//! # Architecture
//!
//! ```text
//! DevicePositionProvider
//!         │
//!         ├── LocationPermission (platform trait, callback based)
//!         │       └── AlwaysGranted
//!         │
//!         ├── Geolocator (platform trait, callback based)
//!         │       ├── FixedGeolocator
//!         │       └── UnavailableGeolocator
//!         │
//!         └── Settler (single-settlement bridge to a future)
//! ```
//!
//! The provider never retries; a fresh `resolve()` is the retry.

mod platform;
mod provider;
mod settle;
mod types;

pub use platform::{
    AlwaysGranted, FixCallback, FixErrorCallback, FixedGeolocator, Geolocator,
    LocationPermission, PermissionCallback, UnavailableGeolocator,
};
pub use provider::{DevicePositionProvider, PositionProvider};
pub use types::{
    Fix, GeolocationFailure, PermissionStatus, PositionError, PositionOptions,
    DEFAULT_MAXIMUM_AGE_MS, DEFAULT_POSITION_TIMEOUT_MS,
};

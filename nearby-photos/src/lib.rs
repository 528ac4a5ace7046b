//! Nearby Photos - geolocated photo lookup client core
//!
//! This library resolves the device position, asks a photo search backend for
//! the photos nearest to it, and exposes the outcome as a single observable
//! state machine for a presentation layer to render.
//!
//! # High-Level API
//!
//! The [`controller`] module ties everything together:
//!
//! ```ignore
//! use nearby_photos::controller::NearbyPhotosController;
//! use nearby_photos::position::{AlwaysGranted, DevicePositionProvider, FixedGeolocator};
//! use nearby_photos::service::{AsyncReqwestClient, PhotoServiceClient};
//!
//! let position = DevicePositionProvider::new(AlwaysGranted, FixedGeolocator::new(coords));
//! let service = PhotoServiceClient::new(AsyncReqwestClient::new()?, backend.endpoint_url()?);
//! let controller = NearbyPhotosController::new(position, service);
//!
//! controller.reload()?;
//! let view = controller.view();
//! ```

pub mod config;
pub mod controller;
pub mod coord;
pub mod logging;
pub mod position;
pub mod presentation;
pub mod service;

/// Version of the Nearby Photos library and CLI.
///
/// Synchronized across the workspace and injected from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Geographic coordinate module
//!
//! Provides the [`Coordinates`] value produced once per reload cycle by the
//! position stage and sent verbatim to the photo search backend.

mod types;

pub use types::{CoordError, Coordinates, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};

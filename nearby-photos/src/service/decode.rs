//! Defensive decoding of the nearby photos response.
//!
//! The backend answers `{"images": [{"address": "...", "url": "..."}, ...]}`.
//! The top-level shape must be right; individual records that lack a
//! non-empty `address` or `url` are dropped and counted instead of failing
//! the whole batch.

use serde::Deserialize;
use serde_json::Value;

use super::types::{PhotoItem, ServiceError};

/// Top-level response envelope.
#[derive(Debug, Deserialize)]
struct NearbyResponse {
    images: Vec<Value>,
}

/// Decoded response: the usable items plus how many records were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedBatch {
    /// Items in backend order.
    pub items: Vec<PhotoItem>,
    /// Records that were skipped because they were malformed.
    pub dropped: usize,
}

/// Decode a response body into photo items.
///
/// # Errors
///
/// Returns [`ServiceError::Decode`] if the body is not JSON, or `images` is
/// missing or not an array.
pub fn decode_nearby(body: &[u8]) -> Result<DecodedBatch, ServiceError> {
    let response: NearbyResponse =
        serde_json::from_slice(body).map_err(|e| ServiceError::Decode(e.to_string()))?;

    let total = response.images.len();
    let items: Vec<PhotoItem> = response.images.iter().filter_map(decode_record).collect();

    Ok(DecodedBatch {
        dropped: total - items.len(),
        items,
    })
}

fn decode_record(record: &Value) -> Option<PhotoItem> {
    let address = non_empty_str(record.get("address")?)?;
    let url = non_empty_str(record.get("url")?)?;
    Some(PhotoItem::new(address, url))
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

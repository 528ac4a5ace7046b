//! Photo service types and errors

use thiserror::Error;

use super::http::TransportError;

/// A nearby photo as returned by the backend.
///
/// `address` is non-empty and serves as the item's identity key;
/// `image_ref` is the locator the presentation layer loads the image from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoItem {
    /// Street address the photo was taken at.
    pub address: String,
    /// URI or other locator of the image resource.
    pub image_ref: String,
}

impl PhotoItem {
    /// Create an item. Callers are responsible for non-empty fields.
    pub fn new(address: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            image_ref: image_ref.into(),
        }
    }

    /// Address formatted for display, with underscores shown as spaces.
    pub fn display_label(&self) -> String {
        self.address.replace('_', " ")
    }
}

/// Errors from [`PhotoService::fetch_nearby`](super::PhotoService::fetch_nearby).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// No usable response: connection or transport failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Server responded with HTTP {status}")]
    Server { status: u16 },

    /// The request did not complete in time.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The response body was not the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Returns true if retrying the same request may succeed.
    ///
    /// Network failures, timeouts, and 5xx responses are transient. Other
    /// statuses and decode failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout { .. } => true,
            Self::Server { status } => (500..600).contains(status),
            Self::Decode(_) => false,
        }
    }

    pub(crate) fn from_transport(error: TransportError, timeout_ms: u64) -> Self {
        match error {
            TransportError::Timeout => Self::Timeout { timeout_ms },
            TransportError::Connect(msg) | TransportError::Request(msg) => Self::Network(msg),
        }
    }
}

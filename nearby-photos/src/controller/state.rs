//! Request state and user-facing error mapping.

use std::fmt;

use crate::coord::Coordinates;
use crate::position::PositionError;
use crate::service::{PhotoItem, ServiceError};

/// Message shown when location access is refused.
pub const MSG_PERMISSION: &str = "Location services are required for this feature.";
/// Message shown when the device or backend cannot be reached.
pub const MSG_NETWORK: &str = "Unable to connect. Please check your connection.";
/// Message shown when a stage exceeds its time budget.
pub const MSG_TIMEOUT: &str = "Request timed out. Please try again.";
/// Message shown when the backend misbehaves.
pub const MSG_SERVER: &str = "Service temporarily unavailable. Please try again later.";

/// Failure categories recovered by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PermissionDenied,
    PositionUnavailable,
    PositionTimeout,
    NetworkError,
    ServerError,
    RequestTimeout,
    DecodeError,
}

impl ErrorKind {
    /// The fixed, non-technical message for this category.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::PermissionDenied => MSG_PERMISSION,
            Self::PositionUnavailable | Self::NetworkError => MSG_NETWORK,
            Self::PositionTimeout | Self::RequestTimeout => MSG_TIMEOUT,
            Self::ServerError | Self::DecodeError => MSG_SERVER,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PermissionDenied => "permission denied",
            Self::PositionUnavailable => "position unavailable",
            Self::PositionTimeout => "position timeout",
            Self::NetworkError => "network error",
            Self::ServerError => "server error",
            Self::RequestTimeout => "request timeout",
            Self::DecodeError => "decode error",
        };
        f.write_str(name)
    }
}

impl From<&PositionError> for ErrorKind {
    fn from(error: &PositionError) -> Self {
        match error {
            PositionError::PermissionDenied => Self::PermissionDenied,
            PositionError::Unavailable(_) => Self::PositionUnavailable,
            PositionError::Timeout { .. } => Self::PositionTimeout,
        }
    }
}

impl From<&ServiceError> for ErrorKind {
    fn from(error: &ServiceError) -> Self {
        match error {
            ServiceError::Network(_) => Self::NetworkError,
            ServiceError::Server { .. } => Self::ServerError,
            ServiceError::Timeout { .. } => Self::RequestTimeout,
            ServiceError::Decode(_) => Self::DecodeError,
        }
    }
}

/// Observable state of the nearby photos pipeline.
///
/// Exactly one variant holds at a time. Only the controller produces new
/// values; observers always see a whole value, never a partial update.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A reload cycle is in flight.
    Loading,
    /// The latest cycle completed. `items` may be empty.
    Success {
        coordinates: Coordinates,
        items: Vec<PhotoItem>,
    },
    /// The latest cycle failed.
    Failed { kind: ErrorKind, message: String },
}

impl RequestState {
    /// Build a `Failed` state carrying the category's user-facing message.
    pub fn failed(kind: ErrorKind) -> Self {
        Self::Failed {
            kind,
            message: kind.user_message().to_string(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::Success { coordinates, .. } => Some(*coordinates),
            _ => None,
        }
    }

    /// Items of a successful cycle; empty in every other state.
    pub fn items(&self) -> &[PhotoItem] {
        match self {
            Self::Success { items, .. } => items,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_table() {
        assert_eq!(ErrorKind::PermissionDenied.user_message(), MSG_PERMISSION);
        assert_eq!(ErrorKind::PositionUnavailable.user_message(), MSG_NETWORK);
        assert_eq!(ErrorKind::NetworkError.user_message(), MSG_NETWORK);
        assert_eq!(ErrorKind::PositionTimeout.user_message(), MSG_TIMEOUT);
        assert_eq!(ErrorKind::RequestTimeout.user_message(), MSG_TIMEOUT);
        assert_eq!(ErrorKind::ServerError.user_message(), MSG_SERVER);
        assert_eq!(ErrorKind::DecodeError.user_message(), MSG_SERVER);
    }

    #[test]
    fn test_position_error_mapping() {
        assert_eq!(
            ErrorKind::from(&PositionError::PermissionDenied),
            ErrorKind::PermissionDenied
        );
        assert_eq!(
            ErrorKind::from(&PositionError::Unavailable("no gps".into())),
            ErrorKind::PositionUnavailable
        );
        assert_eq!(
            ErrorKind::from(&PositionError::Timeout { timeout_ms: 15_000 }),
            ErrorKind::PositionTimeout
        );
    }

    #[test]
    fn test_service_error_mapping() {
        assert_eq!(
            ErrorKind::from(&ServiceError::Network("refused".into())),
            ErrorKind::NetworkError
        );
        assert_eq!(
            ErrorKind::from(&ServiceError::Server { status: 404 }),
            ErrorKind::ServerError
        );
        assert_eq!(
            ErrorKind::from(&ServiceError::Timeout { timeout_ms: 1 }),
            ErrorKind::RequestTimeout
        );
        assert_eq!(
            ErrorKind::from(&ServiceError::Decode("bad".into())),
            ErrorKind::DecodeError
        );
    }

    #[test]
    fn test_failed_never_carries_items() {
        let state = RequestState::failed(ErrorKind::ServerError);
        assert!(state.items().is_empty());
        assert!(state.coordinates().is_none());
        assert_eq!(state.error_message(), Some(MSG_SERVER));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_success_has_no_error() {
        let state = RequestState::Success {
            coordinates: Coordinates::new(1.0, 2.0).unwrap(),
            items: vec![PhotoItem::new("a", "u")],
        };
        assert!(state.error_message().is_none());
        assert!(state.error_kind().is_none());
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(RequestState::default(), RequestState::Idle);
    }
}

//! Presentation boundary.
//!
//! A renderer only ever sees a [`PresentationSnapshot`] and may only send
//! back a reload request. It never mutates controller state.

use crate::controller::RequestState;
use crate::coord::Coordinates;
use crate::service::PhotoItem;

/// Read-only view of the controller state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PresentationSnapshot {
    /// Position of the latest successful cycle.
    pub coordinates: Option<Coordinates>,
    /// Photos in backend order; empty unless the latest cycle succeeded.
    pub items: Vec<PhotoItem>,
    pub is_loading: bool,
    /// User-facing failure message.
    pub error_message: Option<String>,
}

impl PresentationSnapshot {
    /// The reload trigger is disabled while a cycle is in flight.
    pub fn can_reload(&self) -> bool {
        !self.is_loading
    }

    /// `Lat 12.34567, Lng 76.54321`, or `None` before the first success.
    pub fn coordinates_label(&self) -> Option<String> {
        self.coordinates.map(|c| c.to_string())
    }

    /// One-line status summary.
    pub fn status_line(&self) -> String {
        if self.is_loading {
            return "Loading...".to_string();
        }
        if let Some(message) = &self.error_message {
            return message.clone();
        }
        match (self.coordinates, self.items.len()) {
            (None, _) => "Press reload to find photos nearby.".to_string(),
            (Some(_), 0) => "No photos found nearby.".to_string(),
            (Some(_), 1) => "1 photo nearby.".to_string(),
            (Some(_), n) => format!("{} photos nearby.", n),
        }
    }
}

impl From<&RequestState> for PresentationSnapshot {
    fn from(state: &RequestState) -> Self {
        Self {
            coordinates: state.coordinates(),
            items: state.items().to_vec(),
            is_loading: state.is_loading(),
            error_message: state.error_message().map(str::to_string),
        }
    }
}

/// Something that renders snapshots.
pub trait PresentationAdapter {
    fn render(&mut self, snapshot: &PresentationSnapshot);
}

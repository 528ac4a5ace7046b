//! Single-settlement bridge from callbacks to futures.
//!
//! Platform APIs hand results to callbacks, sometimes to more than one of them
//! (a success and an error callback). A [`Settler`] accepts the first value
//! from any of its clones and ignores the rest; the paired receiver resolves
//! exactly once. If every clone is dropped without settling, the receiver
//! resolves with a `RecvError`.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;

/// Write side of a single-settlement channel.
pub(crate) struct Settler<T> {
    slot: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for Settler<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Settler<T> {
    /// Settle with `value`.
    ///
    /// Returns false if the channel was already settled or the receiver is gone.
    pub(crate) fn settle(&self, value: T) -> bool {
        let sender = self.slot.lock().take();
        match sender {
            Some(tx) => tx.send(value).is_ok(),
            None => false,
        }
    }
}

/// Create a settler and the receiver it resolves.
pub(crate) fn settlement<T>() -> (Settler<T>, oneshot::Receiver<T>) {
    let (tx, rx) = oneshot::channel();
    (
        Settler {
            slot: Arc::new(Mutex::new(Some(tx))),
        },
        rx,
    )
}

//! Generation-tagged reload orchestration.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::state::{ErrorKind, RequestState};
use crate::position::PositionProvider;
use crate::presentation::PresentationSnapshot;
use crate::service::PhotoService;

/// Errors starting a background reload.
#[derive(Debug, Error)]
pub enum ReloadError {
    /// `reload()` was called outside a tokio runtime.
    #[error("no tokio runtime available to run the reload cycle")]
    NoRuntime,
}

/// Sequences position resolution and the photo lookup, and owns the
/// resulting [`RequestState`].
///
/// Every reload takes a new generation number. A cycle only commits its
/// outcome while its generation is still the latest one issued, so a slow
/// cycle can never overwrite the result of a newer one.
///
/// Cloning is cheap and every clone drives the same state.
pub struct NearbyPhotosController<P, S> {
    inner: Arc<Inner<P, S>>,
}

struct Inner<P, S> {
    position: P,
    service: S,
    state: watch::Sender<RequestState>,
    /// Latest issued generation. Held while resetting to `Loading` and
    /// while committing so the two never interleave.
    generation: Mutex<u64>,
}

impl<P, S> Clone for NearbyPhotosController<P, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, S> NearbyPhotosController<P, S>
where
    P: PositionProvider + 'static,
    S: PhotoService + 'static,
{
    /// Create a controller in the `Idle` state.
    pub fn new(position: P, service: S) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self {
            inner: Arc::new(Inner {
                position,
                service,
                state,
                generation: Mutex::new(0),
            }),
        }
    }

    /// Start a new reload cycle in the background and return its generation.
    ///
    /// The state is `Loading` when this returns `Ok`. Outside a tokio
    /// runtime nothing changes and [`ReloadError::NoRuntime`] is returned.
    pub fn reload(&self) -> Result<u64, ReloadError> {
        let handle = Handle::try_current().map_err(|_| ReloadError::NoRuntime)?;
        let generation = self.inner.begin();
        let inner = Arc::clone(&self.inner);
        handle.spawn(async move {
            inner.run_cycle(generation).await;
        });
        Ok(generation)
    }

    /// Run a reload cycle to completion and return the resulting state.
    ///
    /// If a newer reload started meanwhile, its state is returned instead.
    pub async fn reload_now(&self) -> RequestState {
        let generation = self.inner.begin();
        self.inner.run_cycle(generation).await;
        self.current_state()
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> RequestState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state replacement.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.inner.state.subscribe()
    }

    /// Latest issued generation; 0 before the first reload.
    pub fn generation(&self) -> u64 {
        *self.inner.generation.lock()
    }

    /// Presentation snapshot of the current state.
    pub fn view(&self) -> PresentationSnapshot {
        PresentationSnapshot::from(&*self.inner.state.borrow())
    }
}

impl<P, S> Inner<P, S>
where
    P: PositionProvider,
    S: PhotoService,
{
    fn begin(&self) -> u64 {
        let mut generation = self.generation.lock();
        *generation += 1;
        self.state.send_replace(RequestState::Loading);
        debug!(generation = *generation, "Reload started");
        *generation
    }

    async fn run_cycle(&self, generation: u64) {
        let outcome = match self.position.resolve().await {
            Err(e) => {
                warn!(generation, error = %e, "Position resolution failed");
                RequestState::failed(ErrorKind::from(&e))
            }
            Ok(coordinates) => match self.service.fetch_nearby(coordinates).await {
                Ok(items) => {
                    info!(generation, %coordinates, items = items.len(), "Reload succeeded");
                    RequestState::Success { coordinates, items }
                }
                Err(e) => {
                    warn!(generation, error = %e, "Photo lookup failed");
                    RequestState::failed(ErrorKind::from(&e))
                }
            },
        };
        self.commit(generation, outcome);
    }

    fn commit(&self, generation: u64, outcome: RequestState) -> bool {
        let latest = self.generation.lock();
        if *latest != generation {
            debug!(generation, latest = *latest, "Discarding stale reload result");
            return false;
        }
        self.state.send_replace(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::state::{MSG_NETWORK, MSG_PERMISSION, MSG_SERVER, MSG_TIMEOUT};
    use crate::coord::Coordinates;
    use crate::position::PositionError;
    use crate::service::{PhotoItem, ServiceError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn here() -> Coordinates {
        Coordinates::new(51.5074, -0.1278).unwrap()
    }

    #[derive(Clone)]
    struct FakePosition {
        result: Result<Coordinates, PositionError>,
        calls: Arc<AtomicUsize>,
    }

    impl FakePosition {
        fn ok() -> Self {
            Self::returning(Ok(here()))
        }

        fn returning(result: Result<Coordinates, PositionError>) -> Self {
            Self {
                result,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl PositionProvider for FakePosition {
        async fn resolve(&self) -> Result<Coordinates, PositionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    type Reply = (Duration, Result<Vec<PhotoItem>, ServiceError>);

    /// Replies in script order, each after its own delay. The last reply
    /// repeats.
    #[derive(Clone)]
    struct FakeService {
        script: Arc<Vec<Reply>>,
        calls: Arc<AtomicUsize>,
    }

    impl FakeService {
        fn new(script: Vec<Reply>) -> Self {
            Self {
                script: Arc::new(script),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn items(items: Vec<PhotoItem>) -> Self {
            Self::new(vec![(Duration::ZERO, Ok(items))])
        }

        fn failing(error: ServiceError) -> Self {
            Self::new(vec![(Duration::ZERO, Err(error))])
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PhotoService for FakeService {
        async fn fetch_nearby(
            &self,
            _coordinates: Coordinates,
        ) -> Result<Vec<PhotoItem>, ServiceError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay, reply) = self.script[call.min(self.script.len() - 1)].clone();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            reply
        }
    }

    fn photos(names: &[&str]) -> Vec<PhotoItem> {
        names
            .iter()
            .map(|n| PhotoItem::new(*n, format!("https://img.example.com/{}.jpg", n)))
            .collect()
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let controller = NearbyPhotosController::new(FakePosition::ok(), FakeService::items(vec![]));
        assert_eq!(controller.current_state(), RequestState::Idle);
        assert_eq!(controller.generation(), 0);
    }

    #[test]
    fn test_reload_outside_runtime_leaves_state_untouched() {
        let controller = NearbyPhotosController::new(FakePosition::ok(), FakeService::items(vec![]));

        let result = controller.reload();

        assert!(matches!(result, Err(ReloadError::NoRuntime)));
        assert_eq!(controller.current_state(), RequestState::Idle);
        assert_eq!(controller.generation(), 0);
        assert!(controller.view().can_reload());
    }

    #[tokio::test]
    async fn test_reload_is_loading_immediately() {
        let controller = NearbyPhotosController::new(FakePosition::ok(), FakeService::items(vec![]));

        let generation = controller.reload().unwrap();

        assert_eq!(generation, 1);
        assert!(controller.current_state().is_loading());
        assert!(controller.view().is_loading);
    }

    #[tokio::test]
    async fn test_success_preserves_backend_order() {
        let items = photos(&["c", "a", "b"]);
        let controller =
            NearbyPhotosController::new(FakePosition::ok(), FakeService::items(items.clone()));

        let state = controller.reload_now().await;

        assert_eq!(
            state,
            RequestState::Success {
                coordinates: here(),
                items
            }
        );
    }

    #[tokio::test]
    async fn test_empty_result_is_success() {
        let controller = NearbyPhotosController::new(FakePosition::ok(), FakeService::items(vec![]));

        let state = controller.reload_now().await;

        assert!(matches!(state, RequestState::Success { ref items, .. } if items.is_empty()));
        assert!(state.error_message().is_none());
    }

    #[tokio::test]
    async fn test_permission_denied_skips_service() {
        let service = FakeService::items(photos(&["a"]));
        let controller = NearbyPhotosController::new(
            FakePosition::returning(Err(PositionError::PermissionDenied)),
            service.clone(),
        );

        let state = controller.reload_now().await;

        assert_eq!(state.error_kind(), Some(ErrorKind::PermissionDenied));
        assert_eq!(state.error_message(), Some(MSG_PERMISSION));
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_position_timeout_message() {
        let controller = NearbyPhotosController::new(
            FakePosition::returning(Err(PositionError::Timeout { timeout_ms: 15_000 })),
            FakeService::items(vec![]),
        );

        let state = controller.reload_now().await;

        assert_eq!(state.error_message(), Some(MSG_TIMEOUT));
    }

    #[tokio::test]
    async fn test_service_failure_clears_previous_items() {
        let service = FakeService::new(vec![
            (Duration::ZERO, Ok(photos(&["a", "b"]))),
            (Duration::ZERO, Err(ServiceError::Server { status: 502 })),
        ]);
        let controller = NearbyPhotosController::new(FakePosition::ok(), service);

        let first = controller.reload_now().await;
        assert_eq!(first.items().len(), 2);

        let second = controller.reload_now().await;
        assert_eq!(second.error_message(), Some(MSG_SERVER));
        assert!(second.items().is_empty());
        assert!(controller.view().items.is_empty());
    }

    #[tokio::test]
    async fn test_network_failure_message() {
        let controller = NearbyPhotosController::new(
            FakePosition::ok(),
            FakeService::failing(ServiceError::Network("refused".into())),
        );

        let state = controller.reload_now().await;

        assert_eq!(state.error_kind(), Some(ErrorKind::NetworkError));
        assert_eq!(state.error_message(), Some(MSG_NETWORK));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_discarded() {
        let service = FakeService::new(vec![
            (Duration::from_secs(5), Ok(photos(&["old"]))),
            (Duration::from_secs(1), Ok(photos(&["new"]))),
        ]);
        let controller = NearbyPhotosController::new(FakePosition::ok(), service.clone());

        let first = controller.reload().unwrap();
        tokio::task::yield_now().await;
        let second = controller.reload().unwrap();
        assert!(second > first);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(controller.current_state().items(), photos(&["new"]).as_slice());

        // The first cycle finishes here and must not overwrite the second.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(service.call_count(), 2);
        assert_eq!(controller.current_state().items(), photos(&["new"]).as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_reload_now_returns_newer_state() {
        let service = FakeService::new(vec![
            (Duration::from_secs(5), Ok(photos(&["old"]))),
            (Duration::from_secs(1), Err(ServiceError::Timeout { timeout_ms: 15_000 })),
        ]);
        let controller = NearbyPhotosController::new(FakePosition::ok(), service);

        let background = controller.clone();
        let slow = tokio::spawn(async move { background.reload_now().await });
        tokio::task::yield_now().await;
        controller.reload().unwrap();

        let state = slow.await.unwrap();
        assert_eq!(state.error_message(), Some(MSG_TIMEOUT));
        assert_eq!(controller.generation(), 2);
    }

    #[tokio::test]
    async fn test_repeated_reloads_are_idempotent() {
        let controller =
            NearbyPhotosController::new(FakePosition::ok(), FakeService::items(photos(&["x", "y"])));

        let first = controller.reload_now().await;
        let second = controller.reload_now().await;

        assert_eq!(first, second);
        assert_eq!(controller.generation(), 2);
    }

    #[tokio::test]
    async fn test_observer_sees_whole_states() {
        let controller =
            NearbyPhotosController::new(FakePosition::ok(), FakeService::items(photos(&["a"])));
        let mut rx = controller.subscribe();
        assert_eq!(*rx.borrow_and_update(), RequestState::Idle);

        controller.reload().unwrap();
        rx.changed().await.unwrap();
        let mut seen = rx.borrow_and_update().clone();
        while seen.is_loading() {
            rx.changed().await.unwrap();
            seen = rx.borrow_and_update().clone();
        }

        match seen {
            RequestState::Success { items, .. } => assert_eq!(items, photos(&["a"])),
            other => panic!("unexpected state {:?}", other),
        }
    }
}

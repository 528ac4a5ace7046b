//! Integration tests for the full reload pipeline.
//!
//! These tests drive `NearbyPhotosController` with the real
//! `DevicePositionProvider` and `PhotoServiceClient`, replacing only the
//! platform callbacks and the HTTP transport:
//! - permission → position → request sequencing
//! - retry timing on a paused clock
//! - defensive decoding of backend records
//! - stale reload results being discarded
//!
//! Run with: `cargo test --test reload_pipeline`

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use nearby_photos::controller::{
    ErrorKind, NearbyPhotosController, RequestState, MSG_NETWORK, MSG_PERMISSION, MSG_SERVER,
    MSG_TIMEOUT,
};
use nearby_photos::coord::Coordinates;
use nearby_photos::position::{
    AlwaysGranted, DevicePositionProvider, FixedGeolocator, LocationPermission,
    PermissionCallback, PermissionStatus, UnavailableGeolocator,
};
use nearby_photos::service::{
    AsyncHttpClient, HttpResponse, PhotoItem, PhotoServiceClient, TransportError,
};

// ============================================================================
// Helper Types
// ============================================================================

const ENDPOINT: &str = "https://photos.example.com/fiveNearest";

fn sf() -> Coordinates {
    Coordinates::new(37.7749, -122.4194).unwrap()
}

/// Scripted backend. Each reply carries its own delay; the last one repeats.
#[derive(Clone, Default)]
struct ScriptedBackend {
    replies: Arc<Mutex<VecDeque<(Duration, Result<HttpResponse, TransportError>)>>>,
    bodies: Arc<Mutex<Vec<String>>>,
}

impl ScriptedBackend {
    fn new() -> Self {
        Self::default()
    }

    fn then(self, delay: Duration, reply: Result<HttpResponse, TransportError>) -> Self {
        self.replies.lock().unwrap().push_back((delay, reply));
        self
    }

    fn ok(self, body: &str) -> Self {
        self.then(Duration::ZERO, Ok(HttpResponse::new(200, body)))
    }

    fn status(self, status: u16) -> Self {
        self.then(Duration::ZERO, Ok(HttpResponse::new(status, "")))
    }

    fn calls(&self) -> usize {
        self.bodies.lock().unwrap().len()
    }

    fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

impl AsyncHttpClient for ScriptedBackend {
    async fn post_json(&self, _url: &str, json_body: &str) -> Result<HttpResponse, TransportError> {
        self.bodies.lock().unwrap().push(json_body.to_string());
        let (delay, reply) = {
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 {
                replies.pop_front().unwrap()
            } else {
                replies.front().cloned().unwrap()
            }
        };
        tokio::time::sleep(delay).await;
        reply
    }
}

/// Permission gate answering with a fixed status and counting requests.
#[derive(Clone)]
struct ScriptedPermission {
    status: PermissionStatus,
    requests: Arc<AtomicUsize>,
}

impl ScriptedPermission {
    fn new(status: PermissionStatus) -> Self {
        Self {
            status,
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl LocationPermission for ScriptedPermission {
    fn request_fine_location(&self, on_result: PermissionCallback) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        on_result(self.status);
    }
}

fn controller_with(
    backend: &ScriptedBackend,
) -> NearbyPhotosController<
    DevicePositionProvider<AlwaysGranted, FixedGeolocator>,
    PhotoServiceClient<ScriptedBackend>,
> {
    let position = DevicePositionProvider::new(AlwaysGranted, FixedGeolocator::new(sf()));
    let service = PhotoServiceClient::new(backend.clone(), ENDPOINT);
    NearbyPhotosController::new(position, service)
}

// ============================================================================
// Integration Tests
// ============================================================================

#[tokio::test]
async fn test_successful_reload_keeps_backend_order_and_drops_malformed() {
    let backend = ScriptedBackend::new().ok(
        r#"{"images": [
            {"address": "Lot_C", "url": "https://img.example.com/c.jpg"},
            {"address": "", "url": "https://img.example.com/empty.jpg"},
            {"address": "Lot_A", "url": "https://img.example.com/a.jpg"},
            {"address": "Lot_X"},
            {"address": 7, "url": "https://img.example.com/n.jpg"},
            {"address": "Lot_B", "url": "https://img.example.com/b.jpg"}
        ]}"#,
    );
    let controller = controller_with(&backend);

    let state = controller.reload_now().await;

    let expected = vec![
        PhotoItem::new("Lot_C", "https://img.example.com/c.jpg"),
        PhotoItem::new("Lot_A", "https://img.example.com/a.jpg"),
        PhotoItem::new("Lot_B", "https://img.example.com/b.jpg"),
    ];
    assert_eq!(
        state,
        RequestState::Success {
            coordinates: sf(),
            items: expected
        }
    );

    let body: serde_json::Value = serde_json::from_str(&backend.bodies()[0]).unwrap();
    assert_eq!(body, serde_json::json!({"lat": 37.7749, "lng": -122.4194}));

    let view = controller.view();
    assert_eq!(view.coordinates_label().as_deref(), Some("Lat 37.77490, Lng -122.41940"));
    assert_eq!(view.items[0].display_label(), "Lot C");
}

#[tokio::test]
async fn test_permission_denied_never_touches_network() {
    let backend = ScriptedBackend::new().ok(r#"{"images": []}"#);
    let permission = ScriptedPermission::new(PermissionStatus::Denied);
    let position = DevicePositionProvider::new(permission.clone(), FixedGeolocator::new(sf()));
    let controller =
        NearbyPhotosController::new(position, PhotoServiceClient::new(backend.clone(), ENDPOINT));

    let state = controller.reload_now().await;

    assert_eq!(state.error_kind(), Some(ErrorKind::PermissionDenied));
    assert_eq!(state.error_message(), Some(MSG_PERMISSION));
    assert_eq!(permission.requests.load(Ordering::SeqCst), 1);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_unavailable_position_maps_to_network_message() {
    let backend = ScriptedBackend::new().ok(r#"{"images": []}"#);
    let position =
        DevicePositionProvider::new(AlwaysGranted, UnavailableGeolocator::new("no GPS hardware"));
    let controller =
        NearbyPhotosController::new(position, PhotoServiceClient::new(backend.clone(), ENDPOINT));

    let state = controller.reload_now().await;

    assert_eq!(state.error_kind(), Some(ErrorKind::PositionUnavailable));
    assert_eq!(state.error_message(), Some(MSG_NETWORK));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_server_errors_retried_then_surface() {
    let backend = ScriptedBackend::new().status(503);
    let controller = controller_with(&backend);

    let started = tokio::time::Instant::now();
    let state = controller.reload_now().await;

    assert_eq!(state.error_message(), Some(MSG_SERVER));
    assert!(state.items().is_empty());
    assert_eq!(backend.calls(), 4);
    assert!(started.elapsed() >= Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn test_client_error_fails_without_retry() {
    let backend = ScriptedBackend::new().status(400);
    let controller = controller_with(&backend);

    let state = controller.reload_now().await;

    assert_eq!(state.error_kind(), Some(ErrorKind::ServerError));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_transient_failure_then_success() {
    let backend = ScriptedBackend::new()
        .then(Duration::ZERO, Err(TransportError::Connect("refused".into())))
        .status(502)
        .ok(r#"{"images": [{"address": "a", "url": "u"}]}"#);
    let controller = controller_with(&backend);

    let state = controller.reload_now().await;

    assert_eq!(state.items(), &[PhotoItem::new("a", "u")]);
    assert_eq!(backend.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_hung_backend_times_out() {
    let backend = ScriptedBackend::new().then(
        Duration::from_secs(60),
        Ok(HttpResponse::new(200, r#"{"images": []}"#)),
    );
    let controller = controller_with(&backend);

    let state = controller.reload_now().await;

    assert_eq!(state.error_kind(), Some(ErrorKind::RequestTimeout));
    assert_eq!(state.error_message(), Some(MSG_TIMEOUT));
    assert_eq!(backend.calls(), 4);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let backend = ScriptedBackend::new().ok("<html>502 Bad Gateway</html>");
    let controller = controller_with(&backend);

    let state = controller.reload_now().await;

    assert_eq!(state.error_kind(), Some(ErrorKind::DecodeError));
    assert_eq!(state.error_message(), Some(MSG_SERVER));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_reloads_commit_latest_only() {
    let backend = ScriptedBackend::new()
        .then(
            Duration::from_secs(4),
            Ok(HttpResponse::new(200, r#"{"images": [{"address": "stale", "url": "s"}]}"#)),
        )
        .then(
            Duration::from_secs(1),
            Ok(HttpResponse::new(200, r#"{"images": [{"address": "fresh", "url": "f"}]}"#)),
        );
    let controller = controller_with(&backend);

    controller.reload().unwrap();
    tokio::task::yield_now().await;
    controller.reload().unwrap();
    assert!(controller.current_state().is_loading());

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(backend.calls(), 2);
    assert_eq!(controller.generation(), 2);
    assert_eq!(controller.current_state().items(), &[PhotoItem::new("fresh", "f")]);
}

#[tokio::test]
async fn test_repeated_reloads_are_identical() {
    let backend = ScriptedBackend::new().ok(
        r#"{"images": [{"address": "one", "url": "1"}, {"address": "two", "url": "2"}]}"#,
    );
    let controller = controller_with(&backend);

    let first = controller.reload_now().await;
    let second = controller.reload_now().await;

    assert_eq!(first, second);
    assert_eq!(first.items().len(), 2);
}

#[tokio::test]
async fn test_empty_backend_result_is_success() {
    let backend = ScriptedBackend::new().ok(r#"{"images": []}"#);
    let controller = controller_with(&backend);

    let state = controller.reload_now().await;

    assert!(matches!(state, RequestState::Success { .. }));
    assert_eq!(controller.view().status_line(), "No photos found nearby.");
}

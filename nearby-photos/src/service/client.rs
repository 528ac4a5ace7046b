//! Photo search backend client.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::decode::{decode_nearby, DecodedBatch};
use super::http::{AsyncHttpClient, DEFAULT_REQUEST_TIMEOUT_MS};
use super::retry::RetryPolicy;
use super::types::{PhotoItem, ServiceError};
use crate::coord::Coordinates;

/// Path of the nearest-photos endpoint, relative to the backend base URL.
pub const NEARBY_PATH: &str = "fiveNearest";

/// Looks up photos near a position.
pub trait PhotoService: Send + Sync {
    /// Fetch the photos nearest to `coordinates`, in backend order.
    fn fetch_nearby(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Result<Vec<PhotoItem>, ServiceError>> + Send;
}

/// HTTP client for the photo search backend.
///
/// Each `fetch_nearby` POSTs `{"lat": .., "lng": ..}` to the endpoint and
/// retries transient failures according to its [`RetryPolicy`]. A 4xx
/// response is returned immediately.
///
/// # Example
///
/// ```ignore
/// use nearby_photos::service::{AsyncReqwestClient, PhotoServiceClient};
///
/// let http = AsyncReqwestClient::new()?;
/// let client = PhotoServiceClient::new(http, "https://photos.example.com/fiveNearest");
/// let items = client.fetch_nearby(coords).await?;
/// ```
pub struct PhotoServiceClient<C: AsyncHttpClient> {
    http_client: C,
    endpoint: String,
    retry: RetryPolicy,
    request_timeout: Duration,
    dropped_records: AtomicU64,
}

impl<C: AsyncHttpClient> PhotoServiceClient<C> {
    /// Creates a client for `endpoint` with the default retry policy
    /// (3 retries, 1 second apart) and a 15 second request timeout.
    pub fn new(http_client: C, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            retry: RetryPolicy::default(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            dropped_records: AtomicU64::new(0),
        }
    }

    /// Set the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the per-attempt request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Total backend records dropped as malformed since this client was created.
    pub fn dropped_records(&self) -> u64 {
        self.dropped_records.load(Ordering::Relaxed)
    }

    async fn attempt(&self, body: &str) -> Result<DecodedBatch, ServiceError> {
        let timeout_ms = self.request_timeout.as_millis() as u64;

        let response = match tokio::time::timeout(
            self.request_timeout,
            self.http_client.post_json(&self.endpoint, body),
        )
        .await
        {
            Ok(result) => result.map_err(|e| ServiceError::from_transport(e, timeout_ms))?,
            Err(_) => return Err(ServiceError::Timeout { timeout_ms }),
        };

        if !response.is_success() {
            return Err(ServiceError::Server {
                status: response.status,
            });
        }

        decode_nearby(&response.body)
    }
}

impl<C: AsyncHttpClient> PhotoService for PhotoServiceClient<C> {
    async fn fetch_nearby(&self, coordinates: Coordinates) -> Result<Vec<PhotoItem>, ServiceError> {
        let body = serde_json::to_string(&coordinates)
            .map_err(|e| ServiceError::Decode(format!("request body: {}", e)))?;
        let mut attempt = 1;

        loop {
            match self.attempt(&body).await {
                Ok(batch) => {
                    if batch.dropped > 0 {
                        self.dropped_records
                            .fetch_add(batch.dropped as u64, Ordering::Relaxed);
                        warn!(
                            dropped = batch.dropped,
                            kept = batch.items.len(),
                            "Dropped malformed photo records"
                        );
                    }
                    info!(
                        endpoint = %self.endpoint,
                        items = batch.items.len(),
                        attempt,
                        "Nearby photos fetched"
                    );
                    return Ok(batch.items);
                }
                Err(err) if err.is_transient() => match self.retry.delay_for_attempt(attempt) {
                    Some(delay) => {
                        warn!(
                            endpoint = %self.endpoint,
                            error = %err,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            "Transient backend failure, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => {
                        warn!(endpoint = %self.endpoint, error = %err, attempt, "Retries exhausted");
                        return Err(err);
                    }
                },
                Err(err) => {
                    debug!(endpoint = %self.endpoint, error = %err, "Backend request rejected");
                    return Err(err);
                }
            }
        }
    }
}

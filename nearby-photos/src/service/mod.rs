//! Photo search backend client
//!
//! This module talks to the backend's nearest-photos endpoint:
//!
//! - [`AsyncHttpClient`] - transport abstraction (reqwest in production, mocks in tests)
//! - [`RetryPolicy`] - how transient failures are retried
//! - [`decode_nearby`] - defensive response decoding
//! - [`PhotoServiceClient`] - the [`PhotoService`] implementation tying them together
//!
//! # Wire Protocol
//!
//! ```text
//! POST {base_url}/fiveNearest
//! Content-Type: application/json
//!
//! {"lat": 37.7749, "lng": -122.4194}
//!
//! 200 OK
//! {"images": [{"address": "...", "url": "..."}, ...]}
//! ```

mod client;
mod decode;
mod http;
mod retry;
mod types;

pub use client::{PhotoService, PhotoServiceClient, NEARBY_PATH};
pub use decode::{decode_nearby, DecodedBatch};
pub use http::{
    AsyncHttpClient, AsyncReqwestClient, HttpResponse, TransportError, DEFAULT_REQUEST_TIMEOUT_MS,
};
pub use retry::{RetryPolicy, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS};
pub use types::{PhotoItem, ServiceError};

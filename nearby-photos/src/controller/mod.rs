//! Reload orchestration and the observable request state.
//!
//! [`NearbyPhotosController`] runs one strictly sequential cycle per reload:
//!
//! ```text
//! reload() ──► Loading ──► PositionProvider::resolve()
//!                              │ Err ─────────────────────► Failed
//!                              ▼ Ok
//!                          PhotoService::fetch_nearby()
//!                              │ Err ─────────────────────► Failed
//!                              ▼ Ok
//!                          Success { coordinates, items }
//! ```
//!
//! Failures are recovered here and surface only as a [`RequestState::Failed`]
//! carrying a fixed user-facing message; see [`ErrorKind::user_message`].

mod reload;
mod state;

pub use reload::{NearbyPhotosController, ReloadError};
pub use state::{ErrorKind, RequestState, MSG_NETWORK, MSG_PERMISSION, MSG_SERVER, MSG_TIMEOUT};

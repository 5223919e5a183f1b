//! HTTP API server for the companion world state.
//!
//! This crate exposes the state mutation engine over Axum:
//!
//! - **Event endpoints** (`POST /state/outfit`, `/state/interaction`,
//!   `/state/call`) that feed client reports into the
//!   [`StateEngine`](companion_state::StateEngine)
//! - **Read endpoints** (`GET /state/wind`, `GET /state`) derived from the
//!   persisted documents
//! - **`GET /health`** for liveness checks
//!
//! Every `/state` route sits behind the `X-API-Key` check in [`auth`].
//! Internal failures answer HTTP 500 with `{"error", "status"}`.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use state::AppState;

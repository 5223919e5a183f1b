//! REST API endpoint handlers.
//!
//! Event handlers decode the report, hand it to the
//! [`StateEngine`](companion_state::StateEngine) and answer with a small
//! acknowledgement. Any failure becomes an [`ApiError`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness check (no API key) |
//! | `GET` | `/state` | Current state document |
//! | `POST` | `/state/outfit` | Replace the current outfit |
//! | `POST` | `/state/interaction` | Record a touch, returns bonding score |
//! | `POST` | `/state/call` | Call started / ended |
//! | `GET` | `/state/wind` | Wind at the current location |

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use companion_types::{CallReport, InteractionReport, OutfitReport, StateDocument, WindState};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Acknowledgement for event endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ack {
    /// Always `"success"`.
    pub status: &'static str,
}

impl Ack {
    const fn success() -> Self {
        Self { status: "success" }
    }
}

/// Response body for `POST /state/interaction`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionAck {
    /// Always `"success"`.
    pub status: &'static str,
    /// Bonding score after the interaction.
    pub bonding_score: f64,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Server version.
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness check.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ---------------------------------------------------------------------------
// GET /state
// ---------------------------------------------------------------------------

/// Return the current state document.
///
/// # Errors
///
/// Returns [`ApiError::Storage`] if the document cannot be loaded.
pub async fn get_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StateDocument>, ApiError> {
    Ok(Json(state.engine.snapshot().await?))
}

// ---------------------------------------------------------------------------
// POST /state/outfit
// ---------------------------------------------------------------------------

/// Replace the current outfit with the reported one.
///
/// # Errors
///
/// Returns [`ApiError`] if the body cannot be decoded or the document
/// cannot be saved.
pub async fn update_outfit(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OutfitReport>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(report) = body?;
    state.engine.sync_outfit(&report).await?;
    Ok(Json(Ack::success()))
}

// ---------------------------------------------------------------------------
// POST /state/interaction
// ---------------------------------------------------------------------------

/// Record a touch interaction and return the new bonding score.
///
/// # Errors
///
/// Returns [`ApiError`] if the body cannot be decoded or the document
/// cannot be saved.
pub async fn record_interaction(
    State(state): State<Arc<AppState>>,
    body: Result<Json<InteractionReport>, JsonRejection>,
) -> Result<Json<InteractionAck>, ApiError> {
    let Json(report) = body?;
    let outcome = state.engine.record_interaction(&report).await?;
    Ok(Json(InteractionAck {
        status: "success",
        bonding_score: outcome.bonding_score,
    }))
}

// ---------------------------------------------------------------------------
// POST /state/call
// ---------------------------------------------------------------------------

/// Apply a call lifecycle event.
///
/// # Errors
///
/// Returns [`ApiError`] if the body cannot be decoded or the document
/// cannot be saved.
pub async fn update_call_state(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CallReport>, JsonRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Json(report) = body?;
    state.engine.track_call(&report).await?;
    Ok(Json(Ack::success()))
}

// ---------------------------------------------------------------------------
// GET /state/wind
// ---------------------------------------------------------------------------

/// Wind at the companion's current location.
///
/// # Errors
///
/// Returns [`ApiError::Storage`] if either document cannot be loaded.
pub async fn get_wind(State(state): State<Arc<AppState>>) -> Result<Json<WindState>, ApiError> {
    Ok(Json(state.engine.current_wind().await?))
}

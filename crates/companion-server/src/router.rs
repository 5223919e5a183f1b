//! Axum router construction for the API server.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing enabled. Every `/state` route requires a valid `X-API-Key`.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the server.
///
/// The router includes:
/// - `GET /health` -- liveness check, no API key
/// - `GET /state` -- current state document
/// - `POST /state/outfit` -- outfit sync
/// - `POST /state/interaction` -- touch interaction
/// - `POST /state/call` -- call lifecycle event
/// - `GET /state/wind` -- wind at the current location
///
/// CORS allows any origin since the client is a native app.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/state", get(handlers::get_state))
        .route("/state/outfit", post(handlers::update_outfit))
        .route("/state/interaction", post(handlers::record_interaction))
        .route("/state/call", post(handlers::update_call_state))
        .route("/state/wind", get(handlers::get_wind))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

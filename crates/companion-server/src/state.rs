//! Shared application state for the API server.

use std::sync::Arc;

use companion_state::StateEngine;

use crate::auth::ApiKeyVerifier;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// engine serializes document mutations itself, so handlers need no
/// further locking.
#[derive(Clone)]
pub struct AppState {
    /// Applies client events to the state document.
    pub engine: StateEngine,
    /// Checks the `X-API-Key` header.
    pub verifier: Arc<dyn ApiKeyVerifier>,
}

impl AppState {
    /// Create application state from an engine and a key verifier.
    pub const fn new(engine: StateEngine, verifier: Arc<dyn ApiKeyVerifier>) -> Self {
        Self { engine, verifier }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

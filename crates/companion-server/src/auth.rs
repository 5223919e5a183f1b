//! API key authentication.
//!
//! Clients present a shared secret in the `X-API-Key` header. Checking it
//! is delegated to an [`ApiKeyVerifier`] so deployments can swap the
//! static key for something else without touching the routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the client's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Decides whether a presented API key is acceptable.
pub trait ApiKeyVerifier: Send + Sync {
    /// Return `true` if `presented` grants access.
    fn verify(&self, presented: &str) -> bool;
}

/// Accepts exactly one configured key. An empty key accepts nothing.
#[derive(Clone)]
pub struct StaticApiKey {
    key: String,
}

impl StaticApiKey {
    /// Create a verifier for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Whether a key is configured at all.
    pub fn is_configured(&self) -> bool {
        !self.key.is_empty()
    }
}

impl std::fmt::Debug for StaticApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticApiKey")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl ApiKeyVerifier for StaticApiKey {
    fn verify(&self, presented: &str) -> bool {
        if !self.is_configured() || presented.len() != self.key.len() {
            return false;
        }
        // Compare every byte so the time taken does not depend on where
        // the first mismatch is.
        self.key
            .bytes()
            .zip(presented.bytes())
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
    }
}

/// Middleware rejecting requests without a valid `X-API-Key` header.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] (HTTP 403) when the header is
/// missing, not valid UTF-8, or rejected by the verifier.
pub async fn require_api_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if state.verifier.verify(key) => Ok(next.run(request).await),
        _ => Err(ApiError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_key_matches_exactly() {
        let verifier = StaticApiKey::new("sekrit");
        assert!(verifier.verify("sekrit"));
        assert!(!verifier.verify("sekrit "));
        assert!(!verifier.verify("sekriT"));
        assert!(!verifier.verify(""));
    }

    #[test]
    fn empty_key_rejects_everything() {
        let verifier = StaticApiKey::new("");
        assert!(!verifier.is_configured());
        assert!(!verifier.verify(""));
        assert!(!verifier.verify("anything"));
    }

    #[test]
    fn debug_hides_key() {
        let rendered = format!("{:?}", StaticApiKey::new("sekrit"));
        assert!(!rendered.contains("sekrit"));
    }
}

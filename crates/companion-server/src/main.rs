//! Companion state server binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `companion-config.yaml` (defaults when absent)
//! 2. Initialize structured logging (tracing), pretty or JSON
//! 3. Open the state store and the memory log
//! 4. Serve the HTTP API until `Ctrl-C`

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use companion_server::auth::StaticApiKey;
use companion_server::{start_server, AppState, ServerConfig};
use companion_state::config::{CompanionConfig, LogFormat, LoggingConfig};
use companion_state::memory::JsonlMemoryStore;
use companion_state::{StateEngine, StateStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "companion-config.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CompanionConfig::load_or_default(Path::new(CONFIG_PATH))
        .with_context(|| format!("failed to load {CONFIG_PATH}"))?;

    init_tracing(&config.logging);
    info!(
        host = config.server.host,
        port = config.server.port,
        state_file = %config.storage.state_file.display(),
        world_file = %config.storage.world_file.display(),
        "Configuration loaded"
    );

    let verifier = StaticApiKey::new(config.auth.api_key.clone());
    if !verifier.is_configured() {
        warn!("No API key configured, every /state request will be rejected");
    }

    let store = Arc::new(StateStore::from_config(&config.storage));
    let memories = Arc::new(JsonlMemoryStore::new(config.storage.memory_file.clone()));
    info!(memory_file = %memories.path().display(), "Memory log ready");

    let state = Arc::new(AppState::new(
        StateEngine::new(store, memories),
        Arc::new(verifier),
    ));

    start_server(&ServerConfig::from(&config.server), state)
        .await
        .context("server failed")?;

    Ok(())
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

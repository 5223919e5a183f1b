//! Event entry points for the state mutation engine.
//!
//! [`StateEngine`] ties the [`StateStore`] to the mutators. Each event
//! runs as one `load -> mutate -> save` transaction through
//! [`StateStore::mutate`]; side effects that leave the process (memory
//! records) are released only after the save succeeded, so a failed save
//! leaves no trace anywhere.

use std::sync::Arc;

use companion_types::{
    CallReport, InteractionReport, MemoryRecord, OutfitReport, StateDocument, WindState,
};

use crate::call::{self, CallTransition};
use crate::clock::unix_now;
use crate::error::StoreError;
use crate::interaction::{self, InteractionOutcome};
use crate::memory::MemoryStore;
use crate::outfit;
use crate::store::StateStore;
use crate::wind;

/// Applies client events to the shared state document.
#[derive(Clone)]
pub struct StateEngine {
    store: Arc<StateStore>,
    memories: Arc<dyn MemoryStore>,
}

impl std::fmt::Debug for StateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateEngine")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl StateEngine {
    /// Create an engine over `store`, filing memories into `memories`.
    pub const fn new(store: Arc<StateStore>, memories: Arc<dyn MemoryStore>) -> Self {
        Self { store, memories }
    }

    /// The underlying document store.
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Replace the current outfit with the reported one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the state document cannot be loaded or saved.
    pub async fn sync_outfit(&self, report: &OutfitReport) -> Result<(), StoreError> {
        let now = unix_now();
        self.store
            .mutate(|doc| outfit::apply_outfit(doc, report, now))
            .await
    }

    /// Record a touch and return the updated bonding score.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the state document cannot be loaded or saved.
    pub async fn record_interaction(
        &self,
        report: &InteractionReport,
    ) -> Result<InteractionOutcome, StoreError> {
        let now = unix_now();
        self.store
            .mutate(|doc| interaction::record_interaction(doc, report, now))
            .await
    }

    /// Apply a call lifecycle event.
    ///
    /// When a call ends the memory record is handed to the memory store
    /// after the document is saved. A memory store failure is logged and
    /// does not undo the state change.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the state document cannot be loaded or saved.
    pub async fn track_call(&self, report: &CallReport) -> Result<CallTransition, StoreError> {
        let now = unix_now();
        let transition = self
            .store
            .mutate(|doc| call::apply_call_event(doc, report, now))
            .await?;

        if let CallTransition::Ended { memory, .. } = &transition {
            self.file_memory(memory.clone()).await;
        }

        Ok(transition)
    }

    /// Hand `memory` to the memory store on the blocking pool. Failures are
    /// logged only.
    async fn file_memory(&self, memory: MemoryRecord) {
        let memories = Arc::clone(&self.memories);
        let memory_id = memory.id;
        match tokio::task::spawn_blocking(move || memories.save(&memory)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::error!(error = %e, %memory_id, "Failed to save call memory");
            }
            Err(e) => {
                tracing::error!(error = %e, %memory_id, "Call memory task failed");
            }
        }
    }

    /// Wind at the companion's current location.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either document cannot be loaded.
    pub async fn current_wind(&self) -> Result<WindState, StoreError> {
        let (state, world) = self.store.load().await?;
        Ok(wind::derive_wind(&state, &world))
    }

    /// The current state document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the state document cannot be loaded.
    pub async fn snapshot(&self) -> Result<StateDocument, StoreError> {
        self.store.load_state().await
    }
}

//! Durable memory store collaborator.
//!
//! Finished calls leave a human-readable memory behind. The engine only
//! produces [`MemoryRecord`]s; where they end up is behind the
//! [`MemoryStore`] trait. [`JsonlMemoryStore`] appends them to a log file,
//! [`InMemoryMemoryStore`] keeps them in process.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use companion_types::MemoryRecord;

use crate::error::MemoryError;

/// Sink for durable memory records.
pub trait MemoryStore: Send + Sync {
    /// Persist one memory.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError`] if the record could not be stored.
    fn save(&self, record: &MemoryRecord) -> Result<(), MemoryError>;
}

/// Appends each memory as one JSON line to a file.
#[derive(Debug)]
pub struct JsonlMemoryStore {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl JsonlMemoryStore {
    /// Create a store writing to `path`. The file and its parent
    /// directory are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    /// Path of the memory log.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MemoryStore for JsonlMemoryStore {
    fn save(&self, record: &MemoryRecord) -> Result<(), MemoryError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let _guard = self.append_lock.lock().map_err(|_poisoned| MemoryError::Poisoned)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;

        tracing::debug!(
            memory_id = %record.id,
            context = %record.context_chain_id,
            "Memory appended"
        );
        Ok(())
    }
}

/// Keeps memories in memory. Used when no memory file is configured and
/// in tests.
#[derive(Debug, Default)]
pub struct InMemoryMemoryStore {
    records: Mutex<Vec<MemoryRecord>>,
}

impl InMemoryMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored memory, oldest first.
    pub fn records(&self) -> Vec<MemoryRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl MemoryStore for InMemoryMemoryStore {
    fn save(&self, record: &MemoryRecord) -> Result<(), MemoryError> {
        self.records
            .lock()
            .map_err(|_poisoned| MemoryError::Poisoned)?
            .push(record.clone());
        Ok(())
    }
}

//! Persistent storage for the shared state document and the world
//! reference document.
//!
//! # File layout
//!
//! ```text
//! state.json   {"her": { ...StateDocument... }, ...other sections}
//! world.json   {"locations": { "<slug>": {"is_outdoor": bool, ...} }, ...}
//! ```
//!
//! Sections and fields this crate does not model are carried through
//! every load/save unchanged.
//!
//! # Consistency
//!
//! All writes go through [`StateStore::mutate`] (or [`StateStore::save`]),
//! which hold an async mutex for the whole load -> transform -> save
//! sequence. Two concurrent events therefore serialize instead of
//! overwriting each other's changes. Saves write a sibling temp file and
//! rename it into place, so readers never see a half-written document and
//! a failed save leaves the previous file intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use companion_types::{StateDocument, WorldDocument};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::config::StorageConfig;
use crate::error::StoreError;
use crate::interaction;

/// Root of the state file. The companion's document lives under `her`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StateEnvelope {
    #[serde(default)]
    her: StateDocument,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Owner of the canonical state document and the world document.
#[derive(Debug)]
pub struct StateStore {
    state_path: PathBuf,
    world_path: PathBuf,
    write_lock: Mutex<()>,
}

impl StateStore {
    /// Create a store backed by the given files. Nothing is read until the
    /// first operation; missing files are treated as empty documents.
    pub fn new(state_path: impl Into<PathBuf>, world_path: impl Into<PathBuf>) -> Self {
        Self {
            state_path: state_path.into(),
            world_path: world_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a store from the `storage` section of the configuration.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.state_file.clone(), config.world_file.clone())
    }

    /// Path of the state document file.
    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    /// Load the current state document and the world document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either file exists but cannot be read or
    /// parsed.
    pub async fn load(&self) -> Result<(StateDocument, WorldDocument), StoreError> {
        let state = self.load_state().await?;
        let world = self.load_world().await?;
        Ok((state, world))
    }

    /// Load the current state document, defaulting absent fields.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the state file cannot be read or parsed.
    pub async fn load_state(&self) -> Result<StateDocument, StoreError> {
        let _guard = self.write_lock.lock().await;
        let envelope: StateEnvelope = read_document(&self.state_path).await?;
        Ok(repaired(envelope.her))
    }

    /// Load the world reference document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the world file cannot be read or parsed.
    pub async fn load_world(&self) -> Result<WorldDocument, StoreError> {
        read_document(&self.world_path).await
    }

    /// Replace the persisted state document with `document` in full.
    ///
    /// Prefer [`StateStore::mutate`] for read-modify-write sequences; a
    /// bare `save` of a document loaded earlier can overwrite changes made
    /// in between.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the existing file cannot be parsed or the
    /// new one cannot be written. The previous file is left untouched.
    pub async fn save(&self, document: &StateDocument) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut envelope: StateEnvelope = read_document(&self.state_path).await?;
        envelope.her = document.clone();
        write_document(&self.state_path, &envelope).await
    }

    /// Apply `transform` to the state document under exclusive access and
    /// persist the result.
    ///
    /// The transform sees a document freshly loaded inside the critical
    /// section, and its return value is handed back only once the save has
    /// succeeded. If loading or saving fails nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the state file cannot be read, parsed, or
    /// written.
    pub async fn mutate<F, R>(&self, transform: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut StateDocument) -> R,
    {
        let _guard = self.write_lock.lock().await;
        let mut envelope: StateEnvelope = read_document(&self.state_path).await?;
        envelope.her = repaired(envelope.her);

        let result = transform(&mut envelope.her);

        write_document(&self.state_path, &envelope).await?;
        Ok(result)
    }
}

/// Restore the document invariants on data written by other writers.
fn repaired(mut document: StateDocument) -> StateDocument {
    document.bonding_score = interaction::clamp_bonding(document.bonding_score);
    interaction::truncate_history(&mut document.interaction_history);
    document
}

/// Read and parse a JSON document. A missing file yields the default.
async fn read_document<T>(path: &Path) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "document missing, using defaults");
            return Ok(T::default());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `document` and atomically replace `path` with it.
async fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(document)?;
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let tmp_path = temp_path_for(path);
    tokio::fs::write(&tmp_path, &bytes).await.map_err(io_err)?;
    if let Err(source) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(io_err(source));
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "document saved");
    Ok(())
}

/// `state.json` -> `state.json.tmp`, in the same directory so the rename
/// stays on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

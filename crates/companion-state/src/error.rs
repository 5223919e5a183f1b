//! Error types for the state mutation engine.
//!
//! Only storage can fail. Missing request fields, unknown emotional
//! meanings and unknown locations all fall back to documented defaults
//! and never surface as errors.

use std::path::PathBuf;

/// Errors raised while loading or saving the persisted documents.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The document file could not be read or written.
    #[error("storage I/O error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The document file exists but does not hold a valid document.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The in-memory document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors raised by a memory store collaborator.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The memory log could not be written.
    #[error("memory store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be serialized.
    #[error("memory record serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The in-process store's lock was poisoned by a panicking writer.
    #[error("memory store lock poisoned")]
    Poisoned,
}

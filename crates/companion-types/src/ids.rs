//! Identifier types for the companion world state.
//!
//! Locations are named by stable string slugs shared with the client
//! (`"bedroom"`, `"beach"`, ...). Memory records are keyed by UUID v7 so
//! they sort by creation time in the durable memory log.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a memory record handed to the memory store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemoryId(pub Uuid);

impl MemoryId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for MemoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for MemoryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slug naming a place the companion can be (e.g. `bedroom`, `beach`).
///
/// Serialized as a bare string so the persisted document stays readable
/// by the other services that share it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    /// Create a location identifier from any string-like value.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Borrow the slug.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new(crate::structs::DEFAULT_LOCATION)
    }
}

impl core::fmt::Display for LocationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}

impl From<String> for LocationId {
    fn from(slug: String) -> Self {
        Self(slug)
    }
}

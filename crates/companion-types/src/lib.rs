//! Shared type definitions for the companion world state.
//!
//! This crate is the single source of truth for the documents and event
//! reports used across the workspace. It holds no logic beyond serde
//! defaults; the mutation rules live in `companion-state`.
//!
//! # Modules
//!
//! - [`ids`] -- Location slugs and memory record identifiers
//! - [`enums`] -- Activity status and call lifecycle events
//! - [`intensity`] -- Touch intensity kept as reported
//! - [`structs`] -- State, world, wind and memory documents
//! - [`requests`] -- Event reports sent by the client device

pub mod enums;
pub mod ids;
pub mod intensity;
pub mod requests;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{ActivityStatus, CallEvent};
pub use ids::{LocationId, MemoryId};
pub use intensity::Intensity;
pub use requests::{CallReport, InteractionReport, OutfitReport};
pub use structs::{
    DEFAULT_BONDING_SCORE, DEFAULT_CHANGE_REASON, DEFAULT_EMOTIONAL_MEANING, DEFAULT_LOCATION,
    DEFAULT_OUTFIT_STYLE, INTERACTION_KIND_TOUCH, InteractionRecord, LocationInfo, MemoryRecord,
    Outfit, StateDocument, WindState, WorldDocument,
};

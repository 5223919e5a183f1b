//! State mutation engine for the companion world state.
//!
//! This crate owns every rule about how client events change the shared
//! state document: outfit syncs, touch interactions and the bonding
//! score, the call lifecycle, and wind derivation.
//!
//! # Modules
//!
//! - [`store`] -- [`StateStore`]: atomic load/save of the state and world
//!   documents with an exclusive `mutate` transaction.
//! - [`engine`] -- [`StateEngine`]: one entry point per client event.
//! - [`outfit`] -- Wholesale outfit replacement.
//! - [`interaction`] -- Bounded interaction history and bonding model.
//! - [`touch`] -- `(part, gesture)` to emotional meaning classification.
//! - [`call`] -- Call lifecycle state machine and call memories.
//! - [`wind`] -- Location to wind parameters.
//! - [`memory`] -- [`MemoryStore`] trait and implementations.
//! - [`config`] -- Configuration loading from `companion-config.yaml`.
//! - [`clock`] -- Unix-seconds timestamps.
//! - [`error`] -- Storage and memory store errors.
//!
//! [`StateStore`]: store::StateStore
//! [`StateEngine`]: engine::StateEngine
//! [`MemoryStore`]: memory::MemoryStore

pub mod call;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod memory;
pub mod outfit;
pub mod store;
pub mod touch;
pub mod wind;

pub use engine::StateEngine;
pub use error::{MemoryError, StoreError};
pub use store::StateStore;

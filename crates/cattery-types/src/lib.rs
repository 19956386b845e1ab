//! Shared type definitions for the Cattery pet-economy engine.
//!
//! This crate is the single source of truth for all types used across the
//! Cattery workspace: identifiers, enumerations, entity records, and the
//! events the engine emits to its external driver.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers (accounts, callers, entities)
//! - [`enums`] -- Enumeration types (food kinds, growth stages, egg colors)
//! - [`structs`] -- Core entity records (eggs, cats) and read-only snapshots
//! - [`events`] -- Events emitted by successful commands

pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EggColor, FoodKind, GrantKind, Stage};
pub use events::{GrantTarget, PetEvent};
pub use ids::{Account, CallerId, CatId, EggId, OrnamentId};
pub use structs::{Cat, CatView, Egg};

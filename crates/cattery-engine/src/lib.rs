//! Growth and incubation engines plus the command/query facade for the
//! Cattery pet economy.
//!
//! [`PetEngine`] is the authoritative state engine an external driver
//! (RPC server, CLI, ledger-execution shim) embeds and invokes
//! synchronously, one command at a time. It wires together the four
//! components and guarantees that every command either fully commits or
//! fully fails:
//!
//! - [`cattery_access::AccessControl`] -- admin and capability sets
//! - [`cattery_ledger::Ledger`] -- credit and food balances
//! - [`cattery_registry::EntityRegistry`] -- cat and egg entities
//! - [`growth::GrowthEngine`] / [`incubation::IncubationEngine`] -- the
//!   feeding state machine and the mint/hatch lifecycle
//!
//! # Concurrency model
//!
//! Commands take `&mut self` and queries take `&self`; the borrow checker
//! is the single-writer-at-a-time discipline. There is no interior
//! mutability, no background work, no timers, and no operation that
//! suspends mid-mutation -- every call completes in bounded, synchronous
//! work. A driver that needs parallel readers can clone the engine state
//! or serialize commands through a queue of its choosing.
//!
//! # Modules
//!
//! - [`config`] -- construction-time design constants
//! - [`command`] -- serializable command/query surface for data-driven
//!   drivers
//! - [`engine`] -- the [`PetEngine`] facade
//! - [`growth`] -- the feeding/aging state machine
//! - [`incubation`] -- egg minting and hatching
//! - [`checkin`] -- the daily check-in credit reward
//! - [`error`] -- the engine-level error surface

pub mod checkin;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod growth;
pub mod incubation;

pub use checkin::CheckInBook;
pub use command::{Command, CommandOutput, Query, QueryOutput};
pub use config::EngineConfig;
pub use engine::PetEngine;
pub use error::EngineError;
pub use growth::GrowthEngine;
pub use incubation::IncubationEngine;

//! The engine-level error surface.
//!
//! Component errors pass through transparently so the driver sees the
//! specific kind (`NotOwner`, `AlreadyHatched`, `InsufficientBalance`,
//! ...) rather than a generalized failure. Every command is
//! all-or-nothing: when any of these errors is returned, no partial
//! mutation is visible.

use cattery_types::{Account, CallerId};

/// Errors returned by engine commands and queries.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An access-control check failed.
    #[error(transparent)]
    Access(#[from] cattery_access::AccessError),

    /// A balance operation failed.
    #[error(transparent)]
    Ledger(#[from] cattery_ledger::LedgerError),

    /// A registry operation failed.
    #[error(transparent)]
    Registry(#[from] cattery_registry::RegistryError),

    /// The incubation engine's capability grant is missing or revoked.
    #[error("unauthorized: incubator {caller} holds no capability grant")]
    MissingCapability {
        /// The incubator's component identity.
        caller: CallerId,
    },

    /// A quantity argument was zero or would overflow the price
    /// computation.
    #[error("invalid quantity: {reason}")]
    InvalidQuantity {
        /// Why the quantity was rejected.
        reason: &'static str,
    },

    /// The account already checked in for this day index.
    #[error("account {account} already checked in (day {day}, last {last_day})")]
    AlreadyCheckedIn {
        /// The account that tried to check in.
        account: Account,
        /// The rejected day index.
        day: u64,
        /// The most recent day index the account checked in at.
        last_day: u64,
    },
}

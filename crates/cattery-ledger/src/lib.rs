//! Credit and food balance accounting for the Cattery engine.
//!
//! The ledger is pure bookkeeping: it knows accounts, amounts, and food
//! kinds, and nothing about entities or permissions. Authorization for who
//! may mint credit lives in the calling engines -- the ledger's contract
//! is only that balances never go negative and never silently wrap.
//!
//! # Invariants
//!
//! - Every balance is an unsigned integer; a debit exceeding the current
//!   balance fails with [`LedgerError::InsufficientBalance`] and changes
//!   nothing.
//! - Credits use checked arithmetic; an overflow fails with
//!   [`LedgerError::ArithmeticOverflow`] rather than wrapping.
//! - There is no partial application: every operation either moves the
//!   full amount or fails with balances unchanged.

pub mod ledger;

pub use ledger::Ledger;

use cattery_types::{Account, FoodKind};
use serde::{Deserialize, Serialize};

/// The asset class a ledger operation acts on.
///
/// Used in error reporting so a failed debit names exactly which balance
/// was short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Asset {
    /// The credit balance of an account.
    Credit,
    /// The food balance of an account for one food kind.
    Food(FoodKind),
}

impl core::fmt::Display for Asset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Credit => write!(f, "credit"),
            Self::Food(kind) => write!(f, "food({kind:?})"),
        }
    }
}

/// Errors that can occur during ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A debit exceeded the current balance.
    #[error(
        "insufficient {asset} balance for {account}: requested {requested}, available {available}"
    )]
    InsufficientBalance {
        /// The account whose balance was short.
        account: Account,
        /// Which balance was debited.
        asset: Asset,
        /// The amount the caller attempted to debit.
        requested: u64,
        /// The amount actually available.
        available: u64,
    },

    /// A credit would overflow the balance counter.
    #[error("arithmetic overflow crediting {asset} balance for {account}")]
    ArithmeticOverflow {
        /// The account whose balance would overflow.
        account: Account,
        /// Which balance was credited.
        asset: Asset,
    },
}

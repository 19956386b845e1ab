//! Cat and egg entity registry for the Cattery engine.
//!
//! The registry exclusively owns every [`Egg`] and [`Cat`] record and
//! their ownership mapping. Entity ids come from monotonic counters and
//! are never reused, even when an entity is logically retired (a hatched
//! egg stays in the table, flagged).
//!
//! Mutations are gated two ways:
//!
//! - **Privileged mutators** (entity creation, stage and feed-count
//!   changes, hatch flagging) require the caller to be the registry itself
//!   or a component holding a capability grant in
//!   [`cattery_access::AccessControl`].
//! - **Owner-gated mutators** (nickname, ornaments) require the calling
//!   account to be the entity's current owner.
//!
//! [`Egg`]: cattery_types::Egg
//! [`Cat`]: cattery_types::Cat

pub mod registry;

pub use registry::{DEFAULT_NICKNAME, EntityRegistry};

use cattery_types::{Account, CallerId, CatId, EggId, OrnamentId};

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No cat exists with the given id.
    #[error("cat not found: {0}")]
    CatNotFound(CatId),

    /// No egg exists with the given id.
    #[error("egg not found: {0}")]
    EggNotFound(EggId),

    /// The calling account does not own the entity it tried to mutate.
    #[error("account {caller} is not the owner")]
    NotOwner {
        /// The rejected caller.
        caller: Account,
    },

    /// The egg has already hatched; an egg hatches at most once.
    #[error("egg {0} has already hatched")]
    AlreadyHatched(EggId),

    /// The cat already holds this ornament; no duplicate purchase.
    #[error("cat {cat} already owns ornament {ornament}")]
    AlreadyOwned {
        /// The cat in question.
        cat: CatId,
        /// The ornament it already holds.
        ornament: OrnamentId,
    },

    /// The nickname failed validation.
    #[error("invalid name: {reason}")]
    InvalidName {
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// The component caller holds no capability grant for privileged
    /// registry mutations.
    #[error("caller {caller} is not granted for privileged registry calls")]
    UnauthorizedCaller {
        /// The rejected component caller.
        caller: CallerId,
    },

    /// An id counter or feed counter cannot be advanced without wrapping.
    #[error("arithmetic overflow in registry counter")]
    ArithmeticOverflow,

    /// A ledger operation performed on behalf of this call failed.
    #[error(transparent)]
    Ledger(#[from] cattery_ledger::LedgerError),
}

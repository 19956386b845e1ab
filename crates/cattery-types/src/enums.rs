//! Enumeration types for the Cattery pet-economy engine.

use serde::{Deserialize, Serialize};

use crate::ids::EggId;

// ---------------------------------------------------------------------------
// Food kinds
// ---------------------------------------------------------------------------

/// A kind of cat food tracked per account in the ledger.
///
/// The set is closed: the driver buys and feeds food only in these kinds,
/// and every (account, kind) pair has its own independent balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    /// Everyday dry kibble.
    Kibble,
    /// Dried fish snack.
    DriedFish,
    /// A saucer of milk.
    Milk,
}

// ---------------------------------------------------------------------------
// Growth stages
// ---------------------------------------------------------------------------

/// The growth stage of a cat.
///
/// Every cat starts as a [`Stage::Kitten`] and transitions to
/// [`Stage::Adult`] exactly once, when its cumulative feed count reaches
/// the configured growth threshold. `Adult` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Newly hatched; not yet grown.
    Kitten,
    /// Fully grown. Terminal -- no further transitions.
    Adult,
}

// ---------------------------------------------------------------------------
// Egg colors
// ---------------------------------------------------------------------------

/// The shell color of an egg.
///
/// Color is derived deterministically from the egg id rather than stored,
/// so it is reproducible and verifiable by any observer that knows the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EggColor {
    /// Plain white shell.
    Snow,
    /// Dark grey shell.
    Charcoal,
    /// Warm orange shell.
    Amber,
    /// Pale green shell.
    Jade,
    /// Soft purple shell.
    Lilac,
}

impl EggColor {
    /// Derive the color for a given egg id.
    ///
    /// The mapping is the id taken modulo the palette size, so egg `#0` is
    /// always [`EggColor::Snow`], `#1` is always [`EggColor::Charcoal`],
    /// and so on. The mapping is pure: it never consults stored state.
    pub const fn from_id(id: EggId) -> Self {
        match id.into_inner().checked_rem(5) {
            Some(0) => Self::Snow,
            Some(1) => Self::Charcoal,
            Some(2) => Self::Amber,
            Some(3) => Self::Jade,
            _ => Self::Lilac,
        }
    }
}

// ---------------------------------------------------------------------------
// Grant kinds
// ---------------------------------------------------------------------------

/// The kind of authority conferred by a grant.
///
/// The two kinds are independent sets: holding one never implies the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GrantKind {
    /// Membership in the secondary-admin set (an [`Account`]).
    ///
    /// [`Account`]: crate::ids::Account
    Admin,
    /// A capability grant letting a component (a [`CallerId`]) invoke
    /// privileged registry mutations.
    ///
    /// [`CallerId`]: crate::ids::CallerId
    Capability,
}

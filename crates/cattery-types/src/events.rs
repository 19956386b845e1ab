//! Events emitted by successful engine commands.
//!
//! Events are returned to the driver alongside the command result; the
//! engine keeps no event log of its own. A command that fails emits
//! nothing.

use serde::{Deserialize, Serialize};

use crate::enums::{GrantKind, Stage};
use crate::ids::{Account, CallerId, CatId, EggId};

/// The target of a [`PetEvent::Granted`] event.
///
/// Admin grants target accounts; capability grants target component
/// callers. The two namespaces never mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantTarget {
    /// An account granted admin status.
    Account(Account),
    /// A component caller granted a capability.
    Caller(CallerId),
}

/// An event describing a state change the driver may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetEvent {
    /// An egg hatched into a cat.
    Hatched {
        /// The egg that hatched.
        egg: EggId,
        /// The newly created cat.
        cat: CatId,
        /// The owner of both.
        owner: Account,
    },
    /// A cat crossed the growth threshold and changed stage.
    ///
    /// Emitted at most once per cat: the transition to [`Stage::Adult`] is
    /// terminal and later feedings never re-emit it.
    StageChanged {
        /// The cat that grew.
        cat: CatId,
        /// The stage it is now in.
        new_stage: Stage,
    },
    /// A new admin or capability grant was recorded.
    ///
    /// Re-granting an existing target is an idempotent no-op and emits
    /// nothing.
    Granted {
        /// Which authority set gained a member.
        kind: GrantKind,
        /// Who was granted.
        target: GrantTarget,
    },
    /// An account checked in and received its daily credit reward.
    CheckedIn {
        /// The account that checked in.
        account: Account,
        /// The driver-supplied day index.
        day: u64,
        /// The credit amount awarded.
        reward: u64,
    },
}

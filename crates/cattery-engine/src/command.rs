//! Serializable command/query surface for data-driven drivers.
//!
//! Drivers that prefer to speak data instead of method calls (an RPC
//! server deserializing requests, a replay harness) build a [`Command`]
//! or [`Query`] and hand it to [`PetEngine::execute`] /
//! [`PetEngine::query`]. The typed methods on [`PetEngine`] remain the
//! primary surface; this layer is a thin, lossless mapping onto them.
//!
//! [`PetEngine`]: crate::engine::PetEngine
//! [`PetEngine::execute`]: crate::engine::PetEngine::execute
//! [`PetEngine::query`]: crate::engine::PetEngine::query

use serde::{Deserialize, Serialize};

use cattery_types::{Account, CallerId, CatId, CatView, EggColor, EggId, FoodKind, OrnamentId, PetEvent};

/// A state-mutating command submitted by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Mint a new egg for `owner`.
    MintEgg {
        /// The account that will own the egg.
        owner: Account,
    },
    /// Hatch an egg into a cat.
    HatchOut {
        /// The account submitting the command. Must own the egg.
        caller: Account,
        /// The egg to hatch.
        egg: EggId,
    },
    /// Add an account to the admin set.
    GrantAdmin {
        /// The account submitting the command. Must be an admin.
        caller: Account,
        /// The account to promote.
        account: Account,
    },
    /// Grant a component caller the privileged-registry capability.
    GrantCapability {
        /// The account submitting the command. Must be the root admin.
        caller: Account,
        /// The component to authorize.
        target: CallerId,
    },
    /// Revoke a component caller's capability.
    RevokeCapability {
        /// The account submitting the command. Must be the root admin.
        caller: Account,
        /// The component to deauthorize.
        target: CallerId,
    },
    /// Rename a cat.
    ChangeNickname {
        /// The account submitting the command. Must own the cat.
        caller: Account,
        /// The cat to rename.
        cat: CatId,
        /// The new nickname.
        name: String,
    },
    /// Buy an ornament for a cat at the configured price.
    BuyOrnament {
        /// The account submitting the command. Must own the cat.
        caller: Account,
        /// The cat to decorate.
        cat: CatId,
        /// The ornament to buy.
        ornament: OrnamentId,
    },
    /// Buy food at the configured per-unit price.
    BuyFood {
        /// The paying account.
        caller: Account,
        /// The kind of food to buy.
        kind: FoodKind,
        /// Units to buy. Must be non-zero.
        quantity: u64,
    },
    /// Feed a cat from the caller's food balance.
    FeedCat {
        /// The account submitting the command. Must own the cat.
        caller: Account,
        /// The cat to feed.
        cat: CatId,
        /// The kind of food to consume.
        kind: FoodKind,
        /// Units to consume. Must be non-zero.
        quantity: u64,
    },
    /// Check in for a daily credit reward.
    CheckIn {
        /// The account checking in.
        caller: Account,
        /// The driver-supplied day index.
        day: u64,
    },
}

/// The result of a successfully executed [`Command`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Events emitted by the command, in emission order.
    pub events: Vec<PetEvent>,
    /// The egg allocated by [`Command::MintEgg`], if any.
    pub minted_egg: Option<EggId>,
    /// The cat created by [`Command::HatchOut`], if any.
    pub hatched_cat: Option<CatId>,
    /// Whether a [`Command::RevokeCapability`] found a grant to remove.
    pub revoked: Option<bool>,
}

impl CommandOutput {
    /// An output carrying only events.
    pub(crate) fn events(events: Vec<PetEvent>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }
}

/// A read-only query. Queries never mutate state and emit no events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Query {
    /// Snapshot of a cat's attributes.
    GetDetail {
        /// The cat to inspect.
        cat: CatId,
    },
    /// Shell color of an egg.
    GetColor {
        /// The egg to inspect.
        egg: EggId,
    },
    /// Credit balance of an account.
    CreditOf {
        /// The account to inspect.
        account: Account,
    },
    /// Food balance of an account for one kind.
    FoodBalanceOf {
        /// The account to inspect.
        account: Account,
        /// The food kind.
        kind: FoodKind,
    },
}

/// The answer to a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryOutput {
    /// Answer to [`Query::GetDetail`].
    Detail(CatView),
    /// Answer to [`Query::GetColor`].
    Color(EggColor),
    /// Answer to [`Query::CreditOf`].
    Credit(u64),
    /// Answer to [`Query::FoodBalanceOf`].
    FoodBalance(u64),
}

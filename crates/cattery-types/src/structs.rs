//! Core entity records and read-only snapshots.
//!
//! The registry exclusively owns [`Egg`] and [`Cat`] records; everything
//! the driver sees is a snapshot ([`CatView`]) or a returned field value,
//! never a live reference into registry state.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::Stage;
use crate::ids::{Account, CatId, EggId, OrnamentId};

// ---------------------------------------------------------------------------
// Egg
// ---------------------------------------------------------------------------

/// An egg token. Eggs are minted by the incubation engine and hatch into
/// exactly one cat.
///
/// An egg is never deleted: hatching flips [`hatched`] to `true`, after
/// which the record is inert. The shell color is not stored -- it derives
/// from [`id`] via [`EggColor::from_id`].
///
/// [`hatched`]: Egg::hatched
/// [`id`]: Egg::id
/// [`EggColor::from_id`]: crate::enums::EggColor::from_id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Egg {
    /// Sequential egg identifier.
    pub id: EggId,
    /// The account that owns this egg.
    pub owner: Account,
    /// Whether the egg has already hatched. An egg hatches at most once.
    pub hatched: bool,
    /// Real-world timestamp when the egg was minted. Informational only.
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Cat
// ---------------------------------------------------------------------------

/// A cat entity. Created by hatching an egg, never destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    /// Sequential cat identifier.
    pub id: CatId,
    /// The account that owns this cat.
    pub owner: Account,
    /// Owner-chosen display name. Bounded length, never empty.
    pub nickname: String,
    /// Current growth stage.
    pub stage: Stage,
    /// Cumulative units of food this cat has been fed.
    pub feed_count: u64,
    /// Ornaments the cat wears. Each ornament is held at most once.
    pub ornaments: BTreeSet<OrnamentId>,
    /// Real-world timestamp when the cat hatched. Informational only.
    pub created_at: DateTime<Utc>,
}

impl Cat {
    /// Produce an owned read-only snapshot of this cat.
    pub fn view(&self) -> CatView {
        CatView {
            id: self.id,
            owner: self.owner,
            nickname: self.nickname.clone(),
            stage: self.stage,
            feed_count: self.feed_count,
            ornaments: self.ornaments.iter().copied().collect(),
        }
    }
}

/// A read-only snapshot of a cat, returned by detail queries.
///
/// The snapshot is fully owned: mutating the registry after taking a view
/// never changes the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatView {
    /// Sequential cat identifier.
    pub id: CatId,
    /// The account that owns this cat.
    pub owner: Account,
    /// Current display name.
    pub nickname: String,
    /// Current growth stage.
    pub stage: Stage,
    /// Cumulative units of food this cat has been fed.
    pub feed_count: u64,
    /// Ornaments the cat wears, in ascending id order.
    pub ornaments: Vec<OrnamentId>,
}

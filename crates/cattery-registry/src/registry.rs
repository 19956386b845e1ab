//! The [`EntityRegistry`] struct: entity arenas and gated mutators.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use cattery_access::AccessControl;
use cattery_ledger::Ledger;
use cattery_types::{
    Account, CallerId, Cat, CatId, CatView, Egg, EggColor, EggId, OrnamentId, Stage,
};

use crate::RegistryError;

/// The nickname every cat starts with until its owner renames it.
pub const DEFAULT_NICKNAME: &str = "kitty";

/// Owns all cat and egg records, keyed by monotonic sequential ids.
///
/// The registry is constructed with its own [`CallerId`]; internal engines
/// acting on the registry's behalf present that id to the privileged
/// mutators, while external components must hold a capability grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRegistry {
    /// The registry's own component identity.
    self_id: CallerId,
    /// Maximum nickname length in bytes.
    nickname_max_len: usize,
    /// All cats, keyed by id.
    cats: BTreeMap<CatId, Cat>,
    /// All eggs, keyed by id (hatched eggs stay, flagged).
    eggs: BTreeMap<EggId, Egg>,
    /// Next cat id to allocate. Never decremented.
    next_cat: u64,
    /// Next egg id to allocate. Never decremented.
    next_egg: u64,
}

impl EntityRegistry {
    /// Create an empty registry with the given self identity and nickname
    /// length bound.
    pub const fn new(self_id: CallerId, nickname_max_len: usize) -> Self {
        Self {
            self_id,
            nickname_max_len,
            cats: BTreeMap::new(),
            eggs: BTreeMap::new(),
            next_cat: 0,
            next_egg: 0,
        }
    }

    /// The registry's own component identity.
    pub const fn self_id(&self) -> CallerId {
        self.self_id
    }

    /// Number of cats ever created.
    pub fn cat_count(&self) -> usize {
        self.cats.len()
    }

    /// Number of eggs ever minted (hatched or not).
    pub fn egg_count(&self) -> usize {
        self.eggs.len()
    }

    // -----------------------------------------------------------------------
    // Gating helpers
    // -----------------------------------------------------------------------

    /// Reject callers that are neither the registry itself nor a grantee.
    fn require_privileged(
        &self,
        access: &AccessControl,
        caller: CallerId,
    ) -> Result<(), RegistryError> {
        if caller == self.self_id || access.is_granted_caller(caller) {
            return Ok(());
        }
        Err(RegistryError::UnauthorizedCaller { caller })
    }

    /// Look up a cat and reject callers that do not own it.
    fn owned_cat_mut(&mut self, caller: Account, id: CatId) -> Result<&mut Cat, RegistryError> {
        let cat = self
            .cats
            .get_mut(&id)
            .ok_or(RegistryError::CatNotFound(id))?;
        if cat.owner != caller {
            return Err(RegistryError::NotOwner { caller });
        }
        Ok(cat)
    }

    // -----------------------------------------------------------------------
    // Privileged mutators (grantee or registry-internal callers)
    // -----------------------------------------------------------------------

    /// Allocate a new egg owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnauthorizedCaller`] for ungated callers,
    /// or [`RegistryError::ArithmeticOverflow`] if the id space is spent.
    pub fn create_egg(
        &mut self,
        access: &AccessControl,
        caller: CallerId,
        owner: Account,
    ) -> Result<EggId, RegistryError> {
        self.require_privileged(access, caller)?;

        let id = EggId::new(self.next_egg);
        self.next_egg = self
            .next_egg
            .checked_add(1)
            .ok_or(RegistryError::ArithmeticOverflow)?;

        self.eggs.insert(
            id,
            Egg {
                id,
                owner,
                hatched: false,
                created_at: Utc::now(),
            },
        );
        tracing::debug!(egg = %id, %owner, "egg created");
        Ok(id)
    }

    /// Flag an egg as hatched.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EggNotFound`] for unknown ids and
    /// [`RegistryError::AlreadyHatched`] if the egg hatched before; the
    /// flag is set at most once.
    pub fn mark_hatched(
        &mut self,
        access: &AccessControl,
        caller: CallerId,
        id: EggId,
    ) -> Result<(), RegistryError> {
        self.require_privileged(access, caller)?;

        let egg = self.eggs.get_mut(&id).ok_or(RegistryError::EggNotFound(id))?;
        if egg.hatched {
            return Err(RegistryError::AlreadyHatched(id));
        }
        egg.hatched = true;
        Ok(())
    }

    /// Allocate a new cat owned by `owner`.
    ///
    /// The cat starts as a [`Stage::Kitten`] with feed count zero, the
    /// default nickname, and no ornaments.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnauthorizedCaller`] for ungated callers,
    /// or [`RegistryError::ArithmeticOverflow`] if the id space is spent.
    pub fn create_cat(
        &mut self,
        access: &AccessControl,
        caller: CallerId,
        owner: Account,
    ) -> Result<CatId, RegistryError> {
        self.require_privileged(access, caller)?;

        let id = CatId::new(self.next_cat);
        self.next_cat = self
            .next_cat
            .checked_add(1)
            .ok_or(RegistryError::ArithmeticOverflow)?;

        self.cats.insert(
            id,
            Cat {
                id,
                owner,
                nickname: String::from(DEFAULT_NICKNAME),
                stage: Stage::Kitten,
                feed_count: 0,
                ornaments: BTreeSet::new(),
                created_at: Utc::now(),
            },
        );
        tracing::debug!(cat = %id, %owner, "cat created");
        Ok(id)
    }

    /// Set a cat's growth stage.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnauthorizedCaller`] for ungated callers
    /// or [`RegistryError::CatNotFound`] for unknown ids.
    pub fn set_stage(
        &mut self,
        access: &AccessControl,
        caller: CallerId,
        id: CatId,
        stage: Stage,
    ) -> Result<(), RegistryError> {
        self.require_privileged(access, caller)?;

        let cat = self.cats.get_mut(&id).ok_or(RegistryError::CatNotFound(id))?;
        cat.stage = stage;
        Ok(())
    }

    /// Add `delta` to a cat's cumulative feed count, returning the new
    /// count.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnauthorizedCaller`] for ungated callers,
    /// [`RegistryError::CatNotFound`] for unknown ids, or
    /// [`RegistryError::ArithmeticOverflow`] if the counter would wrap
    /// (the count is unchanged).
    pub fn increment_feed_count(
        &mut self,
        access: &AccessControl,
        caller: CallerId,
        id: CatId,
        delta: u64,
    ) -> Result<u64, RegistryError> {
        self.require_privileged(access, caller)?;

        let cat = self.cats.get_mut(&id).ok_or(RegistryError::CatNotFound(id))?;
        let updated = cat
            .feed_count
            .checked_add(delta)
            .ok_or(RegistryError::ArithmeticOverflow)?;
        cat.feed_count = updated;
        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Owner-gated mutators
    // -----------------------------------------------------------------------

    /// Rename a cat. Callable only by the cat's current owner.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotOwner`] for non-owners and
    /// [`RegistryError::InvalidName`] for the empty string or a name
    /// longer than the configured byte bound. The nickname is unchanged
    /// on failure.
    pub fn change_nickname(
        &mut self,
        caller: Account,
        id: CatId,
        name: String,
    ) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::InvalidName {
                reason: "nickname must not be empty",
            });
        }
        if name.len() > self.nickname_max_len {
            return Err(RegistryError::InvalidName {
                reason: "nickname exceeds length bound",
            });
        }

        let cat = self.owned_cat_mut(caller, id)?;
        cat.nickname = name;
        Ok(())
    }

    /// Buy an ornament for a cat, paying `price` credit from the owner's
    /// balance.
    ///
    /// Duplicate ownership is checked before the debit, so a failed
    /// purchase never touches the buyer's balance.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotOwner`] for non-owners,
    /// [`RegistryError::AlreadyOwned`] for an ornament the cat already
    /// holds, or a bubbled ledger error if the balance is short.
    pub fn buy_ornament(
        &mut self,
        caller: Account,
        id: CatId,
        ornament: OrnamentId,
        price: u64,
        ledger: &mut Ledger,
    ) -> Result<(), RegistryError> {
        let cat = self.owned_cat_mut(caller, id)?;
        if cat.ornaments.contains(&ornament) {
            return Err(RegistryError::AlreadyOwned { cat: id, ornament });
        }

        ledger.debit(caller, price)?;
        cat.ornaments.insert(ornament);
        tracing::debug!(cat = %id, %ornament, price, "ornament bought");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// A read-only snapshot of the cat with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CatNotFound`] for unknown ids.
    pub fn get_detail(&self, id: CatId) -> Result<CatView, RegistryError> {
        self.cats
            .get(&id)
            .map(Cat::view)
            .ok_or(RegistryError::CatNotFound(id))
    }

    /// The owner of the cat with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CatNotFound`] for unknown ids.
    pub fn cat_owner(&self, id: CatId) -> Result<Account, RegistryError> {
        self.cats
            .get(&id)
            .map(|cat| cat.owner)
            .ok_or(RegistryError::CatNotFound(id))
    }

    /// The growth stage of the cat with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CatNotFound`] for unknown ids.
    pub fn cat_stage(&self, id: CatId) -> Result<Stage, RegistryError> {
        self.cats
            .get(&id)
            .map(|cat| cat.stage)
            .ok_or(RegistryError::CatNotFound(id))
    }

    /// The egg record with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EggNotFound`] for unknown ids.
    pub fn egg(&self, id: EggId) -> Result<&Egg, RegistryError> {
        self.eggs.get(&id).ok_or(RegistryError::EggNotFound(id))
    }

    /// Confirm that `account` owns the cat with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CatNotFound`] for unknown ids and
    /// [`RegistryError::NotOwner`] for any other account.
    pub fn require_cat_owner(&self, id: CatId, account: Account) -> Result<(), RegistryError> {
        if self.cat_owner(id)? == account {
            Ok(())
        } else {
            Err(RegistryError::NotOwner { caller: account })
        }
    }

    /// Confirm that `account` owns the egg with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EggNotFound`] for unknown ids and
    /// [`RegistryError::NotOwner`] for any other account.
    pub fn require_egg_owner(&self, id: EggId, account: Account) -> Result<(), RegistryError> {
        if self.egg(id)?.owner == account {
            Ok(())
        } else {
            Err(RegistryError::NotOwner { caller: account })
        }
    }

    /// The shell color of the egg with the given id.
    ///
    /// Color derives deterministically from the id; the registry only
    /// confirms the egg exists.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EggNotFound`] for unknown ids.
    pub fn egg_color(&self, id: EggId) -> Result<EggColor, RegistryError> {
        self.egg(id).map(|egg| EggColor::from_id(egg.id))
    }
}

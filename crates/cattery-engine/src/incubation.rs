//! Egg minting and hatching.
//!
//! The incubation engine is the one external component the registry
//! trusts, and only because the root admin granted it a capability at
//! engine wiring. Revoking that grant stops hatching (and minting) cold
//! without touching any other state.

use cattery_access::AccessControl;
use cattery_ledger::Ledger;
use cattery_registry::{EntityRegistry, RegistryError};
use cattery_types::{Account, CallerId, CatId, EggId, PetEvent};

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Mints eggs and hatches them into cats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncubationEngine {
    /// The component identity this engine presents to the registry and
    /// the access-control layer.
    caller: CallerId,
}

impl IncubationEngine {
    /// Create an incubation engine with the given component identity.
    pub const fn new(caller: CallerId) -> Self {
        Self { caller }
    }

    /// The component identity of this engine.
    pub const fn caller_id(&self) -> CallerId {
        self.caller
    }

    /// Mint a new egg owned by `owner`.
    ///
    /// No payment is required in the base design; a paid variant would
    /// debit the owner here before creating the egg. The shell color is
    /// not stored -- it derives from the returned id.
    ///
    /// # Errors
    ///
    /// Returns the bubbled registry error if this engine's capability was
    /// revoked or the egg id space is spent.
    pub fn mint(
        &self,
        access: &AccessControl,
        registry: &mut EntityRegistry,
        owner: Account,
    ) -> Result<EggId, EngineError> {
        let egg = registry.create_egg(access, self.caller, owner)?;
        tracing::info!(%egg, %owner, "egg minted");
        Ok(egg)
    }

    /// Hatch an egg into a cat, crediting the owner the hatch reward.
    ///
    /// Steps, all-or-nothing:
    /// 1. the caller must own the egg (`NotOwner`) and the egg must not
    ///    have hatched before (`AlreadyHatched`);
    /// 2. this engine must hold a capability grant, checked once up
    ///    front -- if revoked, nothing changes;
    /// 3. the owner is credited `config.hatch_reward`;
    /// 4. a new cat owned by the caller is created;
    /// 5. the egg is flagged hatched.
    ///
    /// A failure at any step rolls the earlier steps back, so flag, cat,
    /// and reward commit as one logical operation. Emits
    /// [`PetEvent::Hatched`] on success.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingCapability`] when the grant is
    /// absent, or the bubbled registry/ledger error for the checks above.
    pub fn hatch_out(
        &self,
        access: &AccessControl,
        registry: &mut EntityRegistry,
        ledger: &mut Ledger,
        config: &EngineConfig,
        caller: Account,
        egg: EggId,
    ) -> Result<(CatId, Vec<PetEvent>), EngineError> {
        let record = registry.egg(egg)?;
        if record.owner != caller {
            return Err(RegistryError::NotOwner { caller }.into());
        }
        if record.hatched {
            return Err(RegistryError::AlreadyHatched(egg).into());
        }
        if !access.is_granted_caller(self.caller) {
            return Err(EngineError::MissingCapability {
                caller: self.caller,
            });
        }

        ledger.credit(caller, config.hatch_reward)?;

        let cat = match registry.create_cat(access, self.caller, caller) {
            Ok(cat) => cat,
            Err(err) => {
                // Take the reward back; debiting what was just credited
                // cannot fail.
                let _ = ledger.debit(caller, config.hatch_reward);
                return Err(err.into());
            }
        };

        if let Err(err) = registry.mark_hatched(access, self.caller, egg) {
            // Not reachable after the validations above, but the reward
            // must not survive a failed hatch.
            let _ = ledger.debit(caller, config.hatch_reward);
            return Err(err.into());
        }

        tracing::info!(%egg, %cat, owner = %caller, "egg hatched");
        let events = vec![PetEvent::Hatched {
            egg,
            cat,
            owner: caller,
        }];
        Ok((cat, events))
    }
}

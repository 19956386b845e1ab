//! The feeding/aging state machine.
//!
//! Feeding consumes food from the owner's ledger balance and advances the
//! cat's cumulative feed count. When the count reaches the configured
//! growth threshold while the cat is still a kitten, the cat becomes an
//! adult -- exactly once, with a single [`PetEvent::StageChanged`].
//!
//! The engine offers no automatic de-duplication: retrying a feed that
//! already applied debits food again. At-most-once submission is the
//! driver's responsibility.

use cattery_access::AccessControl;
use cattery_ledger::Ledger;
use cattery_registry::EntityRegistry;
use cattery_types::{Account, CallerId, CatId, FoodKind, PetEvent, Stage};

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Parameters for a single feeding.
#[derive(Debug, Clone, Copy)]
pub struct FeedParams {
    /// The account feeding the cat. Must be the cat's owner.
    pub caller: Account,
    /// The cat being fed.
    pub cat: CatId,
    /// The kind of food to consume.
    pub kind: FoodKind,
    /// Units of food to consume. Must be non-zero.
    pub quantity: u64,
}

/// Applies feedings to cats on behalf of the registry.
///
/// The growth engine acts with the registry's own component identity, so
/// its feed-count and stage mutations pass the registry's privileged-call
/// gate without a capability grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthEngine {
    /// The component identity this engine presents to the registry.
    caller: CallerId,
}

impl GrowthEngine {
    /// Create a growth engine acting as the given component identity.
    pub const fn new(caller: CallerId) -> Self {
        Self { caller }
    }

    /// Feed a cat.
    ///
    /// Steps, all-or-nothing:
    /// 1. the caller must own the cat (`NotOwner` otherwise);
    /// 2. `quantity` units of `kind` are debited from the caller's food
    ///    balance (`InsufficientBalance` otherwise);
    /// 3. the cat's cumulative feed count advances by `quantity`;
    /// 4. if the new count reaches `config.growth_threshold` and the cat
    ///    is still a [`Stage::Kitten`], it becomes an [`Stage::Adult`]
    ///    and a [`PetEvent::StageChanged`] is emitted. Feeding an adult
    ///    keeps counting but never re-emits the event.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidQuantity`] for a zero quantity, and
    /// the bubbled registry/ledger error for the checks above. On any
    /// failure the cat and all balances are unchanged.
    pub fn feed_cat(
        &self,
        access: &AccessControl,
        registry: &mut EntityRegistry,
        ledger: &mut Ledger,
        config: &EngineConfig,
        params: FeedParams,
    ) -> Result<Vec<PetEvent>, EngineError> {
        let FeedParams {
            caller,
            cat,
            kind,
            quantity,
        } = params;

        if quantity == 0 {
            return Err(EngineError::InvalidQuantity {
                reason: "feed quantity must be non-zero",
            });
        }

        registry.require_cat_owner(cat, caller)?;
        let stage_before = registry.cat_stage(cat)?;

        ledger.debit_food(caller, kind, quantity)?;

        let count = match registry.increment_feed_count(access, self.caller, cat, quantity) {
            Ok(count) => count,
            Err(err) => {
                // Restore the food just debited; crediting back what was
                // debited cannot overflow.
                let _ = ledger.credit_food(caller, kind, quantity);
                return Err(err.into());
            }
        };

        let mut events = Vec::new();
        if stage_before == Stage::Kitten && count >= config.growth_threshold {
            registry.set_stage(access, self.caller, cat, Stage::Adult)?;
            tracing::info!(cat = %cat, feed_count = count, "kitten grew into an adult");
            events.push(PetEvent::StageChanged {
                cat,
                new_stage: Stage::Adult,
            });
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wiring() -> (AccessControl, EntityRegistry, Ledger, GrowthEngine, EngineConfig) {
        let root = Account::new();
        let access = AccessControl::new(root);
        let registry_id = CallerId::new();
        let registry = EntityRegistry::new(registry_id, 32);
        let growth = GrowthEngine::new(registry_id);
        (access, registry, Ledger::new(), growth, EngineConfig::default())
    }

    fn feed(caller: Account, cat: CatId, quantity: u64) -> FeedParams {
        FeedParams {
            caller,
            cat,
            kind: FoodKind::DriedFish,
            quantity,
        }
    }

    fn new_cat(access: &AccessControl, registry: &mut EntityRegistry, owner: Account) -> CatId {
        let created = registry.create_cat(access, registry.self_id(), owner);
        assert!(created.is_ok());
        created.unwrap_or(CatId::new(0))
    }

    #[test]
    fn feeding_to_threshold_grows_the_cat() {
        let (access, mut registry, mut ledger, growth, config) = wiring();
        let owner = Account::new();
        let cat = new_cat(&access, &mut registry, owner);
        assert!(ledger.credit_food(owner, FoodKind::DriedFish, 10).is_ok());

        let events = growth.feed_cat(&access, &mut registry, &mut ledger, &config, feed(owner, cat, 3));
        assert!(matches!(
            events.as_deref(),
            Ok([PetEvent::StageChanged {
                new_stage: Stage::Adult,
                ..
            }])
        ));
        assert_eq!(registry.cat_stage(cat).ok(), Some(Stage::Adult));
        assert_eq!(ledger.food_balance_of(owner, FoodKind::DriedFish), 7);
    }

    #[test]
    fn feeding_below_threshold_emits_nothing() {
        let (access, mut registry, mut ledger, growth, config) = wiring();
        let owner = Account::new();
        let cat = new_cat(&access, &mut registry, owner);
        assert!(ledger.credit_food(owner, FoodKind::DriedFish, 10).is_ok());

        let events = growth.feed_cat(&access, &mut registry, &mut ledger, &config, feed(owner, cat, 2));
        assert!(matches!(events.as_deref(), Ok([])));
        assert_eq!(registry.cat_stage(cat).ok(), Some(Stage::Kitten));
    }

    #[test]
    fn stage_changes_exactly_once() {
        let (access, mut registry, mut ledger, growth, config) = wiring();
        let owner = Account::new();
        let cat = new_cat(&access, &mut registry, owner);
        assert!(ledger.credit_food(owner, FoodKind::DriedFish, 10).is_ok());

        let first = growth.feed_cat(&access, &mut registry, &mut ledger, &config, feed(owner, cat, 3));
        assert!(matches!(first.as_deref(), Ok([PetEvent::StageChanged { .. }])));

        // Re-feeding an adult keeps counting but never re-emits.
        let second = growth.feed_cat(&access, &mut registry, &mut ledger, &config, feed(owner, cat, 3));
        assert!(matches!(second.as_deref(), Ok([])));
        assert_eq!(
            registry.get_detail(cat).map(|v| v.feed_count).ok(),
            Some(6)
        );
    }

    #[test]
    fn non_owner_cannot_feed() {
        let (access, mut registry, mut ledger, growth, config) = wiring();
        let owner = Account::new();
        let stranger = Account::new();
        let cat = new_cat(&access, &mut registry, owner);
        assert!(ledger.credit_food(stranger, FoodKind::DriedFish, 10).is_ok());

        let result = growth.feed_cat(&access, &mut registry, &mut ledger, &config, feed(stranger, cat, 1));
        assert!(matches!(
            result,
            Err(EngineError::Registry(cattery_registry::RegistryError::NotOwner { .. }))
        ));
        // Feed count unchanged, food untouched.
        assert_eq!(registry.get_detail(cat).map(|v| v.feed_count).ok(), Some(0));
        assert_eq!(ledger.food_balance_of(stranger, FoodKind::DriedFish), 10);
    }

    #[test]
    fn insufficient_food_leaves_cat_unchanged() {
        let (access, mut registry, mut ledger, growth, config) = wiring();
        let owner = Account::new();
        let cat = new_cat(&access, &mut registry, owner);
        assert!(ledger.credit_food(owner, FoodKind::DriedFish, 1).is_ok());

        let result = growth.feed_cat(&access, &mut registry, &mut ledger, &config, feed(owner, cat, 2));
        assert!(matches!(
            result,
            Err(EngineError::Ledger(cattery_ledger::LedgerError::InsufficientBalance { .. }))
        ));
        assert_eq!(registry.get_detail(cat).map(|v| v.feed_count).ok(), Some(0));
        assert_eq!(ledger.food_balance_of(owner, FoodKind::DriedFish), 1);
    }

    #[test]
    fn zero_quantity_rejected() {
        let (access, mut registry, mut ledger, growth, config) = wiring();
        let owner = Account::new();
        let cat = new_cat(&access, &mut registry, owner);

        let result = growth.feed_cat(&access, &mut registry, &mut ledger, &config, feed(owner, cat, 0));
        assert!(matches!(result, Err(EngineError::InvalidQuantity { .. })));
    }

    #[test]
    fn threshold_crossed_mid_quantity_still_transitions() {
        let (access, mut registry, mut ledger, growth, config) = wiring();
        let owner = Account::new();
        let cat = new_cat(&access, &mut registry, owner);
        assert!(ledger.credit_food(owner, FoodKind::Kibble, 10).is_ok());

        // One big feeding that overshoots the threshold transitions too.
        let params = FeedParams {
            caller: owner,
            cat,
            kind: FoodKind::Kibble,
            quantity: 5,
        };
        let events = growth.feed_cat(&access, &mut registry, &mut ledger, &config, params);
        assert!(matches!(events.as_deref(), Ok([PetEvent::StageChanged { .. }])));
    }
}

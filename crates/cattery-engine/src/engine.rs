//! The [`PetEngine`] facade: component wiring and the command/query
//! surface.

use cattery_access::AccessControl;
use cattery_ledger::Ledger;
use cattery_registry::EntityRegistry;
use cattery_types::{
    Account, CallerId, CatId, CatView, EggColor, EggId, FoodKind, OrnamentId, PetEvent,
};

use crate::checkin::CheckInBook;
use crate::command::{Command, CommandOutput, Query, QueryOutput};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::growth::{FeedParams, GrowthEngine};
use crate::incubation::IncubationEngine;

/// The authoritative state engine for the pet economy.
///
/// Owns every component exclusively; no caller gets a mutable handle to
/// any of them. Commands take `&mut self`, so the embedding driver is
/// the single writer by construction.
#[derive(Debug)]
pub struct PetEngine {
    /// Construction-time design constants.
    config: EngineConfig,
    /// Admin and capability sets.
    access: AccessControl,
    /// Credit and food balances.
    ledger: Ledger,
    /// Cat and egg entities.
    registry: EntityRegistry,
    /// The feeding state machine.
    growth: GrowthEngine,
    /// The mint/hatch lifecycle.
    incubation: IncubationEngine,
    /// Daily check-in records.
    checkins: CheckInBook,
}

impl PetEngine {
    /// Build an engine with the given constants and root admin.
    ///
    /// Wiring mirrors the original deployment sequence: the registry and
    /// incubator each get a fresh component identity, and the root admin
    /// grants the incubator its hatch capability before the first
    /// command is accepted.
    pub fn new(config: EngineConfig, root_admin: Account) -> Self {
        let registry_id = CallerId::new();
        let incubator_id = CallerId::new();

        let access = AccessControl::new(root_admin).with_grantee(incubator_id);
        let registry = EntityRegistry::new(registry_id, config.nickname_max_len);
        let growth = GrowthEngine::new(registry_id);
        let incubation = IncubationEngine::new(incubator_id);

        tracing::info!(%root_admin, incubator = %incubator_id, "engine constructed");

        Self {
            config,
            access,
            ledger: Ledger::new(),
            registry,
            growth,
            incubation,
            checkins: CheckInBook::new(),
        }
    }

    /// The constants this engine was built with.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The incubator's component identity, for capability revocation and
    /// re-granting by the root admin.
    pub const fn incubator_id(&self) -> CallerId {
        self.incubation.caller_id()
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Mint a new egg owned by `owner`.
    pub fn mint_egg(&mut self, owner: Account) -> Result<EggId, EngineError> {
        self.incubation.mint(&self.access, &mut self.registry, owner)
    }

    /// Hatch an egg into a cat. See
    /// [`IncubationEngine::hatch_out`] for the full contract.
    pub fn hatch_out(
        &mut self,
        caller: Account,
        egg: EggId,
    ) -> Result<(CatId, Vec<PetEvent>), EngineError> {
        self.incubation.hatch_out(
            &self.access,
            &mut self.registry,
            &mut self.ledger,
            &self.config,
            caller,
            egg,
        )
    }

    /// Add `account` to the admin set. Caller must be an admin.
    pub fn grant_admin(
        &mut self,
        caller: Account,
        account: Account,
    ) -> Result<Vec<PetEvent>, EngineError> {
        let event = self.access.grant_admin(caller, account)?;
        Ok(event.into_iter().collect())
    }

    /// Grant `target` the privileged-registry capability. Caller must be
    /// the root admin.
    pub fn grant_capability(
        &mut self,
        caller: Account,
        target: CallerId,
    ) -> Result<Vec<PetEvent>, EngineError> {
        let event = self.access.grant_capability(caller, target)?;
        Ok(event.into_iter().collect())
    }

    /// Revoke `target`'s capability. Caller must be the root admin.
    /// Returns whether a grant was present.
    pub fn revoke_capability(
        &mut self,
        caller: Account,
        target: CallerId,
    ) -> Result<bool, EngineError> {
        Ok(self.access.revoke_capability(caller, target)?)
    }

    /// Rename a cat. Caller must be its owner.
    pub fn change_nickname(
        &mut self,
        caller: Account,
        cat: CatId,
        name: String,
    ) -> Result<(), EngineError> {
        Ok(self.registry.change_nickname(caller, cat, name)?)
    }

    /// Buy an ornament for a cat at the configured flat price. Caller
    /// must be its owner.
    pub fn buy_ornament(
        &mut self,
        caller: Account,
        cat: CatId,
        ornament: OrnamentId,
    ) -> Result<(), EngineError> {
        Ok(self.registry.buy_ornament(
            caller,
            cat,
            ornament,
            self.config.ornament_price,
            &mut self.ledger,
        )?)
    }

    /// Buy `quantity` units of food, paying the configured per-unit
    /// price. Debit and food credit commit together or not at all.
    pub fn buy_food(
        &mut self,
        caller: Account,
        kind: FoodKind,
        quantity: u64,
    ) -> Result<(), EngineError> {
        if quantity == 0 {
            return Err(EngineError::InvalidQuantity {
                reason: "food quantity must be non-zero",
            });
        }
        let cost = quantity
            .checked_mul(self.config.food_price)
            .ok_or(EngineError::InvalidQuantity {
                reason: "food cost overflows",
            })?;
        Ok(self
            .ledger
            .exchange_credit_for_food(caller, kind, quantity, cost)?)
    }

    /// Feed a cat. See [`GrowthEngine::feed_cat`] for the full contract.
    pub fn feed_cat(
        &mut self,
        caller: Account,
        cat: CatId,
        kind: FoodKind,
        quantity: u64,
    ) -> Result<Vec<PetEvent>, EngineError> {
        self.growth.feed_cat(
            &self.access,
            &mut self.registry,
            &mut self.ledger,
            &self.config,
            FeedParams {
                caller,
                cat,
                kind,
                quantity,
            },
        )
    }

    /// Check in for the daily credit reward, at most once per day index.
    pub fn check_in(&mut self, caller: Account, day: u64) -> Result<Vec<PetEvent>, EngineError> {
        let event = self.checkins.check_in(
            &mut self.ledger,
            caller,
            day,
            self.config.check_in_reward,
        )?;
        Ok(vec![event])
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// A read-only snapshot of a cat.
    pub fn get_detail(&self, cat: CatId) -> Result<CatView, EngineError> {
        Ok(self.registry.get_detail(cat)?)
    }

    /// The shell color of an egg.
    pub fn get_color(&self, egg: EggId) -> Result<EggColor, EngineError> {
        Ok(self.registry.egg_color(egg)?)
    }

    /// The credit balance of an account.
    pub fn credit_of(&self, account: Account) -> u64 {
        self.ledger.credit_of(account)
    }

    /// The food balance of an account for one kind.
    pub fn food_balance_of(&self, account: Account, kind: FoodKind) -> u64 {
        self.ledger.food_balance_of(account, kind)
    }

    // -----------------------------------------------------------------------
    // Data-driven dispatch
    // -----------------------------------------------------------------------

    /// Execute a serializable [`Command`].
    pub fn execute(&mut self, command: Command) -> Result<CommandOutput, EngineError> {
        match command {
            Command::MintEgg { owner } => {
                let egg = self.mint_egg(owner)?;
                Ok(CommandOutput {
                    minted_egg: Some(egg),
                    ..CommandOutput::default()
                })
            }
            Command::HatchOut { caller, egg } => {
                let (cat, events) = self.hatch_out(caller, egg)?;
                Ok(CommandOutput {
                    events,
                    hatched_cat: Some(cat),
                    ..CommandOutput::default()
                })
            }
            Command::GrantAdmin { caller, account } => {
                Ok(CommandOutput::events(self.grant_admin(caller, account)?))
            }
            Command::GrantCapability { caller, target } => {
                Ok(CommandOutput::events(self.grant_capability(caller, target)?))
            }
            Command::RevokeCapability { caller, target } => {
                let revoked = self.revoke_capability(caller, target)?;
                Ok(CommandOutput {
                    revoked: Some(revoked),
                    ..CommandOutput::default()
                })
            }
            Command::ChangeNickname { caller, cat, name } => {
                self.change_nickname(caller, cat, name)?;
                Ok(CommandOutput::default())
            }
            Command::BuyOrnament { caller, cat, ornament } => {
                self.buy_ornament(caller, cat, ornament)?;
                Ok(CommandOutput::default())
            }
            Command::BuyFood {
                caller,
                kind,
                quantity,
            } => {
                self.buy_food(caller, kind, quantity)?;
                Ok(CommandOutput::default())
            }
            Command::FeedCat {
                caller,
                cat,
                kind,
                quantity,
            } => Ok(CommandOutput::events(
                self.feed_cat(caller, cat, kind, quantity)?,
            )),
            Command::CheckIn { caller, day } => {
                Ok(CommandOutput::events(self.check_in(caller, day)?))
            }
        }
    }

    /// Answer a serializable [`Query`].
    pub fn query(&self, query: Query) -> Result<QueryOutput, EngineError> {
        match query {
            Query::GetDetail { cat } => Ok(QueryOutput::Detail(self.get_detail(cat)?)),
            Query::GetColor { egg } => Ok(QueryOutput::Color(self.get_color(egg)?)),
            Query::CreditOf { account } => Ok(QueryOutput::Credit(self.credit_of(account))),
            Query::FoodBalanceOf { account, kind } => {
                Ok(QueryOutput::FoodBalance(self.food_balance_of(account, kind)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cattery_ledger::LedgerError;
    use cattery_registry::{DEFAULT_NICKNAME, RegistryError};
    use cattery_types::{GrantKind, Stage};

    fn engine() -> (PetEngine, Account) {
        let root = Account::new();
        (PetEngine::new(EngineConfig::default(), root), root)
    }

    /// The full driver scenario: deploy, mint, grant, hatch, inspect,
    /// rename, decorate, shop, feed to adulthood.
    #[test]
    fn full_driver_scenario() {
        let (mut engine, root) = engine();
        let second_admin = Account::new();
        let reward = engine.config().hatch_reward;

        // Mint egg #0 for the root account.
        assert_eq!(engine.mint_egg(root).ok(), Some(EggId::new(0)));

        // Egg #0 always has the same color.
        assert_eq!(engine.get_color(EggId::new(0)).ok(), Some(EggColor::Snow));

        // Promote a second admin.
        let granted = engine.grant_admin(root, second_admin);
        assert!(matches!(
            granted.as_deref(),
            Ok([PetEvent::Granted {
                kind: GrantKind::Admin,
                ..
            }])
        ));

        // Hatch: cat #0, Hatched event, reward credited.
        let hatched = engine.hatch_out(root, EggId::new(0));
        assert!(hatched.is_ok());
        if let Ok((cat, events)) = &hatched {
            assert_eq!(*cat, CatId::new(0));
            assert!(matches!(
                events.as_slice(),
                [PetEvent::Hatched {
                    egg: EggId(0),
                    cat: CatId(0),
                    ..
                }]
            ));
        }
        assert_eq!(engine.credit_of(root), reward);

        // Default attributes.
        let detail = engine.get_detail(CatId::new(0));
        assert!(detail.is_ok());
        if let Ok(view) = detail {
            assert_eq!(view.nickname, DEFAULT_NICKNAME);
            assert_eq!(view.stage, Stage::Kitten);
            assert_eq!(view.feed_count, 0);
        }

        // Rename.
        assert!(engine
            .change_nickname(root, CatId::new(0), String::from("Mochi"))
            .is_ok());

        // Buy an ornament at the flat price.
        assert!(engine
            .buy_ornament(root, CatId::new(0), OrnamentId::new(0))
            .is_ok());
        let after_ornament = reward.saturating_sub(engine.config().ornament_price);
        assert_eq!(engine.credit_of(root), after_ornament);

        // Buy 3 units of dried fish.
        assert!(engine.buy_food(root, FoodKind::DriedFish, 3).is_ok());
        let food_cost = engine.config().food_price.saturating_mul(3);
        assert_eq!(engine.credit_of(root), after_ornament.saturating_sub(food_cost));
        assert_eq!(engine.food_balance_of(root, FoodKind::DriedFish), 3);

        // Feed all 3 units: threshold reached, kitten becomes adult.
        let events = engine.feed_cat(root, CatId::new(0), FoodKind::DriedFish, 3);
        assert!(matches!(
            events.as_deref(),
            Ok([PetEvent::StageChanged {
                cat: CatId(0),
                new_stage: Stage::Adult,
            }])
        ));
        assert_eq!(engine.food_balance_of(root, FoodKind::DriedFish), 0);

        let grown = engine.get_detail(CatId::new(0));
        assert!(grown.is_ok());
        if let Ok(view) = grown {
            assert_eq!(view.stage, Stage::Adult);
            assert_eq!(view.feed_count, 3);
            assert_eq!(view.nickname, "Mochi");
            assert_eq!(view.ornaments, vec![OrnamentId::new(0)]);
        }
    }

    #[test]
    fn second_hatch_fails_and_changes_nothing() {
        let (mut engine, root) = engine();
        let _ = engine.mint_egg(root);
        assert!(engine.hatch_out(root, EggId::new(0)).is_ok());
        let credit_before = engine.credit_of(root);

        let second = engine.hatch_out(root, EggId::new(0));
        assert!(matches!(
            second,
            Err(EngineError::Registry(RegistryError::AlreadyHatched(_)))
        ));
        assert_eq!(engine.credit_of(root), credit_before);
    }

    #[test]
    fn stranger_cannot_rename() {
        let (mut engine, root) = engine();
        let stranger = Account::new();
        let _ = engine.mint_egg(root);
        assert!(engine.hatch_out(root, EggId::new(0)).is_ok());

        let result = engine.change_nickname(stranger, CatId::new(0), String::from("x"));
        assert!(matches!(
            result,
            Err(EngineError::Registry(RegistryError::NotOwner { .. }))
        ));
        assert_eq!(
            engine.get_detail(CatId::new(0)).map(|v| v.nickname).ok(),
            Some(String::from(DEFAULT_NICKNAME))
        );
    }

    #[test]
    fn buy_food_with_short_credit_fails_atomically() {
        let (mut engine, root) = engine();
        // No hatch, no check-in: zero credit.
        let result = engine.buy_food(root, FoodKind::Kibble, 4);
        assert!(matches!(
            result,
            Err(EngineError::Ledger(LedgerError::InsufficientBalance { .. }))
        ));
        assert_eq!(engine.food_balance_of(root, FoodKind::Kibble), 0);
    }

    #[test]
    fn buy_food_zero_quantity_rejected() {
        let (mut engine, root) = engine();
        let result = engine.buy_food(root, FoodKind::Kibble, 0);
        assert!(matches!(result, Err(EngineError::InvalidQuantity { .. })));
    }

    #[test]
    fn revoke_and_regrant_capability_gates_hatching() {
        let (mut engine, root) = engine();
        let incubator = engine.incubator_id();
        let _ = engine.mint_egg(root);

        assert_eq!(engine.revoke_capability(root, incubator).ok(), Some(true));
        let blocked = engine.hatch_out(root, EggId::new(0));
        assert!(matches!(blocked, Err(EngineError::MissingCapability { .. })));
        assert_eq!(engine.credit_of(root), 0);

        let regrant = engine.grant_capability(root, incubator);
        assert!(matches!(
            regrant.as_deref(),
            Ok([PetEvent::Granted {
                kind: GrantKind::Capability,
                ..
            }])
        ));
        assert!(engine.hatch_out(root, EggId::new(0)).is_ok());
    }

    #[test]
    fn non_root_cannot_manage_capabilities() {
        let (mut engine, root) = engine();
        let second = Account::new();
        assert!(engine.grant_admin(root, second).is_ok());

        let result = engine.grant_capability(second, CallerId::new());
        assert!(matches!(result, Err(EngineError::Access(_))));
    }

    #[test]
    fn check_in_credits_once_per_day() {
        let (mut engine, root) = engine();
        let reward = engine.config().check_in_reward;

        assert!(engine.check_in(root, 0).is_ok());
        assert_eq!(engine.credit_of(root), reward);

        let repeat = engine.check_in(root, 0);
        assert!(matches!(repeat, Err(EngineError::AlreadyCheckedIn { .. })));
        assert_eq!(engine.credit_of(root), reward);

        assert!(engine.check_in(root, 1).is_ok());
        assert_eq!(engine.credit_of(root), reward.saturating_mul(2));
    }

    #[test]
    fn ids_allocate_independently_per_kind() {
        let (mut engine, root) = engine();
        let other = Account::new();

        assert_eq!(engine.mint_egg(root).ok(), Some(EggId::new(0)));
        assert_eq!(engine.mint_egg(other).ok(), Some(EggId::new(1)));

        // Hatching egg #1 first still yields cat #0.
        let hatched = engine.hatch_out(other, EggId::new(1));
        assert!(hatched.is_ok());
        if let Ok((cat, _)) = hatched {
            assert_eq!(cat, CatId::new(0));
        }
    }

    #[test]
    fn execute_dispatches_commands() {
        let (mut engine, root) = engine();

        let minted = engine.execute(Command::MintEgg { owner: root });
        assert!(minted.is_ok());
        if let Ok(output) = minted {
            assert_eq!(output.minted_egg, Some(EggId::new(0)));
            assert!(output.events.is_empty());
        }

        let hatched = engine.execute(Command::HatchOut {
            caller: root,
            egg: EggId::new(0),
        });
        assert!(hatched.is_ok());
        if let Ok(output) = hatched {
            assert_eq!(output.hatched_cat, Some(CatId::new(0)));
            assert!(matches!(
                output.events.as_slice(),
                [PetEvent::Hatched { .. }]
            ));
        }
    }

    #[test]
    fn query_dispatches_reads() {
        let (mut engine, root) = engine();
        let _ = engine.mint_egg(root);

        assert!(matches!(
            engine.query(Query::GetColor { egg: EggId::new(0) }),
            Ok(QueryOutput::Color(EggColor::Snow))
        ));
        assert!(matches!(
            engine.query(Query::CreditOf { account: root }),
            Ok(QueryOutput::Credit(0))
        ));
        assert!(matches!(
            engine.query(Query::GetDetail { cat: CatId::new(9) }),
            Err(EngineError::Registry(RegistryError::CatNotFound(_)))
        ));
    }

    #[test]
    fn balances_never_go_negative_across_failures() {
        let (mut engine, root) = engine();
        let _ = engine.mint_egg(root);
        assert!(engine.hatch_out(root, EggId::new(0)).is_ok());

        // Drain credit with purchases, then push every failure path.
        assert!(engine.buy_food(root, FoodKind::Kibble, 10).is_ok());
        let _ = engine.buy_ornament(root, CatId::new(0), OrnamentId::new(0));
        let _ = engine.buy_food(root, FoodKind::Milk, 1_000_000);
        let _ = engine.feed_cat(root, CatId::new(0), FoodKind::Milk, 1);
        let _ = engine.feed_cat(root, CatId::new(0), FoodKind::Kibble, 99);

        // Unsigned balances are still consistent and readable.
        assert!(engine.credit_of(root) <= engine.config().hatch_reward);
        assert_eq!(engine.food_balance_of(root, FoodKind::Kibble), 10);
        assert_eq!(engine.food_balance_of(root, FoodKind::Milk), 0);
    }
}

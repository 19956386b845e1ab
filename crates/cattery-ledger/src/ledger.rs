//! The [`Ledger`] struct: balance storage and checked credit/debit ops.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cattery_types::{Account, FoodKind};

use crate::{Asset, LedgerError};

/// Per-account credit balances and per-(account, kind) food balances.
///
/// Absent keys read as zero; a balance that drops back to zero keeps its
/// entry (the distinction is not observable through the query surface).
/// Zero-amount credits and debits are accepted no-ops.
///
/// Food balances nest per-kind maps under the account so a serialized
/// snapshot uses plain string map keys in formats like JSON.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Credit balance per account.
    credits: BTreeMap<Account, u64>,
    /// Food balance per account, then per food kind.
    food: BTreeMap<Account, BTreeMap<FoodKind, u64>>,
}

impl Ledger {
    /// Create a new empty ledger.
    pub const fn new() -> Self {
        Self {
            credits: BTreeMap::new(),
            food: BTreeMap::new(),
        }
    }

    /// The credit balance of `account` (zero if never credited).
    pub fn credit_of(&self, account: Account) -> u64 {
        self.credits.get(&account).copied().unwrap_or(0)
    }

    /// The food balance of `account` for `kind` (zero if never credited).
    pub fn food_balance_of(&self, account: Account, kind: FoodKind) -> u64 {
        self.food
            .get(&account)
            .and_then(|kinds| kinds.get(&kind))
            .copied()
            .unwrap_or(0)
    }

    /// Increase the credit balance of `account` by `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ArithmeticOverflow`] if the balance would
    /// exceed `u64::MAX`; the balance is unchanged.
    pub fn credit(&mut self, account: Account, amount: u64) -> Result<(), LedgerError> {
        let current = self.credit_of(account);
        let updated = current
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow {
                account,
                asset: Asset::Credit,
            })?;
        self.credits.insert(account, updated);
        tracing::debug!(%account, amount, balance = updated, "credit");
        Ok(())
    }

    /// Decrease the credit balance of `account` by `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] if `amount` exceeds
    /// the current balance; the balance is unchanged.
    pub fn debit(&mut self, account: Account, amount: u64) -> Result<(), LedgerError> {
        let current = self.credit_of(account);
        let updated = current
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                account,
                asset: Asset::Credit,
                requested: amount,
                available: current,
            })?;
        self.credits.insert(account, updated);
        tracing::debug!(%account, amount, balance = updated, "debit");
        Ok(())
    }

    /// Increase the food balance of `account` for `kind` by `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ArithmeticOverflow`] if the balance would
    /// exceed `u64::MAX`; the balance is unchanged.
    pub fn credit_food(
        &mut self,
        account: Account,
        kind: FoodKind,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let current = self.food_balance_of(account, kind);
        let updated = current
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow {
                account,
                asset: Asset::Food(kind),
            })?;
        self.food.entry(account).or_default().insert(kind, updated);
        Ok(())
    }

    /// Decrease the food balance of `account` for `kind` by `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] if `amount` exceeds
    /// the current balance for that kind; the balance is unchanged.
    pub fn debit_food(
        &mut self,
        account: Account,
        kind: FoodKind,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let current = self.food_balance_of(account, kind);
        let updated = current
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                account,
                asset: Asset::Food(kind),
                requested: amount,
                available: current,
            })?;
        self.food.entry(account).or_default().insert(kind, updated);
        Ok(())
    }

    /// Atomically pay `cost` credit and receive `quantity` units of food.
    ///
    /// Both legs are validated before either balance moves, so a failure
    /// on either side leaves the ledger untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientBalance`] if the credit balance
    /// cannot cover `cost`, or [`LedgerError::ArithmeticOverflow`] if the
    /// food balance cannot absorb `quantity`.
    pub fn exchange_credit_for_food(
        &mut self,
        account: Account,
        kind: FoodKind,
        quantity: u64,
        cost: u64,
    ) -> Result<(), LedgerError> {
        let credit_balance = self.credit_of(account);
        if credit_balance < cost {
            return Err(LedgerError::InsufficientBalance {
                account,
                asset: Asset::Credit,
                requested: cost,
                available: credit_balance,
            });
        }
        // Validate the food leg before the debit executes.
        self.food_balance_of(account, kind)
            .checked_add(quantity)
            .ok_or(LedgerError::ArithmeticOverflow {
                account,
                asset: Asset::Food(kind),
            })?;

        self.debit(account, cost)?;
        if let Err(err) = self.credit_food(account, kind, quantity) {
            // Unreachable after the headroom check above; restore the
            // debit so the exchange stays all-or-nothing regardless.
            let _ = self.credit(account, cost);
            return Err(err);
        }
        Ok(())
    }
}

//! Daily check-in credit reward.
//!
//! The engine owns no clock (no timers, no background work), so "daily"
//! is whatever the driver says it is: each check-in carries a monotonic
//! day index, and the book enforces at most one successful check-in per
//! account per index. Indices only move forward -- checking in for an
//! earlier day than the last recorded one is rejected the same way as a
//! repeat.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cattery_ledger::Ledger;
use cattery_types::{Account, PetEvent};

use crate::error::EngineError;

/// Records the last day index each account checked in at.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInBook {
    /// Last successful check-in day per account.
    last_day: BTreeMap<Account, u64>,
}

impl CheckInBook {
    /// Create an empty check-in book.
    pub const fn new() -> Self {
        Self {
            last_day: BTreeMap::new(),
        }
    }

    /// Check `account` in for `day`, crediting `reward`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AlreadyCheckedIn`] if the account already
    /// checked in at `day` or later; the balance and the book are
    /// unchanged on failure.
    pub fn check_in(
        &mut self,
        ledger: &mut Ledger,
        account: Account,
        day: u64,
        reward: u64,
    ) -> Result<PetEvent, EngineError> {
        if let Some(&last) = self.last_day.get(&account) {
            if day <= last {
                return Err(EngineError::AlreadyCheckedIn {
                    account,
                    day,
                    last_day: last,
                });
            }
        }

        ledger.credit(account, reward)?;
        self.last_day.insert(account, day);
        tracing::debug!(%account, day, reward, "checked in");

        Ok(PetEvent::CheckedIn {
            account,
            day,
            reward,
        })
    }
}

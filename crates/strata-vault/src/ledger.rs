//! Per-user deposit ledger.
//!
//! Tracks each depositor's recorded amount plus the aggregate
//! `total_locked` counter. The counter is bookkeeping, not a live custody
//! balance: a fee skim moves custody without reducing it, so the two can
//! diverge (see `fees`). Accounts are created on first deposit and persist
//! at zero after a full withdrawal.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strata_core::{Amount, Principal, Result, VaultError};

/// Identity-keyed deposit accounts and the aggregate locked counter.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    accounts: IndexMap<Principal, Amount>,
    total_locked: Amount,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a depositor and the aggregate counter.
    pub fn credit(&mut self, who: Principal, amount: Amount) -> Result<()> {
        let balance = self.accounts.entry(who).or_insert(Amount::ZERO);
        *balance = balance.checked_add(amount)?;
        self.total_locked = self.total_locked.checked_add(amount)?;
        Ok(())
    }

    /// Debit a depositor and the aggregate counter.
    ///
    /// Fails with `InsufficientBalance` when the recorded amount is below
    /// the request; the account entry itself is kept, even at zero.
    pub fn debit(&mut self, who: Principal, amount: Amount) -> Result<()> {
        let available = self.balance_of(who);
        if available < amount {
            return Err(VaultError::insufficient_balance(
                amount.value(),
                available.value(),
            ));
        }
        if let Some(balance) = self.accounts.get_mut(&who) {
            *balance = balance.checked_sub(amount)?;
        }
        self.total_locked = self.total_locked.checked_sub(amount)?;
        Ok(())
    }

    /// Recorded amount for an identity; zero for unknown identities.
    #[must_use]
    pub fn balance_of(&self, who: Principal) -> Amount {
        self.accounts.get(&who).copied().unwrap_or(Amount::ZERO)
    }

    /// The aggregate locked counter.
    #[must_use]
    pub fn total_locked(&self) -> Amount {
        self.total_locked
    }

    /// Zero the aggregate counter and return its prior value.
    ///
    /// Used by the emergency sweep, which bypasses per-user accounting:
    /// individual account entries keep their recorded amounts.
    pub(crate) fn sweep_total(&mut self) -> Amount {
        std::mem::take(&mut self.total_locked)
    }

    /// Sum of all recorded account amounts, saturating.
    ///
    /// Equals `total_locked` outside the documented divergence paths.
    #[must_use]
    pub fn recorded_sum(&self) -> Amount {
        self.accounts.values().fold(Amount::ZERO, |sum, amount| {
            sum.checked_add(*amount).unwrap_or(sum)
        })
    }

    /// Iterate accounts in creation order.
    pub fn accounts(&self) -> impl Iterator<Item = (Principal, Amount)> + '_ {
        self.accounts.iter().map(|(who, amount)| (*who, *amount))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn user(label: &str) -> Principal {
        Principal::derived(label)
    }

    #[test]
    fn credit_creates_account_implicitly() {
        let mut ledger = Ledger::new();
        ledger.credit(user("alice"), Amount::new(1_000)).expect("credit");
        assert_eq!(ledger.balance_of(user("alice")), Amount::new(1_000));
        assert_eq!(ledger.total_locked(), Amount::new(1_000));
    }

    #[test]
    fn unknown_identity_reads_zero() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balance_of(user("nobody")), Amount::ZERO);
    }

    #[test]
    fn debit_below_balance_fails_and_leaves_state() {
        let mut ledger = Ledger::new();
        ledger.credit(user("alice"), Amount::new(600_000)).expect("credit");
        let err = ledger
            .debit(user("alice"), Amount::new(700_000))
            .expect_err("overdraw should fail");
        assert_matches!(
            err,
            VaultError::InsufficientBalance {
                requested: 700_000,
                available: 600_000,
            }
        );
        assert_eq!(ledger.balance_of(user("alice")), Amount::new(600_000));
        assert_eq!(ledger.total_locked(), Amount::new(600_000));
    }

    #[test]
    fn account_persists_at_zero_after_full_withdrawal() {
        let mut ledger = Ledger::new();
        ledger.credit(user("alice"), Amount::new(50)).expect("credit");
        ledger.debit(user("alice"), Amount::new(50)).expect("debit");
        assert_eq!(ledger.balance_of(user("alice")), Amount::ZERO);
        assert_eq!(ledger.accounts().count(), 1);
    }

    #[test]
    fn sweep_zeroes_counter_but_not_accounts() {
        let mut ledger = Ledger::new();
        ledger.credit(user("alice"), Amount::new(30)).expect("credit");
        ledger.credit(user("bob"), Amount::new(70)).expect("credit");
        let swept = ledger.sweep_total();
        assert_eq!(swept, Amount::new(100));
        assert_eq!(ledger.total_locked(), Amount::ZERO);
        assert_eq!(ledger.recorded_sum(), Amount::new(100));
    }
}

//! Deterministic fixture builders.
//!
//! Consolidates the vault setup pattern used across integration tests:
//! stable labeled principals, a funded mock chain, and a deployed vault.

use crate::chain::MockChain;
use strata_core::{Amount, HostChain, Principal};
use strata_vault::Vault;

/// Stable principal for a label. Same label, same principal, every run.
#[must_use]
pub fn principal(label: &str) -> Principal {
    Principal::derived(label)
}

/// A deployed vault plus the identities tests keep reaching for.
pub struct VaultFixture {
    /// The vault under test, backed by a [`MockChain`].
    pub vault: Vault<MockChain>,
    /// Owner identity (also the fee recipient).
    pub owner: Principal,
    /// The vault's own custody principal.
    pub pool: Principal,
}

impl VaultFixture {
    /// Deploy a fresh vault on a chain at height 1.
    #[must_use]
    pub fn new() -> Self {
        let owner = principal("owner");
        let pool = principal("vault");
        Self {
            vault: Vault::new(MockChain::new(), owner, pool),
            owner,
            pool,
        }
    }

    /// Credit a user's on-chain balance so deposits can succeed.
    pub fn fund(&mut self, who: Principal, amount: u128) {
        self.vault.host_mut().fund(who, Amount::new(amount));
    }

    /// Advance the chain height.
    pub fn advance(&mut self, blocks: u64) {
        self.vault.host_mut().advance(blocks);
    }

    /// On-chain custody balance of the pool itself.
    #[must_use]
    pub fn custody_balance(&self) -> Amount {
        self.vault.host().balance_of(self.pool)
    }
}

impl Default for VaultFixture {
    fn default() -> Self {
        Self::new()
    }
}

//! In-memory host chain.
//!
//! Keeps principal balances and a controllable block height. Transfer
//! batches apply to a scratch copy first so a rejected batch leaves
//! balances exactly as they were, matching the contract of
//! [`HostChain::apply_transfers`].

use indexmap::IndexMap;
use strata_core::{Amount, BlockHeight, HostChain, Principal, Result, TransferIntent, VaultError};

/// Deterministic in-memory implementation of [`HostChain`].
#[derive(Debug, Default, Clone)]
pub struct MockChain {
    balances: IndexMap<Principal, Amount>,
    height: BlockHeight,
}

impl MockChain {
    /// Chain at height 1 with no balances.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: IndexMap::new(),
            height: BlockHeight::new(1),
        }
    }

    /// Chain at a specific starting height.
    #[must_use]
    pub fn at_height(height: u64) -> Self {
        Self {
            balances: IndexMap::new(),
            height: BlockHeight::new(height),
        }
    }

    /// Credit a principal's on-chain balance directly.
    pub fn fund(&mut self, who: Principal, amount: Amount) {
        let balance = self.balances.entry(who).or_insert(Amount::ZERO);
        *balance = balance
            .checked_add(amount)
            .unwrap_or(Amount::new(u128::MAX));
    }

    /// Advance the block height.
    pub fn advance(&mut self, blocks: u64) {
        self.height = BlockHeight::new(self.height.value() + blocks);
    }
}

impl HostChain for MockChain {
    fn height(&self) -> BlockHeight {
        self.height
    }

    fn balance_of(&self, principal: Principal) -> Amount {
        self.balances
            .get(&principal)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn apply_transfers(&mut self, intents: &[TransferIntent]) -> Result<()> {
        let mut scratch = self.balances.clone();
        for intent in intents {
            if intent.amount.is_zero() {
                continue;
            }
            let from = scratch.entry(intent.from).or_insert(Amount::ZERO);
            if *from < intent.amount {
                return Err(VaultError::transfer_failed(format!(
                    "{} holds {} of the {} required",
                    intent.from, from, intent.amount
                )));
            }
            *from = from.checked_sub(intent.amount)?;
            let to = scratch.entry(intent.to).or_insert(Amount::ZERO);
            *to = to.checked_add(intent.amount)?;
        }
        self.balances = scratch;
        Ok(())
    }
}

//! Host-chain effect traits.
//!
//! The vault never touches real asset custody directly: it records the value
//! movements an operation needs as [`TransferIntent`]s and hands the whole
//! batch to the host at commit time. The host applies a batch atomically,
//! which is what makes every entry point all-or-nothing even when a single
//! transaction moves value more than once (a fee skim followed by a
//! withdrawal payout).
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `strata-testkit` in-memory chain for tests; the
//!   production binding to the host ledger is an external collaborator
//! - **Usage**: `strata-vault` dispatcher only

use crate::errors::Result;
use crate::identifiers::Principal;
use crate::units::{Amount, BlockHeight};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single value movement requested by a vault operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferIntent {
    /// Principal debited.
    pub from: Principal,
    /// Principal credited.
    pub to: Principal,
    /// Amount moved.
    pub amount: Amount,
}

impl TransferIntent {
    /// Create a transfer intent.
    #[must_use]
    pub fn new(from: Principal, to: Principal, amount: Amount) -> Self {
        Self { from, to, amount }
    }
}

impl fmt::Display for TransferIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.amount)
    }
}

/// The host ledger's native value-transfer primitive and block clock.
pub trait HostChain {
    /// Current block height. Monotonic; the vault's only time axis.
    fn height(&self) -> BlockHeight;

    /// Custody balance the host records for a principal.
    fn balance_of(&self, principal: Principal) -> Amount;

    /// Apply a batch of transfers atomically, in order.
    ///
    /// Either every intent lands or none does; a rejected batch must leave
    /// host balances untouched and return
    /// [`TransferFailed`](crate::errors::VaultError::TransferFailed).
    /// Zero-amount intents are legal no-ops.
    fn apply_transfers(&mut self, intents: &[TransferIntent]) -> Result<()>;
}

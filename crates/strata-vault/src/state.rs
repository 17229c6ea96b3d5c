//! The owned state aggregate.
//!
//! Everything the vault persists lives here as one explicit value, passed
//! to and held by the dispatcher rather than sitting in ambient globals, so
//! tests construct isolated instances freely. The aggregate is `Clone`
//! because the dispatcher's commit discipline works on a scratch copy.

use crate::fees::MAX_PERFORMANCE_FEE_BPS;
use crate::guardian::GuardianState;
use crate::ledger::Ledger;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use strata_core::{BlockHeight, Bps, Principal, Result, VaultError};

/// Owner-controlled configuration and fee-cadence bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// The single identity allowed to mutate registry and config. Fixed at
    /// deployment; also the performance-fee recipient.
    pub owner: Principal,
    /// The vault's own principal: custody account and the acting identity
    /// of the rebalance self-call.
    pub vault: Principal,
    /// Threshold a future optimizer consults before paying a switching
    /// cost. Carried and settable; the placeholder strategy ignores it.
    pub rebalance_threshold_bps: Bps,
    /// Performance fee skimmed from pooled funds, capped at 30%.
    pub performance_fee_bps: Bps,
    /// Height of the last fee skim. Monotonic.
    pub last_fee_collection_height: BlockHeight,
}

/// Default rebalance threshold: 5%.
pub const DEFAULT_REBALANCE_THRESHOLD_BPS: u16 = 500;

/// Default performance fee: 10%.
pub const DEFAULT_PERFORMANCE_FEE_BPS: u16 = 1_000;

impl VaultConfig {
    /// Configuration at deployment.
    #[must_use]
    pub fn new(owner: Principal, vault: Principal, deployed_at: BlockHeight) -> Self {
        Self {
            owner,
            vault,
            rebalance_threshold_bps: Bps::new(DEFAULT_REBALANCE_THRESHOLD_BPS),
            performance_fee_bps: Bps::new(DEFAULT_PERFORMANCE_FEE_BPS),
            last_fee_collection_height: deployed_at,
        }
    }

    /// Reject any caller other than the owner.
    pub fn ensure_owner(&self, caller: Principal) -> Result<()> {
        if caller != self.owner {
            return Err(VaultError::unauthorized(format!(
                "{caller} is not the vault owner"
            )));
        }
        Ok(())
    }

    /// Whether a caller is the owner or the vault's own self-call identity.
    #[must_use]
    pub fn is_owner_or_self(&self, caller: Principal) -> bool {
        caller == self.owner || caller == self.vault
    }

    /// Set the performance fee, rejecting anything above the 30% cap.
    pub fn set_performance_fee(&mut self, bps: Bps) -> Result<()> {
        if bps.value() > MAX_PERFORMANCE_FEE_BPS {
            return Err(VaultError::invalid_parameter(format!(
                "performance fee {bps} exceeds {MAX_PERFORMANCE_FEE_BPS} bps"
            )));
        }
        self.performance_fee_bps = bps;
        Ok(())
    }
}

/// The whole persisted vault: config, registry, ledger, guardians.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultState {
    /// Owner-controlled thresholds and fee bookkeeping.
    pub config: VaultConfig,
    /// Yield destination records.
    pub registry: Registry,
    /// Per-user balances and the aggregate locked counter.
    pub ledger: Ledger,
    /// Guardian signer set and the pending emergency round.
    pub guardians: GuardianState,
}

impl VaultState {
    /// Fresh state at deployment.
    #[must_use]
    pub fn new(owner: Principal, vault: Principal, deployed_at: BlockHeight) -> Self {
        Self {
            config: VaultConfig::new(owner, vault, deployed_at),
            registry: Registry::new(),
            ledger: Ledger::new(),
            guardians: GuardianState::new(),
        }
    }
}

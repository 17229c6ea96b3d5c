//! Entry-point dispatcher.
//!
//! [`Vault`] owns the state aggregate, a host handle, and the allocation
//! strategy, and surfaces the host-facing entry points. Every mutating
//! entry point runs under the same commit discipline: the operation works
//! on a scratch clone of the state while buffering host transfers, and only
//! when the whole operation has succeeded are the transfer batch and the
//! state swap applied — together. A failure anywhere, including a nested
//! rebalance failure inside a withdrawal, leaves both the state and the
//! host untouched.

use crate::guardian::RoundStatus;
use crate::rebalance;
use crate::registry::ProtocolRecord;
use crate::state::VaultState;
use crate::strategy::{AllocationStrategy, TopYieldStrategy};
use crate::tx::Transaction;
use strata_core::{
    Amount, BlockHeight, Bps, HostChain, Principal, ProtocolId, Result, TransferIntent, VaultError,
};
use tracing::{debug, info};

/// The vault: state aggregate, host handle, allocation strategy.
pub struct Vault<H: HostChain> {
    host: H,
    state: VaultState,
    strategy: Box<dyn AllocationStrategy>,
}

impl<H: HostChain> Vault<H> {
    /// Deploy a vault with the placeholder allocation strategy.
    ///
    /// `vault` is the pool's own principal: its custody account on the host
    /// and the acting identity of rebalance self-calls. The fee cadence
    /// starts counting from the host's current height.
    pub fn new(host: H, owner: Principal, vault: Principal) -> Self {
        Self::with_strategy(host, owner, vault, Box::new(TopYieldStrategy))
    }

    /// Deploy with a custom allocation strategy.
    pub fn with_strategy(
        host: H,
        owner: Principal,
        vault: Principal,
        strategy: Box<dyn AllocationStrategy>,
    ) -> Self {
        let deployed_at = host.height();
        info!(%owner, %vault, %deployed_at, strategy = strategy.name(), "deploying vault");
        Self {
            host,
            state: VaultState::new(owner, vault, deployed_at),
            strategy,
        }
    }

    /// Run one entry point atomically.
    ///
    /// The operation sees a scratch clone of the state and a transfer
    /// buffer; the host applies the buffered batch first (all-or-nothing),
    /// and only then does the scratch state become current.
    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut VaultState, &mut Transaction, &dyn AllocationStrategy) -> Result<T>,
    ) -> Result<T> {
        let mut next = self.state.clone();
        let mut tx = Transaction::new(self.host.height());
        let out = op(&mut next, &mut tx, self.strategy.as_ref())?;
        self.host.apply_transfers(tx.transfers())?;
        self.state = next;
        Ok(out)
    }

    // --- owner-only configuration -------------------------------------

    /// One-time guardian setup: signer set (at most 5) and threshold M.
    pub fn initialize(
        &mut self,
        caller: Principal,
        signers: Vec<Principal>,
        threshold: usize,
    ) -> Result<()> {
        self.commit(|state, _tx, _strategy| {
            state.config.ensure_owner(caller)?;
            state.guardians.initialize(signers, threshold)
        })?;
        info!(%caller, threshold, "guardian set initialized");
        Ok(())
    }

    /// Register a yield destination; returns its sequential id.
    pub fn add_protocol(
        &mut self,
        caller: Principal,
        destination: Principal,
        risk_score: u8,
    ) -> Result<ProtocolId> {
        let id = self.commit(|state, _tx, _strategy| {
            state.config.ensure_owner(caller)?;
            state.registry.add(destination, risk_score)
        })?;
        info!(%id, %destination, risk_score, "protocol registered");
        Ok(id)
    }

    /// Overwrite a destination's reported APY.
    pub fn update_protocol_apy(
        &mut self,
        caller: Principal,
        id: ProtocolId,
        apy_bps: u16,
    ) -> Result<()> {
        self.commit(|state, _tx, _strategy| {
            state.config.ensure_owner(caller)?;
            state.registry.update_apy(id, Bps::new(apy_bps))
        })
    }

    /// Set the rebalance threshold consulted by a future optimizer.
    pub fn set_rebalance_threshold(&mut self, caller: Principal, bps: u16) -> Result<()> {
        self.commit(|state, _tx, _strategy| {
            state.config.ensure_owner(caller)?;
            state.config.rebalance_threshold_bps = Bps::new(bps);
            Ok(())
        })
    }

    /// Set the performance fee (capped at 3000 bps).
    pub fn set_performance_fee(&mut self, caller: Principal, bps: u16) -> Result<()> {
        self.commit(|state, _tx, _strategy| {
            state.config.ensure_owner(caller)?;
            state.config.set_performance_fee(Bps::new(bps))
        })
    }

    // --- deposits and withdrawals -------------------------------------

    /// Move `amount` from the caller into pool custody and credit the
    /// caller's account.
    ///
    /// With at least one destination registered, the rebalance pass runs
    /// synchronously as part of the same transaction (acting as the vault
    /// itself); with an empty registry it is skipped and the deposit still
    /// succeeds.
    pub fn deposit(&mut self, caller: Principal, amount: Amount) -> Result<()> {
        self.commit(|state, tx, strategy| {
            tx.push_transfer(TransferIntent::new(caller, state.config.vault, amount));
            state.ledger.credit(caller, amount)?;
            if !state.registry.is_empty() {
                rebalance::run(state, tx, strategy)?;
            } else {
                debug!("no protocols registered, deposit skips rebalance");
            }
            Ok(())
        })?;
        info!(%caller, %amount, "deposit committed");
        Ok(())
    }

    /// Debit the caller's account and move `amount` from custody back to
    /// the caller.
    ///
    /// The rebalance pass runs first, unconditionally, to settle fees and
    /// allocations before custody shrinks. It is not skipped on an empty
    /// registry, so until the first destination is registered every
    /// withdrawal fails with `NoEligibleProtocols`.
    pub fn withdraw(&mut self, caller: Principal, amount: Amount) -> Result<()> {
        self.commit(|state, tx, strategy| {
            let available = state.ledger.balance_of(caller);
            if available < amount {
                return Err(VaultError::insufficient_balance(
                    amount.value(),
                    available.value(),
                ));
            }
            rebalance::run(state, tx, strategy)?;
            state.ledger.debit(caller, amount)?;
            tx.push_transfer(TransferIntent::new(state.config.vault, caller, amount));
            Ok(())
        })?;
        info!(%caller, %amount, "withdrawal committed");
        Ok(())
    }

    // --- rebalancing ---------------------------------------------------

    /// Run the rebalance pass directly.
    ///
    /// Restricted to the owner and the vault's own self-call identity;
    /// everyone else is rejected before anything runs.
    pub fn rebalance_funds(&mut self, caller: Principal) -> Result<()> {
        self.commit(|state, tx, strategy| {
            if !state.config.is_owner_or_self(caller) {
                return Err(VaultError::unauthorized(format!(
                    "{caller} may not trigger a rebalance"
                )));
            }
            rebalance::run(state, tx, strategy)
        })
    }

    // --- emergency withdrawal ------------------------------------------

    /// Record the caller's signature into the pending emergency round.
    pub fn sign_emergency_withdrawal(&mut self, caller: Principal) -> Result<()> {
        self.commit(|state, _tx, _strategy| state.guardians.sign(caller))?;
        info!(%caller, round = ?self.state.guardians.round_status(), "emergency signature recorded");
        Ok(())
    }

    /// Sweep all custody funds to `recipient`.
    ///
    /// Requires an armed round (pending signatures ≥ threshold); the caller
    /// itself needs no role. Clears the round, zeroes the locked counter,
    /// and transfers the prior total to the recipient. Per-user accounts
    /// are bypassed and keep their recorded amounts.
    pub fn execute_emergency_withdraw(
        &mut self,
        caller: Principal,
        recipient: Principal,
    ) -> Result<Amount> {
        let swept = self.commit(|state, tx, _strategy| {
            if !state.guardians.quorum_reached() {
                return Err(VaultError::unauthorized(format!(
                    "emergency quorum not reached: {} of {} signatures",
                    state.guardians.pending_count(),
                    state.guardians.required_signatures()
                )));
            }
            state.guardians.clear_round();
            let swept = state.ledger.sweep_total();
            tx.push_transfer(TransferIntent::new(state.config.vault, recipient, swept));
            Ok(swept)
        })?;
        info!(%caller, %recipient, %swept, "emergency sweep executed");
        Ok(swept)
    }

    // --- read-only queries ---------------------------------------------

    /// Record for a protocol id, if registered.
    #[must_use]
    pub fn protocol_info(&self, id: ProtocolId) -> Option<&ProtocolRecord> {
        self.state.registry.get(id)
    }

    /// First record registered for a destination, if any.
    #[must_use]
    pub fn find_protocol(&self, destination: Principal) -> Option<&ProtocolRecord> {
        self.state.registry.find_by_destination(destination)
    }

    /// Number of registered destinations.
    #[must_use]
    pub fn protocol_count(&self) -> u64 {
        self.state.registry.protocol_count()
    }

    /// Recorded deposit for an identity; zero when unknown.
    #[must_use]
    pub fn user_deposit(&self, who: Principal) -> Amount {
        self.state.ledger.balance_of(who)
    }

    /// The aggregate locked counter (not a live custody balance).
    #[must_use]
    pub fn total_funds_locked(&self) -> Amount {
        self.state.ledger.total_locked()
    }

    /// Current performance fee.
    #[must_use]
    pub fn performance_fee(&self) -> Bps {
        self.state.config.performance_fee_bps
    }

    /// Current rebalance threshold.
    #[must_use]
    pub fn rebalance_threshold(&self) -> Bps {
        self.state.config.rebalance_threshold_bps
    }

    /// Height of the last fee skim.
    #[must_use]
    pub fn last_fee_collection_height(&self) -> BlockHeight {
        self.state.config.last_fee_collection_height
    }

    /// Observable state of the pending emergency round.
    #[must_use]
    pub fn guardian_round(&self) -> RoundStatus {
        self.state.guardians.round_status()
    }

    /// The owner principal.
    #[must_use]
    pub fn owner(&self) -> Principal {
        self.state.config.owner
    }

    /// The vault's own custody principal.
    #[must_use]
    pub fn vault_principal(&self) -> Principal {
        self.state.config.vault
    }

    /// The whole state aggregate, read-only.
    #[must_use]
    pub fn state(&self) -> &VaultState {
        &self.state
    }

    /// The host handle, read-only.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host handle, for harness control (funding, height advance).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

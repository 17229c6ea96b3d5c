//! The rebalance pass.
//!
//! Fee accrual first, then the allocation pass: require a non-empty
//! registry, ask the strategy for target weights, and write the resulting
//! bookkeeping into the named records. No value actually moves toward a
//! destination here; `current_balance` is internal bookkeeping and the real
//! external transfer boundary is an external collaborator.

use crate::fees;
use crate::state::VaultState;
use crate::strategy::AllocationStrategy;
use crate::tx::Transaction;
use strata_core::{Result, VaultError};
use tracing::debug;

/// Run fee accrual followed by the allocation pass.
pub(crate) fn run(
    state: &mut VaultState,
    tx: &mut Transaction,
    strategy: &dyn AllocationStrategy,
) -> Result<()> {
    fees::collect(state, tx)?;

    if state.registry.is_empty() {
        return Err(VaultError::NoEligibleProtocols);
    }

    let total = state.ledger.total_locked();
    let targets = strategy.allocate(state.registry.records(), total);
    for target in targets {
        let allocated = target.weight.of(total);
        let record = state
            .registry
            .get_mut(target.id)
            .ok_or_else(|| VaultError::not_found(format!("{} is not registered", target.id)))?;
        debug!(
            strategy = strategy.name(),
            id = %target.id,
            weight = %target.weight,
            %allocated,
            "applying allocation target"
        );
        record.allocation_percentage = target.weight;
        record.current_balance = allocated;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::strategy::{TopYieldStrategy, REBALANCE_SHARE_BPS};
    use assert_matches::assert_matches;
    use strata_core::{Amount, BlockHeight, Bps, Principal, ProtocolId};

    fn state() -> VaultState {
        VaultState::new(
            Principal::derived("owner"),
            Principal::derived("vault"),
            BlockHeight::new(1),
        )
    }

    #[test]
    fn empty_registry_is_rejected() {
        let mut state = state();
        let mut tx = Transaction::new(BlockHeight::new(1));
        let err = run(&mut state, &mut tx, &TopYieldStrategy)
            .expect_err("empty registry should fail");
        assert_matches!(err, VaultError::NoEligibleProtocols);
    }

    #[test]
    fn applies_twenty_percent_to_top_destination() {
        let mut state = state();
        let low = state
            .registry
            .add(Principal::derived("low"), 1)
            .expect("add low");
        let high = state
            .registry
            .add(Principal::derived("high"), 1)
            .expect("add high");
        state.registry.update_apy(low, Bps::new(200)).expect("apy");
        state.registry.update_apy(high, Bps::new(900)).expect("apy");
        state
            .ledger
            .credit(Principal::derived("alice"), Amount::new(1_000_000))
            .expect("credit");

        let mut tx = Transaction::new(BlockHeight::new(1));
        run(&mut state, &mut tx, &TopYieldStrategy).expect("rebalance");

        let winner = state.registry.get(high).expect("record");
        assert_eq!(winner.allocation_percentage, Bps::new(REBALANCE_SHARE_BPS));
        assert_eq!(winner.current_balance, Amount::new(200_000));
        // The loser's bookkeeping is untouched.
        let loser = state.registry.get(low).expect("record");
        assert_eq!(loser.allocation_percentage, Bps::default());
        assert_eq!(loser.current_balance, Amount::ZERO);
    }

    #[test]
    fn unknown_strategy_target_is_not_found() {
        struct Phantom;
        impl AllocationStrategy for Phantom {
            fn allocate(
                &self,
                _records: &[crate::registry::ProtocolRecord],
                _total_locked: Amount,
            ) -> Vec<crate::strategy::AllocationTarget> {
                vec![crate::strategy::AllocationTarget {
                    id: ProtocolId::new(99),
                    weight: Bps::new(100),
                }]
            }
            fn name(&self) -> &'static str {
                "phantom"
            }
        }

        let mut state = state();
        state
            .registry
            .add(Principal::derived("only"), 1)
            .expect("add");
        let mut tx = Transaction::new(BlockHeight::new(1));
        let err = run(&mut state, &mut tx, &Phantom).expect_err("phantom id should fail");
        assert_matches!(err, VaultError::NotFound { .. });
    }
}

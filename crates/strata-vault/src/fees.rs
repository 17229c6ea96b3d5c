//! Time-gated performance fee accrual.
//!
//! Once more than [`FEE_COLLECTION_INTERVAL`] heights have passed since the
//! last skim, the configured fee fraction of the locked counter moves from
//! vault custody to the owner. The fee is computed against the ledger
//! counter, not the measured custody balance, and the counter is not
//! reduced: after each skim the counter reads higher than actual custody.
//! Callers that need the invariant `total_locked == Σ accounts` to match
//! custody must account for this documented divergence.

use crate::state::VaultState;
use crate::tx::Transaction;
use strata_core::{Result, TransferIntent};
use tracing::debug;

/// Minimum heights between fee skims.
pub const FEE_COLLECTION_INTERVAL: u64 = 144;

/// Cap on the configurable performance fee, in basis points (30%).
pub const MAX_PERFORMANCE_FEE_BPS: u16 = 3_000;

/// Skim the performance fee if the cadence gate has passed.
///
/// No-op success when the gate is closed or the computed fee is zero; the
/// collection height only advances when a fee actually moves.
pub(crate) fn collect(state: &mut VaultState, tx: &mut Transaction) -> Result<()> {
    let elapsed = tx.height.since(state.config.last_fee_collection_height);
    if elapsed <= FEE_COLLECTION_INTERVAL {
        return Ok(());
    }

    let fee = state
        .config
        .performance_fee_bps
        .of(state.ledger.total_locked());
    if fee.is_zero() {
        return Ok(());
    }

    debug!(%fee, height = %tx.height, "collecting performance fee");
    tx.push_transfer(TransferIntent::new(
        state.config.vault,
        state.config.owner,
        fee,
    ));
    state.config.last_fee_collection_height = tx.height;
    Ok(())
}

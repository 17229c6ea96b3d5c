//! Allocation strategy seam.
//!
//! The allocation pass asks a strategy for target weights and applies them
//! mechanically; the strategy is the only part meant to be replaced when a
//! real optimizer lands. The shipped [`TopYieldStrategy`] is an explicit
//! placeholder: rank destinations by risk-discounted APY and direct a fixed
//! 20% of the locked total at the winner. A real optimizer would also
//! consult `rebalance_threshold_bps` to decide whether a shift is worth its
//! switching cost; the placeholder does not.

use crate::registry::{ProtocolRecord, MAX_RISK_SCORE};
use strata_core::{Amount, Bps, ProtocolId};

/// Share of the locked total the placeholder directs at the top
/// destination: 20%.
pub const REBALANCE_SHARE_BPS: u16 = 2_000;

/// One target produced by an allocation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationTarget {
    /// Destination to adjust.
    pub id: ProtocolId,
    /// New share of the locked total, in basis points.
    pub weight: Bps,
}

/// Decides where pooled funds should sit.
///
/// Input is the full registry snapshot plus the locked total; output names
/// only the records whose allocation should change. Records not named keep
/// their previous bookkeeping values.
pub trait AllocationStrategy: Send + Sync {
    /// Compute target weights for the given registry snapshot.
    ///
    /// `records` is never empty: the allocation pass rejects an empty
    /// registry before consulting the strategy.
    fn allocate(&self, records: &[ProtocolRecord], total_locked: Amount) -> Vec<AllocationTarget>;

    /// Human-readable strategy name, for logs.
    fn name(&self) -> &'static str;
}

/// APY discounted by risk: a risk-10 destination counts for nothing, a
/// risk-0 destination keeps its full APY.
#[must_use]
pub fn risk_adjusted_yield(record: &ProtocolRecord) -> u32 {
    let discount = u32::from(MAX_RISK_SCORE - record.risk_score.min(MAX_RISK_SCORE));
    u32::from(record.current_apy.value()) * discount / u32::from(MAX_RISK_SCORE)
}

/// Placeholder policy: direct the fixed share at the best risk-adjusted APY.
#[derive(Debug, Default, Clone, Copy)]
pub struct TopYieldStrategy;

impl AllocationStrategy for TopYieldStrategy {
    fn allocate(&self, records: &[ProtocolRecord], _total_locked: Amount) -> Vec<AllocationTarget> {
        let mut best: Option<(&ProtocolRecord, u32)> = None;
        for record in records {
            let score = risk_adjusted_yield(record);
            // Strict comparison: the first-listed record wins ties.
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((record, score)),
            }
        }

        best.map(|(record, _)| AllocationTarget {
            id: record.id,
            weight: Bps::new(REBALANCE_SHARE_BPS),
        })
        .into_iter()
        .collect()
    }

    fn name(&self) -> &'static str {
        "top-yield"
    }
}

//! Guardian signer set and the emergency-withdrawal round.
//!
//! The signer set is fixed once at initialization; there is no add/remove
//! path afterwards. A round moves Idle → (signatures accumulate) → Armed
//! (count ≥ threshold) → Executed (round cleared, funds swept) → Idle.
//!
//! Signatures accumulate as a set of distinct signers: re-signing by the
//! same guardian is idempotent and never advances the count. (An earlier
//! rendition recorded only the most recent signer, which made any
//! threshold above one unreachable; a regression test pins the
//! accumulating behavior.)

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use strata_core::{Principal, Result, VaultError};

/// Maximum number of guardian signers accepted at initialization.
pub const MAX_GUARDIAN_SIGNERS: usize = 5;

/// Observable state of the current emergency round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// No signatures recorded.
    Idle,
    /// Signatures recorded, quorum not yet reached.
    Pending {
        /// Distinct signers recorded so far.
        signatures: usize,
    },
    /// Quorum reached; the sweep can execute.
    Armed,
}

/// Signer set, threshold, and the pending round.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianState {
    signers: IndexSet<Principal>,
    required_signatures: usize,
    pending: IndexSet<Principal>,
    initialized: bool,
}

impl GuardianState {
    /// Empty, uninitialized guardian state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the signer set and threshold. One-time.
    ///
    /// Duplicate identities in `signers` collapse; the threshold is checked
    /// against the distinct count.
    pub fn initialize(&mut self, signers: Vec<Principal>, threshold: usize) -> Result<()> {
        if self.initialized {
            return Err(VaultError::unauthorized(
                "guardian set is already initialized",
            ));
        }

        let distinct: IndexSet<Principal> = signers.into_iter().collect();
        if distinct.len() > MAX_GUARDIAN_SIGNERS {
            return Err(VaultError::invalid_parameter(format!(
                "{} signers exceed the maximum of {MAX_GUARDIAN_SIGNERS}",
                distinct.len()
            )));
        }
        if threshold == 0 || threshold > distinct.len() {
            return Err(VaultError::invalid_parameter(format!(
                "threshold {threshold} out of range for {} signers",
                distinct.len()
            )));
        }

        self.signers = distinct;
        self.required_signatures = threshold;
        self.initialized = true;
        Ok(())
    }

    /// Record the caller into the pending round.
    pub fn sign(&mut self, caller: Principal) -> Result<()> {
        if !self.is_signer(caller) {
            return Err(VaultError::unauthorized(format!(
                "{caller} is not an authorized guardian"
            )));
        }
        self.pending.insert(caller);
        Ok(())
    }

    /// Whether an identity is an authorized signer.
    #[must_use]
    pub fn is_signer(&self, who: Principal) -> bool {
        self.signers.contains(&who)
    }

    /// Whether the pending round has reached the threshold.
    #[must_use]
    pub fn quorum_reached(&self) -> bool {
        self.initialized && self.pending.len() >= self.required_signatures
    }

    /// Distinct signatures recorded in the pending round.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Threshold M required to arm the round.
    #[must_use]
    pub fn required_signatures(&self) -> usize {
        self.required_signatures
    }

    /// Whether `initialize` has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Observable round state.
    #[must_use]
    pub fn round_status(&self) -> RoundStatus {
        if self.quorum_reached() {
            RoundStatus::Armed
        } else if self.pending.is_empty() {
            RoundStatus::Idle
        } else {
            RoundStatus::Pending {
                signatures: self.pending.len(),
            }
        }
    }

    /// Drop all pending signatures, returning the round to Idle.
    pub(crate) fn clear_round(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn guardian(label: &str) -> Principal {
        Principal::derived(label)
    }

    fn initialized(count: usize, threshold: usize) -> GuardianState {
        let mut state = GuardianState::new();
        let signers = (0..count).map(|i| guardian(&format!("g{i}"))).collect();
        state.initialize(signers, threshold).expect("initialize");
        state
    }

    #[test]
    fn threshold_must_fit_signer_count() {
        let mut state = GuardianState::new();
        let err = state
            .initialize(vec![guardian("g0")], 2)
            .expect_err("threshold above count should fail");
        assert_matches!(err, VaultError::InvalidParameter { .. });
        assert!(!state.is_initialized());
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let mut state = GuardianState::new();
        let err = state
            .initialize(vec![guardian("g0")], 0)
            .expect_err("zero threshold should fail");
        assert_matches!(err, VaultError::InvalidParameter { .. });
    }

    #[test]
    fn signer_cap_is_enforced() {
        let mut state = GuardianState::new();
        let signers = (0..=MAX_GUARDIAN_SIGNERS)
            .map(|i| guardian(&format!("g{i}")))
            .collect();
        let err = state
            .initialize(signers, 1)
            .expect_err("six signers should fail");
        assert_matches!(err, VaultError::InvalidParameter { .. });
    }

    #[test]
    fn duplicate_signers_collapse_before_threshold_check() {
        let mut state = GuardianState::new();
        let err = state
            .initialize(vec![guardian("g0"), guardian("g0")], 2)
            .expect_err("threshold 2 with one distinct signer should fail");
        assert_matches!(err, VaultError::InvalidParameter { .. });
    }

    #[test]
    fn second_initialization_is_rejected() {
        let mut state = initialized(2, 1);
        let err = state
            .initialize(vec![guardian("other")], 1)
            .expect_err("re-initialization should fail");
        assert_matches!(err, VaultError::Unauthorized { .. });
        assert!(state.is_signer(guardian("g0")));
    }

    #[test]
    fn signatures_accumulate_across_distinct_signers() {
        let mut state = initialized(3, 2);
        state.sign(guardian("g0")).expect("first signature");
        assert_matches!(state.round_status(), RoundStatus::Pending { signatures: 1 });
        assert!(!state.quorum_reached());
        state.sign(guardian("g1")).expect("second signature");
        assert_matches!(state.round_status(), RoundStatus::Armed);
        assert!(state.quorum_reached());
    }

    #[test]
    fn re_signing_is_idempotent() {
        let mut state = initialized(3, 2);
        state.sign(guardian("g0")).expect("first signature");
        state.sign(guardian("g0")).expect("repeat signature");
        assert_eq!(state.pending_count(), 1);
        assert!(!state.quorum_reached());
    }

    #[test]
    fn non_signer_cannot_sign() {
        let mut state = initialized(2, 1);
        let err = state
            .sign(guardian("mallory"))
            .expect_err("stranger should be rejected");
        assert_matches!(err, VaultError::Unauthorized { .. });
        assert_eq!(state.pending_count(), 0);
    }

    #[test]
    fn clearing_returns_round_to_idle() {
        let mut state = initialized(2, 1);
        state.sign(guardian("g0")).expect("sign");
        assert_matches!(state.round_status(), RoundStatus::Armed);
        state.clear_round();
        assert_matches!(state.round_status(), RoundStatus::Idle);
        assert!(!state.quorum_reached());
    }

    #[test]
    fn uninitialized_state_never_reaches_quorum() {
        let state = GuardianState::new();
        assert!(!state.quorum_reached());
        assert_matches!(state.round_status(), RoundStatus::Idle);
    }
}

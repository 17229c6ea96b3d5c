//! Registry of external yield destinations.
//!
//! Records live in an arena indexed by [`ProtocolId`]: ids are assigned
//! densely from 0, never reused, and the count never decreases. Destination
//! lookup is a plain index scan; the registry is expected to stay small
//! (one record per integrated yield protocol).

use serde::{Deserialize, Serialize};
use strata_core::{Amount, Bps, Principal, ProtocolId, Result, VaultError};

/// Upper bound for a destination's risk score.
pub const MAX_RISK_SCORE: u8 = 10;

/// One registered yield destination and its bookkeeping fields.
///
/// `current_balance` is bookkeeping only: no real transfer to the
/// destination ever happens here, the external transfer boundary is an
/// external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolRecord {
    /// Sequential id, immutable once assigned.
    pub id: ProtocolId,
    /// Destination principal, unique among records.
    pub destination: Principal,
    /// Last reported APY, in basis points.
    pub current_apy: Bps,
    /// Operator-assessed risk, 0 (safest) to 10.
    pub risk_score: u8,
    /// Share of pooled funds directed here by the last allocation pass.
    pub allocation_percentage: Bps,
    /// Funds notionally allocated here by the last allocation pass.
    pub current_balance: Amount,
}

/// Arena of protocol records.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    records: Vec<ProtocolRecord>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a destination and return its id.
    ///
    /// Rejects a destination that is already registered and a risk score
    /// above [`MAX_RISK_SCORE`]. APY, allocation, and balance start at zero.
    pub fn add(&mut self, destination: Principal, risk_score: u8) -> Result<ProtocolId> {
        if risk_score > MAX_RISK_SCORE {
            return Err(VaultError::invalid_parameter(format!(
                "risk score {risk_score} exceeds {MAX_RISK_SCORE}"
            )));
        }
        if self.find_by_destination(destination).is_some() {
            return Err(VaultError::duplicate(format!(
                "destination {destination} already registered"
            )));
        }

        let id = ProtocolId::new(self.records.len() as u64);
        self.records.push(ProtocolRecord {
            id,
            destination,
            current_apy: Bps::default(),
            risk_score,
            allocation_percentage: Bps::default(),
            current_balance: Amount::ZERO,
        });
        Ok(id)
    }

    /// Overwrite a record's reported APY. Other fields are untouched.
    pub fn update_apy(&mut self, id: ProtocolId, apy: Bps) -> Result<()> {
        let record = self
            .records
            .get_mut(id.index())
            .ok_or_else(|| VaultError::not_found(format!("{id} is not registered")))?;
        record.current_apy = apy;
        Ok(())
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: ProtocolId) -> Option<&ProtocolRecord> {
        self.records.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: ProtocolId) -> Option<&mut ProtocolRecord> {
        self.records.get_mut(id.index())
    }

    /// First record registered for `destination`, if any.
    #[must_use]
    pub fn find_by_destination(&self, destination: Principal) -> Option<&ProtocolRecord> {
        self.records
            .iter()
            .find(|record| record.destination == destination)
    }

    /// All records, in id order.
    #[must_use]
    pub fn records(&self) -> &[ProtocolRecord] {
        &self.records
    }

    /// Number of registered destinations. Monotonic.
    #[must_use]
    pub fn protocol_count(&self) -> u64 {
        self.records.len() as u64
    }

    /// Whether no destination is registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//! Identifier types for the Strata vault
//!
//! A `Principal` is the host ledger's notion of an acting identity: a user,
//! the vault itself, an external yield destination, or a guardian signer.
//! A `ProtocolId` indexes the registry arena; ids are dense and never reused.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Acting identity on the host ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Principal(pub Uuid);

impl Principal {
    /// Create a new random principal.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive a stable principal from a label.
    ///
    /// The same label always yields the same principal, which keeps fixture
    /// setups and assertions deterministic.
    pub fn derived(label: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, label.as_bytes()))
    }

    /// Create from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for Principal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "principal-{}", self.0)
    }
}

impl From<Uuid> for Principal {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<Principal> for Uuid {
    fn from(principal: Principal) -> Self {
        principal.0
    }
}

/// Registry index of a yield destination record.
///
/// Assigned sequentially from 0 at insertion and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProtocolId(pub u64);

impl ProtocolId {
    /// Create a protocol id from its raw index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Return the raw index value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Return the index as usize for arena access.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "protocol-{}", self.0)
    }
}

impl From<u64> for ProtocolId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<ProtocolId> for u64 {
    fn from(id: ProtocolId) -> Self {
        id.0
    }
}

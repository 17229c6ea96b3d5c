//! # Strata Vault
//!
//! The custodial fund-accounting and allocation state machine: per-user
//! deposit balances in a single base asset, a registry of external
//! yield-bearing destinations, a threshold-gated performance fee, a
//! placeholder allocation pass behind a pluggable strategy, and a
//! quorum-gated emergency sweep by a fixed guardian set.
//!
//! ## Execution model
//!
//! Every entry point runs as one atomic transaction: the dispatcher applies
//! the operation to a scratch copy of [`VaultState`] while buffering the
//! host-level value movements, and only commits both together on success.
//! Any failure, including one nested inside another operation (a rebalance
//! failing inside a withdrawal), discards the whole delta.
//!
//! ## What Belongs Here
//!
//! - The owned state aggregate and all entry-point semantics
//! - The allocation-strategy seam and its shipped placeholder
//!
//! ## What Does NOT Belong Here
//!
//! - Host bindings or asset custody (strata-core traits; strata-testkit
//!   in-memory implementation)
//! - Deployment/registration tooling for the host chain

#![forbid(unsafe_code)]

pub mod fees;
pub mod guardian;
pub mod ledger;
pub mod rebalance;
pub mod registry;
pub mod state;
pub mod strategy;
pub mod vault;

pub(crate) mod tx;

// Core error types
pub use strata_core::{Result, VaultError};

pub use fees::{FEE_COLLECTION_INTERVAL, MAX_PERFORMANCE_FEE_BPS};
pub use guardian::{GuardianState, RoundStatus, MAX_GUARDIAN_SIGNERS};
pub use ledger::Ledger;
pub use registry::{ProtocolRecord, Registry, MAX_RISK_SCORE};
pub use state::{
    VaultConfig, VaultState, DEFAULT_PERFORMANCE_FEE_BPS, DEFAULT_REBALANCE_THRESHOLD_BPS,
};
pub use strategy::{AllocationStrategy, AllocationTarget, TopYieldStrategy, REBALANCE_SHARE_BPS};
pub use vault::Vault;

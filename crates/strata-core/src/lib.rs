//! # Strata Core
//!
//! Foundation crate for the Strata custodial vault: identifier newtypes,
//! fixed-point units, the unified error type, and the host-chain effect
//! traits every other crate builds on.
//!
//! ## What Belongs Here
//!
//! - Identifier types (`Principal`, `ProtocolId`)
//! - Value units (`Amount`, `Bps`, `BlockHeight`)
//! - The `VaultError` taxonomy and `Result` alias
//! - The `HostChain` trait that abstracts the host ledger's value-transfer
//!   primitive and block-height clock
//!
//! ## What Does NOT Belong Here
//!
//! - Vault state or entry-point logic (strata-vault)
//! - Concrete host implementations (strata-testkit for tests; the real host
//!   binding is an external collaborator)

#![forbid(unsafe_code)]

pub mod effects;
pub mod errors;
pub mod identifiers;
pub mod units;

pub use effects::{HostChain, TransferIntent};
pub use errors::{Result, VaultError};
pub use identifiers::{Principal, ProtocolId};
pub use units::{Amount, BlockHeight, Bps, MAX_BPS};

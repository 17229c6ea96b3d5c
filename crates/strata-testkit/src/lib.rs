//! # Strata Testkit
//!
//! Test scaffolding for the vault crates: a deterministic in-memory
//! [`MockChain`] implementing the host-chain traits, and fixture builders
//! that consolidate the setup pattern used across the integration tests.
//!
//! This is unit/integration scaffolding, not the end-to-end host harness
//! (that harness is an external collaborator and out of scope).

#![forbid(unsafe_code)]

pub mod chain;
pub mod fixtures;

pub use chain::MockChain;
pub use fixtures::{principal, VaultFixture};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Install a fmt tracing subscriber honoring `RUST_LOG`, once per process.
///
/// Call from tests that want to see vault spans; safe to call repeatedly.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

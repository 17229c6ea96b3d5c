//! Unified error taxonomy for vault operations
//!
//! Every entry point returns one of these variants; there is no fatal class.
//! A nested failure (a rebalance failing inside a withdrawal) propagates
//! unchanged as the outer call's failure, and the whole operation's state
//! delta is discarded by the dispatcher.

use serde::{Deserialize, Serialize};

/// Unified error type for all vault operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum VaultError {
    /// Caller lacks the role or quorum the operation requires.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// What authorization was missing
        message: String,
    },

    /// Referenced protocol id is not in the registry.
    #[error("Not found: {message}")]
    NotFound {
        /// What was looked up
        message: String,
    },

    /// Destination already registered.
    #[error("Duplicate: {message}")]
    Duplicate {
        /// What collided
        message: String,
    },

    /// Risk score, fee, or threshold out of range.
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// What was out of range
        message: String,
    },

    /// Withdrawal exceeds the caller's recorded balance.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// Amount the caller asked to withdraw
        requested: u128,
        /// Amount the ledger records for the caller
        available: u128,
    },

    /// Rebalance requested against an empty registry.
    #[error("No eligible protocols registered")]
    NoEligibleProtocols,

    /// The host's value-transfer primitive rejected a movement.
    #[error("Transfer failed: {message}")]
    TransferFailed {
        /// Why the host rejected the transfer
        message: String,
    },
}

impl VaultError {
    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a duplicate error.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }

    /// Create an invalid-parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an insufficient-balance error.
    pub fn insufficient_balance(requested: u128, available: u128) -> Self {
        Self::InsufficientBalance {
            requested,
            available,
        }
    }

    /// Create a transfer-failed error.
    pub fn transfer_failed(message: impl Into<String>) -> Self {
        Self::TransferFailed {
            message: message.into(),
        }
    }
}

/// Standard result type for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

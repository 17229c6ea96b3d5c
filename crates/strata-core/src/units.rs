//! Value units for vault accounting
//!
//! `Amount` is an integer quantity of the base asset, `Bps` a basis-point
//! fraction (10000 = 100%), and `BlockHeight` the host ledger's monotonic
//! time axis. All arithmetic that can overflow or underflow is checked and
//! surfaces as a typed error at the call site.

use crate::errors::VaultError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One hundred percent, in basis points.
pub const MAX_BPS: u16 = 10_000;

/// Quantity of the base asset.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Amount(u128);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a new amount.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Return the raw value.
    #[must_use]
    pub fn value(self) -> u128 {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Add, or error on overflow.
    pub fn checked_add(self, other: Self) -> Result<Self, VaultError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| VaultError::invalid_parameter("amount overflow"))
    }

    /// Subtract, or error on underflow.
    pub fn checked_sub(self, other: Self) -> Result<Self, VaultError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or_else(|| VaultError::invalid_parameter("amount underflow"))
    }

    /// Saturating subtraction, for comparisons where underflow means zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<Amount> for u128 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Basis-point fraction (10000 = 100%).
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Bps(u16);

impl Bps {
    /// Create a basis-point value without a range check.
    ///
    /// Callers that accept external input should use [`Bps::checked`].
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Create a basis-point value, rejecting anything above 100%.
    pub fn checked(value: u16) -> Result<Self, VaultError> {
        if value > MAX_BPS {
            return Err(VaultError::invalid_parameter(format!(
                "{value} bps exceeds {MAX_BPS}"
            )));
        }
        Ok(Self(value))
    }

    /// Return the raw basis-point value.
    #[must_use]
    pub fn value(self) -> u16 {
        self.0
    }

    /// Apply the fraction to an amount, rounding down.
    #[must_use]
    pub fn of(self, amount: Amount) -> Amount {
        let bps = u128::from(self.0);
        match amount.value().checked_mul(bps) {
            Some(scaled) => Amount::new(scaled / u128::from(MAX_BPS)),
            // Amounts near u128::MAX lose sub-bps precision instead of panicking.
            None => Amount::new(amount.value() / u128::from(MAX_BPS) * bps),
        }
    }
}

impl fmt::Display for Bps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

impl From<u16> for Bps {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Monotonic block height from the host ledger.
///
/// The only time axis the vault knows; used solely for the fee cadence gate.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Create a block height.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Return the raw height.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Heights elapsed since `earlier`, saturating at zero.
    #[must_use]
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "height-{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn checked_bps_rejects_over_one_hundred_percent() {
        assert!(Bps::checked(MAX_BPS).is_ok());
        assert_matches!(
            Bps::checked(MAX_BPS + 1),
            Err(VaultError::InvalidParameter { .. })
        );
    }

    #[test]
    fn bps_of_rounds_down() {
        let fee = Bps::new(250); // 2.5%
        assert_eq!(fee.of(Amount::new(10_000)), Amount::new(250));
        assert_eq!(fee.of(Amount::new(39)), Amount::ZERO);
    }

    #[test]
    fn bps_of_survives_extreme_amounts() {
        let half = Bps::new(5_000);
        let result = half.of(Amount::new(u128::MAX));
        assert!(result.value() > 0);
    }

    #[test]
    fn amount_subtraction_is_checked() {
        let err = Amount::new(1)
            .checked_sub(Amount::new(2))
            .expect_err("underflow should error");
        assert_matches!(err, VaultError::InvalidParameter { .. });
    }

    #[test]
    fn height_since_saturates() {
        assert_eq!(BlockHeight::new(10).since(BlockHeight::new(4)), 6);
        assert_eq!(BlockHeight::new(4).since(BlockHeight::new(10)), 0);
    }
}

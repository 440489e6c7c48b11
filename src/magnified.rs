//! Fixed-point arithmetic for the dividend accumulator.
//!
//! Per-unit dividends are kept "magnified" by [`MAGNITUDE`] so that a payout
//! which does not divide evenly by the total supply loses at most one
//! magnified unit per supply unit. Correction terms can go negative and are
//! stored as 256-bit two's complement: all correction arithmetic is modulo
//! 2^256, which yields the exact result whenever the final accumulative
//! value fits in 256 bits.

use primitive_types::U256;
use std::fmt;

/// Scale of the per-unit accumulator, 10^38.
///
/// A power of ten so that payouts split over round supplies stay exact, and
/// below 2^128 so that `amount * MAGNITUDE` fits in 256 bits for any `u128`.
pub const MAGNITUDE: U256 = U256([0x098a_2240_0000_0000, 0x4b3b_4ca8_5a86_c47a, 0, 0]);

/// `per_unit * amount`, modulo 2^256.
pub fn magnify(per_unit: U256, amount: u128) -> U256 {
    per_unit.overflowing_mul(U256::from(amount)).0
}

/// Signed 256-bit correction applied to an account's magnified entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Correction(U256);

impl Correction {
    /// Zero correction.
    pub const ZERO: Self = Correction(U256([0, 0, 0, 0]));

    /// Returns `self + magnified`.
    pub fn plus(self, magnified: U256) -> Self {
        Correction(self.0.overflowing_add(magnified).0)
    }

    /// Returns `self - magnified`.
    pub fn minus(self, magnified: U256) -> Self {
        Correction(self.0.overflowing_sub(magnified).0)
    }

    /// Returns `base + self`.
    ///
    /// The caller guarantees the true sum is non-negative.
    pub fn apply(self, base: U256) -> U256 {
        base.overflowing_add(self.0).0
    }

    /// Returns `true` if the sign bit is set.
    pub fn is_negative(&self) -> bool {
        self.0.bit(255)
    }

    /// Absolute value of the correction.
    pub fn abs(&self) -> U256 {
        if self.is_negative() {
            (!self.0).overflowing_add(U256::one()).0
        } else {
            self.0
        }
    }
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}", self.abs())
        } else {
            write!(f, "{}", self.0)
        }
    }
}

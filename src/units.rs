//! Fixed-point token amounts with 18 decimal places.
//!
//! The ledger itself works in integer base units. `TokenAmount` is the
//! human-facing form used by the replay engine: parsed from decimal strings
//! with `rust_decimal` and always printed with exactly 18 fractional digits.

use crate::DECIMALS;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of base units in one whole token.
pub const ONE_TOKEN: u128 = 10u128.pow(DECIMALS as u32);

/// Reasons a decimal string cannot become a `TokenAmount`.
#[derive(Debug, Error)]
pub enum AmountParseError {
    #[error("invalid decimal: {0}")]
    Decimal(#[from] rust_decimal::Error),

    #[error("amount cannot be negative")]
    Negative,

    #[error("amount has {0} fractional digits, at most 18 are allowed")]
    TooPrecise(u32),

    #[error("amount does not fit in 128 bits of base units")]
    Overflow,
}

/// An amount of tokens stored as base units (10^-18 of a token).
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use dividend_ledger::TokenAmount;
///
/// let amount = TokenAmount::from_str("1.5").unwrap();
/// assert_eq!(amount.base_units(), 1_500_000_000_000_000_000);
/// assert_eq!(amount.to_string(), "1.500000000000000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAmount(u128);

impl TokenAmount {
    /// Zero value.
    pub const ZERO: Self = TokenAmount(0);

    /// Wraps a raw base-unit amount.
    pub const fn from_base_units(units: u128) -> Self {
        TokenAmount(units)
    }

    /// Whole tokens, i.e. `tokens * 10^18` base units. Returns `None` on overflow.
    pub fn from_tokens(tokens: u128) -> Option<Self> {
        tokens.checked_mul(ONE_TOKEN).map(TokenAmount)
    }

    /// The raw base-unit amount.
    pub const fn base_units(&self) -> u128 {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u128> for TokenAmount {
    fn from(units: u128) -> Self {
        TokenAmount(units)
    }
}

impl FromStr for TokenAmount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?.normalize();
        if decimal.is_sign_negative() && !decimal.is_zero() {
            return Err(AmountParseError::Negative);
        }

        let scale = decimal.scale();
        if scale > DECIMALS as u32 {
            return Err(AmountParseError::TooPrecise(scale));
        }

        let mantissa = decimal.mantissa().unsigned_abs();
        let factor = 10u128.pow(DECIMALS as u32 - scale);
        mantissa
            .checked_mul(factor)
            .map(TokenAmount)
            .ok_or(AmountParseError::Overflow)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.0 / ONE_TOKEN,
            self.0 % ONE_TOKEN,
            width = DECIMALS as usize
        )
    }
}

impl Serialize for TokenAmount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> TokenAmount {
        TokenAmount::from_str(s).unwrap()
    }

    #[test]
    fn test_from_str_scales_to_base_units() {
        assert_eq!(amount("1").base_units(), ONE_TOKEN);
        assert_eq!(amount("0.5").base_units(), ONE_TOKEN / 2);
        assert_eq!(amount("  23  ").base_units(), 23 * ONE_TOKEN);
        assert_eq!(amount("0.000000000000000001").base_units(), 1);
    }

    #[test]
    fn test_display_always_has_eighteen_places() {
        assert_eq!(amount("73").to_string(), "73.000000000000000000");
        assert_eq!(TokenAmount::from_base_units(1).to_string(), "0.000000000000000001");
        assert_eq!(TokenAmount::ZERO.to_string(), "0.000000000000000000");
    }

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            TokenAmount::from_str("-1.0"),
            Err(AmountParseError::Negative)
        ));
        assert!(amount("-0").is_zero());
    }

    #[test]
    fn test_rejects_excess_precision() {
        assert!(matches!(
            TokenAmount::from_str("0.0000000000000000001"),
            Err(AmountParseError::TooPrecise(19))
        ));
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_precision() {
        assert_eq!(amount("1.0000000000000000000").base_units(), ONE_TOKEN);
        assert_eq!(amount("0.5000000000000000000000").base_units(), ONE_TOKEN / 2);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            TokenAmount::from_str("ten"),
            Err(AmountParseError::Decimal(_))
        ));
    }

    #[test]
    fn test_from_tokens_overflow() {
        assert_eq!(TokenAmount::from_tokens(2), Some(amount("2")));
        assert_eq!(TokenAmount::from_tokens(u128::MAX), None);
    }
}

//! Lossless decimal numeric type backed by rust_decimal.
//!
//! Every money amount, exchange rate and percentage in the pipeline goes
//! through this type so that `1000 * 0.9` is exactly `900`.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal as RustDecimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal amount used for money, rates and percentages.
///
/// Serializes to a JSON number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Decimal(#[serde(with = "rust_decimal::serde::float")] RustDecimal);

impl Decimal {
    pub fn new(value: RustDecimal) -> Self {
        Decimal(value)
    }

    /// Parse a decimal from its textual form.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid decimal number.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        RustDecimal::from_str(s.trim()).map(Decimal)
    }

    /// Convert from a float. `None` for NaN and infinities.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        RustDecimal::from_f64(value).map(Decimal)
    }

    /// Whole number with a zero scale.
    pub fn from_i64(value: i64) -> Self {
        Decimal(RustDecimal::from(value))
    }

    /// `mantissa * 10^-scale`, e.g. `from_parts(35, 2)` is `0.35`.
    pub fn from_parts(mantissa: i64, scale: u32) -> Self {
        Decimal(RustDecimal::new(mantissa, scale))
    }

    /// Format without exponent notation or trailing zeros.
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    pub fn inner(&self) -> RustDecimal {
        self.0
    }

    pub fn zero() -> Self {
        Decimal(RustDecimal::ZERO)
    }

    pub fn one() -> Self {
        Decimal(RustDecimal::ONE)
    }

    pub fn hundred() -> Self {
        Decimal(RustDecimal::ONE_HUNDRED)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value is > 0.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the value is < 0.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// Round to the nearest integer, ties toward positive infinity.
    ///
    /// `2.5 -> 3`, `-2.5 -> -2`, `-2.6 -> -3`.
    pub fn round_half_up(&self) -> Self {
        let strategy = if self.0.is_sign_negative() {
            RoundingStrategy::MidpointTowardZero
        } else {
            RoundingStrategy::MidpointAwayFromZero
        };
        Decimal(self.0.round_dp_with_strategy(0, strategy))
    }

    /// `self` percent of `base`, i.e. `base * self / 100`.
    pub fn percent_of(&self, base: Decimal) -> Self {
        Decimal(base.0 * self.0 / RustDecimal::ONE_HUNDRED)
    }

    pub fn checked_add(&self, rhs: Decimal) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Decimal)
    }

    pub fn checked_sub(&self, rhs: Decimal) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Decimal)
    }

    pub fn checked_mul(&self, rhs: Decimal) -> Option<Self> {
        self.0.checked_mul(rhs.0).map(Decimal)
    }

    /// Checked division; `None` when `rhs` is zero or the quotient overflows.
    pub fn checked_div(&self, rhs: Decimal) -> Option<Self> {
        self.0.checked_div(rhs.0).map(Decimal)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl FromStr for Decimal {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl From<RustDecimal> for Decimal {
    fn from(value: RustDecimal) -> Self {
        Decimal(value)
    }
}

impl From<Decimal> for RustDecimal {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::from_i64(value)
    }
}

impl std::ops::Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 * rhs.0)
    }
}

impl std::ops::Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}

impl std::iter::Sum for Decimal {
    fn sum<I: Iterator<Item = Decimal>>(iter: I) -> Self {
        iter.fold(Decimal::zero(), |acc, d| acc + d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_exact_rate_multiplication() {
        assert_eq!(d("1000") * d("0.9"), d("900"));
        assert_eq!((d("1000") * d("0.95")).to_canonical_string(), "950");
    }

    #[test]
    fn test_round_half_up_matches_browser_rounding() {
        assert_eq!(d("2.5").round_half_up(), d("3"));
        assert_eq!(d("2.49").round_half_up(), d("2"));
        assert_eq!(d("-2.5").round_half_up(), d("-2"));
        assert_eq!(d("-2.6").round_half_up(), d("-3"));
        assert_eq!(d("35000").round_half_up(), d("35000"));
    }

    #[test]
    fn test_round_half_up_near_max_does_not_overflow() {
        let max = Decimal::new(RustDecimal::MAX);
        assert_eq!(max.round_half_up(), max);
        assert_eq!((-max).round_half_up(), -max);
        assert_eq!(d("7922816251426433759354395033.5").round_half_up(), d("7922816251426433759354395034"));
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let max = Decimal::new(RustDecimal::MAX);
        assert_eq!(max.checked_add(Decimal::one()), None);
        assert_eq!((-max).checked_sub(Decimal::one()), None);
        assert_eq!(max.checked_mul(d("2")), None);
        assert_eq!(d("1").checked_div(Decimal::zero()), None);
        assert_eq!(d("2").checked_add(d("3")), Some(d("5")));
        assert_eq!(d("2").checked_sub(d("3")), Some(d("-1")));
        assert_eq!(d("1000").checked_mul(d("0.9")), Some(d("900")));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Decimal::from_f64(f64::NAN).is_none());
        assert!(Decimal::from_f64(f64::INFINITY).is_none());
        assert!(Decimal::from_f64(f64::NEG_INFINITY).is_none());
        assert_eq!(Decimal::from_f64(0.5), Some(d("0.5")));
    }

    #[test]
    fn test_checked_div_by_zero() {
        assert!(d("10").checked_div(Decimal::zero()).is_none());
        assert_eq!(d("10").checked_div(d("4")), Some(d("2.5")));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(d("20").percent_of(d("45000")), d("9000"));
        assert_eq!(Decimal::zero().percent_of(d("45000")), Decimal::zero());
    }

    #[test]
    fn test_sign_helpers() {
        assert!(d("0.01").is_positive());
        assert!(!Decimal::zero().is_positive());
        assert!(!Decimal::zero().is_negative());
        assert!(d("-1").is_negative());
    }

    #[test]
    fn test_canonical_string_trims_trailing_zeros() {
        assert_eq!(d("950.00").to_canonical_string(), "950");
        assert_eq!(Decimal::from_parts(35, 2).to_string(), "0.35");
    }

    #[test]
    fn test_json_serialization_is_number() {
        let json = serde_json::to_value(d("123.456")).unwrap();
        assert!(json.is_number());
        assert_eq!(json.to_string(), "123.456");
    }

    #[test]
    fn test_sum() {
        let total: Decimal = vec![d("1.5"), d("2.5"), d("6")].into_iter().sum();
        assert_eq!(total, d("10"));
    }
}

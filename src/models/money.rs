//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so sums over large transaction
//! sets stay exact. Percentages and ratios are computed in f64 at the edge.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
///
/// Serialized as a plain decimal string ("150.00"), the same shape the
/// record services use; deserializes from that string or from a JSON
/// number of whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

/// Largest magnitude, in whole units, accepted from external input
pub const MAX_INPUT_UNITS: i64 = 10_000_000_000_000;
const MAX_INPUT_CENTS: i64 = MAX_INPUT_UNITS * 100;

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use fintrack::models::Money;
    /// let amount = Money::from_cents(8550); // $85.50
    /// assert_eq!(amount.to_plain_string(), "85.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units and cents
    pub const fn from_dollars_cents(dollars: i64, cents: i64) -> Self {
        Self(dollars * 100 + cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// The amount as a floating point number of units
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Build from a floating point number of units, rounding to the nearest cent
    ///
    /// `None` for non-finite values and magnitudes of `MAX_INPUT_UNITS` or more.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() >= MAX_INPUT_UNITS as f64 {
            return None;
        }
        Some(Self((value * 100.0).round() as i64))
    }

    /// `self / other` as a plain ratio; zero when `other` is zero
    pub fn ratio_of(&self, other: Money) -> f64 {
        if other.is_zero() {
            0.0
        } else {
            self.0 as f64 / other.0 as f64
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "10.50", "-10.50", "$1,234.56", "$-5.00", "10", "10.5". Digits
    /// past the second decimal place are rounded half away from zero.
    /// Magnitudes of `MAX_INPUT_UNITS` or more are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, s),
        };

        // Currency symbol carries no value; a sign may follow it
        let s = s.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-');
        let (negative, s) = match s.strip_prefix('-') {
            Some(_) if negative => return Err(invalid()),
            Some(stripped) => (true, stripped.trim_start()),
            None => (negative, s),
        };

        let cleaned: String = s.chars().filter(|c| *c != ',').collect();

        if cleaned.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (cleaned.as_str(), ""),
        };

        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || (whole.is_empty() && fraction.is_empty())
        {
            return Err(invalid());
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let digits: Vec<i64> = fraction
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(i64::from)
            .collect();
        let mut cents = digits.first().copied().unwrap_or(0) * 10 + digits.get(1).copied().unwrap_or(0);
        if digits.get(2).copied().unwrap_or(0) >= 5 {
            cents += 1;
        }

        let total = dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .filter(|total| *total < MAX_INPUT_CENTS)
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol and thousands separators: `$1,234.50`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(self.dollars().unsigned_abs()),
            self.cents_part()
        )
    }

    /// Plain decimal with two places and no symbol: `1234.50`
    pub fn to_plain_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().unsigned_abs(), self.cents_part())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_plain_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Money::from_f64(n)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {}", n))),
            Repr::Text(s) => Money::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
        assert_eq!(Money::from_dollars_cents(85, 50).cents(), 8550);
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_cents(123456).to_string(), "$1,234.56");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-8550).to_string(), "-$85.50");
        assert_eq!(Money::from_cents(100000000).to_string(), "$1,000,000.00");
        assert_eq!(Money::from_cents(99999).format_with_symbol("₱"), "₱999.99");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_cents(300000).to_plain_string(), "3000.00");
        assert_eq!(Money::from_cents(-5).to_plain_string(), "-0.05");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("150.00").unwrap().cents(), 15000);
        assert_eq!(Money::parse("$1,234.56").unwrap().cents(), 123456);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("85.5").unwrap().cents(), 8550);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("0.125").unwrap().cents(), 13);
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_parse_sign_after_symbol() {
        assert_eq!(Money::parse("$-5.00").unwrap().cents(), -500);
        assert_eq!(Money::parse("-$5.00").unwrap().cents(), -500);
        assert_eq!(Money::parse("₱ -1,200").unwrap().cents(), -120000);
        assert!(Money::parse("-$-5.00").is_err());
        assert!(Money::parse("$-").is_err());
    }

    #[test]
    fn test_out_of_range_input_is_rejected() {
        assert!(Money::from_f64(1e300).is_none());
        assert!(Money::from_f64(-1e300).is_none());
        assert!(Money::from_f64(MAX_INPUT_UNITS as f64).is_none());
        assert!(Money::from_f64(9_999_999_999_999.0).is_some());
        assert!(Money::parse("99999999999999999").is_err());
        assert!(Money::parse("10000000000000").is_err());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(min - Money::from_cents(1), min);
        assert_eq!(min.abs(), max);
        assert_eq!((-min).cents(), i64::MAX);

        let total: Money = vec![max, max].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_ratio_of() {
        let spent = Money::from_cents(45000);
        let limit = Money::from_cents(50000);
        assert!((spent.ratio_of(limit) - 0.9).abs() < 1e-12);
        assert_eq!(spent.ratio_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Money::from_f64(85.5).unwrap().cents(), 8550);
        assert!(Money::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"10.50\"");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);

        let from_number: Money = serde_json::from_str("85.5").unwrap();
        assert_eq!(from_number.cents(), 8550);
        assert!(serde_json::from_str::<Money>("\"n/a\"").is_err());
    }
}

//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Wire Format vs. Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The commerce API sends totals as plain JSON numbers in major units:   │
//! │                                                                         │
//! │    "total": 1200          (whole currency units)                       │
//! │    "final_total": 1110.5  (after a percentage coupon)                  │
//! │                                                                         │
//! │  Locally every value is held as integer cents:                         │
//! │                                                                         │
//! │    1200     → Money(120000)                                            │
//! │    1110.5   → Money(111050)                                            │
//! │                                                                         │
//! │  Conversion rounds to the nearest cent exactly once, at the boundary.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartsync_core::money::Money;
//!
//! let price = Money::from_cents(1099);
//! let total = price * 2 + Money::from_cents(500);
//! assert_eq!(total.cents(), 2698);
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts are expressed as negative differences
/// - **Custom serde**: the API speaks major units, see the module docs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole major units.
    ///
    /// ```rust
    /// use cartsync_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(12).cents(), 1200);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Converts a major-unit amount as sent by the API, rounding to the
    /// nearest cent.
    ///
    /// ```rust
    /// use cartsync_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(1110.5).cents(), 111050);
    /// assert_eq!(Money::from_major_f64(0.125).cents(), 13);
    /// ```
    pub fn from_major_f64(major: f64) -> Self {
        Money((major * 100.0).round() as i64)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value in major units, as the API expects it.
    pub fn as_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Amount saved when `self` is paid instead of `original`.
    ///
    /// Never negative: paying more than the original saves nothing.
    ///
    /// ```rust
    /// use cartsync_core::Money;
    ///
    /// let due = Money::from_major(264);
    /// assert_eq!(due.discount_from(Money::from_major(330)), Money::from_major(66));
    /// assert_eq!(due.discount_from(Money::from_major(200)), Money::zero());
    /// ```
    pub fn discount_from(self, original: Money) -> Money {
        let saved = original - self;
        if saved.is_negative() {
            Money::zero()
        } else {
            saved
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.34`. Use a localized formatter for customer-facing UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Serde (major units on the wire)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_major_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a monetary amount in major units")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom(format!("amount {v} out of range")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map_err(|_| E::custom(format!("amount {v} out of range")))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom("amount must be finite"));
        }
        Ok(Money::from_major_f64(v))
    }

    // Some backends quote numbers ("1200"); accept them rather than fail the snapshot.
    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        match v.trim().parse::<f64>() {
            Ok(parsed) => self.visit_f64(parsed),
            Err(_) => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_discount_from() {
        let original = Money::from_cents(33_000);
        assert_eq!(Money::from_cents(26_400).discount_from(original).cents(), 6_600);
        assert!(original.discount_from(original).is_zero());
        assert!(Money::from_cents(40_000).discount_from(original).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert!((b - a).is_negative());

        let summed: Money = [a, b, b].into_iter().sum();
        assert_eq!(summed.cents(), 2000);
    }

    #[test]
    fn test_deserialize_major_units() {
        let whole: Money = serde_json::from_str("1200").unwrap();
        assert_eq!(whole.cents(), 120000);

        let fractional: Money = serde_json::from_str("1110.5").unwrap();
        assert_eq!(fractional.cents(), 111050);

        let quoted: Money = serde_json::from_str("\"99.99\"").unwrap();
        assert_eq!(quoted.cents(), 9999);

        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
        assert!(serde_json::from_str::<Money>("null").is_err());
    }

    #[test]
    fn test_serialize_major_units() {
        assert_eq!(serde_json::to_string(&Money::from_major(12)).unwrap(), "12");
        assert_eq!(
            serde_json::to_string(&Money::from_cents(111050)).unwrap(),
            "1110.5"
        );
    }
}

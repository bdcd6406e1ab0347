//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A sale total is the sum of many caller-supplied line totals.           │
//! │  Summing floats drifts; summing integer cents never does:               │
//! │    60000 + 4000 = 64000 cents = S/ 640.00 exactly                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use botica_core::money::Money;
//!
//! // Create from cents (preferred)
//! let line_a = Money::from_cents(60_000); // S/ 600.00
//! let line_b = Money::from_cents(4_000);  // S/ 40.00
//!
//! // Exact addition - this is all the sale aggregator needs
//! assert_eq!((line_a + line_b).cents(), 64_000);
//!
//! // NEVER construct from floats: no such method exists.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (céntimos).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediates for adjustments,
///   even though persisted amounts are validated as non-negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent serde**: Serializes as a plain integer of cents, so a
///   request field `"priceCents": 3000` maps directly to `Money(3000)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use botica_core::money::Money;
    ///
    /// let price = Money::from_cents(3000); // S/ 30.00
    /// assert_eq!(price.cents(), 3000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (soles) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (céntimos) portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
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
    ///
    /// Request amounts must never be negative; the line item validator
    /// rejects any line carrying a negative price, subtotal, or total.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. User-facing rendering belongs to the
/// transport/UI layer where localization is handled.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Summing an iterator of Money values (used by the sale aggregator).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(50_847);
        assert_eq!(money.cents(), 50_847);
        assert_eq!(money.major(), 508);
        assert_eq!(money.minor(), 47);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(64_000)), "640.00");
        assert_eq!(format!("{}", Money::from_cents(3000)), "30.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(60_000);
        let b = Money::from_cents(4_000);

        assert_eq!((a + b).cents(), 64_000);
        assert_eq!((a - b).cents(), 56_000);
    }

    #[test]
    fn test_sum_is_exact() {
        // Many small additions must not drift (the reason Money exists).
        let totals = vec![Money::from_cents(10); 1000];
        let sum: Money = totals.into_iter().sum();
        assert_eq!(sum.cents(), 10_000);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_serde_transparent() {
        let money = Money::from_cents(3000);
        assert_eq!(serde_json::to_string(&money).unwrap(), "3000");

        let parsed: Money = serde_json::from_str("64000").unwrap();
        assert_eq!(parsed.cents(), 64_000);
    }
}

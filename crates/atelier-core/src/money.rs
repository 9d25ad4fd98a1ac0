//! # Money Module
//!
//! Provides the `Money` and `Rate` types for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A quote that sums stones, labor, shipping, markup, and commission     │
//! │  accumulates that error at every step.                                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                            │
//! │    $910.00 is 91000 cents; 30% markup is 3000 bps                      │
//! │    91000 × 3000 / 10000 = 27300 cents, exactly                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Free-Text Coercion
//! Quote cost fields are free-text entry. The ONE place that text becomes
//! money is [`to_money`]: malformed or empty input coerces to zero, never
//! an error. Nothing else in the crate parses cost strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// - **i64 (signed)**: negative values stay representable for difference
///   calculations between metal contexts
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
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

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a fractional rate, rounding half away from zero.
    ///
    /// ## Implementation
    /// Integer math: `(cents * bps + 5000) / 10000`. The +5000 provides
    /// rounding (5000/10000 = 0.5). i128 intermediate prevents overflow
    /// on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::{Money, Rate};
    ///
    /// let materials = Money::from_cents(70_000); // $700.00
    /// let markup = Rate::from_bps(3000);         // 30%
    ///
    /// // $700.00 × 30% = $210.00
    /// assert_eq!(materials.apply_rate(markup).cents(), 21_000);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Money;
    ///
    /// let stone = Money::from_cents(4500); // $45.00 per accent stone
    /// assert_eq!(stone.multiply_quantity(6).cents(), 27_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Free-Text Coercion
// =============================================================================

/// Converts free-text cost entry to Money. Never fails.
///
/// Malformed, empty, or non-finite input coerces to zero - resilience over
/// strictness for the cost-entry use case. This is the single auditable
/// conversion point for user-entered amounts.
///
/// ## Example
/// ```rust
/// use atelier_core::money::{to_money, Money};
///
/// assert_eq!(to_money("500"), Money::from_cents(50_000));
/// assert_eq!(to_money(" 12.34 "), Money::from_cents(1234));
/// assert_eq!(to_money(""), Money::zero());
/// assert_eq!(to_money("two hundred"), Money::zero());
/// ```
pub fn to_money(raw: &str) -> Money {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() => Money::from_cents(dollars_to_cents(amount)),
        _ => Money::zero(),
    }
}

/// Rounds a dollar amount to whole cents. Caller guarantees finiteness.
pub(crate) fn dollars_to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

// =============================================================================
// Rate Type
// =============================================================================

/// A fractional rate in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000. Used for material markup (3000 = 30%),
/// commission (1000 = 10%), and the rush multiplier (15000 = ×1.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a fraction, e.g. `0.10` → 10%.
    ///
    /// Non-finite or negative input clamps to zero. Settings documents are
    /// the only expected source of fractional input.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_finite() && fraction > 0.0 {
            Rate((fraction * 10_000.0).round() as u32)
        } else {
            Rate(0)
        }
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// The portion of a multiplier above ×1, e.g. ×1.5 → 50%.
    ///
    /// Saturates at zero for multipliers at or below ×1, so a rush
    /// multiplier can never turn into a discount.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Rate;
    ///
    /// let rush = Rate::from_bps(15_000); // ×1.5
    /// assert_eq!(rush.surcharge().bps(), 5_000); // +50%
    /// ```
    #[inline]
    pub const fn surcharge(&self) -> Rate {
        Rate(self.0.saturating_sub(10_000))
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for logging and debugging. The frontend owns localized display.
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

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Default rate is zero.
impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_apply_rate_basic() {
        // $700.00 at 30% = $210.00
        let amount = Money::from_cents(70_000);
        assert_eq!(amount.apply_rate(Rate::from_bps(3000)).cents(), 21_000);
    }

    #[test]
    fn test_apply_rate_with_rounding() {
        // $10.00 at 8.25% = $0.825 → $0.83
        let amount = Money::from_cents(1000);
        assert_eq!(amount.apply_rate(Rate::from_bps(825)).cents(), 83);
    }

    #[test]
    fn test_apply_rate_full_markup_doubles() {
        // 100% markup: $350.00 → $350.00 of margin
        let amount = Money::from_cents(35_000);
        assert_eq!(amount.apply_rate(Rate::from_bps(10_000)), amount);
    }

    #[test]
    fn test_to_money_coercion_table() {
        assert_eq!(to_money("500"), Money::from_cents(50_000));
        assert_eq!(to_money("12.34"), Money::from_cents(1234));
        assert_eq!(to_money("  7.5  "), Money::from_cents(750));
        assert_eq!(to_money("-3"), Money::from_cents(-300));

        // Malformed or empty input coerces to zero, never errors.
        assert_eq!(to_money(""), Money::zero());
        assert_eq!(to_money("   "), Money::zero());
        assert_eq!(to_money("abc"), Money::zero());
        assert_eq!(to_money("12.3.4"), Money::zero());
        assert_eq!(to_money("$500"), Money::zero());
        assert_eq!(to_money("NaN"), Money::zero());
        assert_eq!(to_money("inf"), Money::zero());
    }

    #[test]
    fn test_rate_from_fraction() {
        assert_eq!(Rate::from_fraction(0.10).bps(), 1000);
        assert_eq!(Rate::from_fraction(0.30).bps(), 3000);
        assert_eq!(Rate::from_fraction(1.0).bps(), 10_000);
        assert_eq!(Rate::from_fraction(1.5).bps(), 15_000);

        assert_eq!(Rate::from_fraction(-0.5).bps(), 0);
        assert_eq!(Rate::from_fraction(f64::NAN).bps(), 0);
    }

    #[test]
    fn test_rate_surcharge() {
        assert_eq!(Rate::from_bps(15_000).surcharge().bps(), 5_000);
        assert_eq!(Rate::from_bps(10_000).surcharge().bps(), 0);
        // Sub-1x multipliers never become discounts.
        assert_eq!(Rate::from_bps(8_000).surcharge().bps(), 0);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(positive.is_positive());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    }
}

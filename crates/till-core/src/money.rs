//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In f64:                                                                │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Tax lines are rounded to cents only AFTER sales and duty tax are     │
//! │  added together, so the unrounded parts must be exact:                 │
//! │    sales 0.9891 + duty 0.4396 = 1.4287 → 1.43                          │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal with explicit rounding                  │
//! │    Decimal keeps 0.9891 as 9891 × 10⁻⁴ with no drift                   │
//! │    round_to_cents() is the ONLY place precision is dropped             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal_macros::dec;
//! use till_core::money::Money;
//!
//! let price = Money::new(dec!(10.99));
//!
//! // Arithmetic keeps full precision
//! let doubled = price.checked_multiply_quantity(2);     // Some(21.98)
//! let total = price + Money::new(dec!(5.00));           // 15.99
//! assert_eq!(doubled, Some(Money::new(dec!(21.98))));
//! assert_eq!(total.amount(), dec!(15.99));
//!
//! // Rounding is explicit
//! assert_eq!(Money::new(dec!(1.4287)).round_to_cents(), Money::new(dec!(1.43)));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use crate::types::TaxRate;

/// Number of decimal places a settled amount carries.
pub const CENT_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in major currency units, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: negative amounts pass through unvalidated, the
///   engine trusts catalog data
/// - **No implicit rounding**: `+`, `-` and [`Money::apply_rate`] keep every
///   digit; [`Money::round_to_cents`] is the only lossy operation
/// - **Range**: `Decimal` spans about ±7.9 × 10²⁸. The order pipeline uses
///   the `checked_*` methods so an amount outside that range becomes an
///   error; the plain operators panic on overflow like `Decimal`'s own
/// - **Transparent serde**: serialized as the decimal string, `"10.99"`
///
/// ## Where Money Flows
/// ```text
/// Product.unit_price ──► × quantity ──► net amount
///                                          │
///                      ┌───────────────────┴──────────────────┐
///                      ▼                                      ▼
///               sales calculator                       duty calculator
///                      │                                      │
///                      └──────────► sum ──► round_to_cents ◄──┘
///                                              │
///                                              ▼
///                                     OrderLine.tax_amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let zero = Money::zero();
    /// assert!(zero.is_zero());
    /// assert_eq!(zero.to_string(), "0.00");
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to whole cents, midpoints away from zero.
    ///
    /// ## Midpoint Handling
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF AWAY FROM ZERO                                          │
    /// │                                                                     │
    /// │   0.045 → 0.05      (bankers rounding would give 0.04)              │
    /// │   0.065 → 0.07                                                      │
    /// │  -0.045 → -0.05     (symmetric for negative amounts)                │
    /// │   1.4287 → 1.43     (below midpoint, plain rounding)                │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::new(dec!(0.045)).round_to_cents().amount(), dec!(0.05));
    /// ```
    pub fn round_to_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiplies the amount by a tax rate without rounding.
    ///
    /// For a rate within `-1..=1` the product never leaves `Decimal`'s range.
    /// Larger rates on amounts near [`Decimal::MAX`] panic.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use till_core::money::Money;
    /// use till_core::types::TaxRate;
    ///
    /// let tax = Money::new(dec!(10.99)).apply_rate(TaxRate::new(dec!(0.09)));
    /// assert_eq!(tax.amount(), dec!(0.9891));
    /// ```
    #[inline]
    pub fn apply_rate(&self, rate: TaxRate) -> Money {
        Money(self.0 * rate.fraction())
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use rust_decimal_macros::dec;
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::new(dec!(2.99));
    /// assert_eq!(unit_price.checked_multiply_quantity(3), Some(Money::new(dec!(8.97))));
    /// assert_eq!(Money::new(Decimal::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(qty)).map(Money)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Always two decimal places, rounded half away from zero.
///
/// Receipts print through this, so `12.4` shows as `12.40` and `0` as `0.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cents = self.round_to_cents().0;
        cents.rescale(CENT_PLACES);
        write!(f, "{}", cents)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec!(10.99)).to_string(), "10.99");
        assert_eq!(Money::new(dec!(5)).to_string(), "5.00");
        assert_eq!(Money::new(dec!(12.4)).to_string(), "12.40");
        assert_eq!(Money::new(dec!(-5.5)).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::new(dec!(0.658)).to_string(), "0.66");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10.00));
        let b = Money::new(dec!(5.00));

        assert_eq!((a + b).amount(), dec!(15));
        assert_eq!((a - b).amount(), dec!(5));

        let mut c = a;
        c += b;
        assert_eq!(c.amount(), dec!(15));
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::new(dec!(19.99));
        assert_eq!(price.checked_multiply_quantity(3), Some(Money::new(dec!(59.97))));
        assert_eq!(price.checked_multiply_quantity(0), Some(Money::zero()));
        assert_eq!(price.checked_add(Money::new(dec!(0.01))), Some(Money::new(dec!(20.00))));

        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge.checked_multiply_quantity(2), None);
        assert_eq!(huge.checked_add(Money::new(dec!(1))), None);
        assert_eq!(huge.checked_multiply_quantity(1), Some(huge));
    }

    #[test]
    fn test_apply_rate_keeps_precision() {
        let net = Money::new(dec!(10.99));
        assert_eq!(net.apply_rate(TaxRate::new(dec!(0.09))).amount(), dec!(0.9891));
        assert_eq!(net.apply_rate(TaxRate::new(dec!(0.04))).amount(), dec!(0.4396));
        assert!(net.apply_rate(TaxRate::zero()).is_zero());
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(Money::new(dec!(1.4287)).round_to_cents().amount(), dec!(1.43));
        assert_eq!(Money::new(dec!(1.7991)).round_to_cents().amount(), dec!(1.80));
        assert_eq!(Money::new(dec!(0.045)).round_to_cents().amount(), dec!(0.05));
        assert_eq!(Money::new(dec!(0.025)).round_to_cents().amount(), dec!(0.03));
        assert_eq!(Money::new(dec!(-0.045)).round_to_cents().amount(), dec!(-0.05));
        assert_eq!(Money::new(dec!(0.0044)).round_to_cents().amount(), dec!(0));
    }

    #[test]
    fn test_sum() {
        let amounts = [
            Money::new(dec!(1.43)),
            Money::new(dec!(1.80)),
            Money::new(dec!(0.66)),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.amount(), dec!(3.89));

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero() {
        assert!(Money::zero().is_zero());
        assert!(Money::default().is_zero());
        assert!(Money::new(dec!(0.0000)).is_zero());
        assert!(!Money::new(dec!(0.01)).is_zero());
    }

    #[test]
    fn test_serde() {
        let price = Money::new(dec!(16.45));
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"16.45\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}

//! # Tax Calculators
//!
//! A calculator turns the net amount of one order line into the tax owed for
//! one named category. The name is the lookup key the registry resolves.
//!
//! ## Built-in Rate Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   name        axis     rate                                             │
//! │   ─────────   ──────   ──────                                           │
//! │   Default     sales    0.09                                             │
//! │   Food        sales    0.00                                             │
//! │   Book        sales    0.00                                             │
//! │   Medical     sales    0.00                                             │
//! │   Domestic    duty     0.00                                             │
//! │   Import      duty     0.04                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! New categories get a new calculator with a new name. Existing calculators
//! are never edited to cover them.

use rust_decimal_macros::dec;
use std::borrow::Cow;

use crate::money::Money;
use crate::types::TaxRate;

// =============================================================================
// Calculator Contract
// =============================================================================

/// Computes the tax for one category.
///
/// Implementations must be pure: the same net amount always produces the same
/// tax, and nothing is rounded here. Rounding happens once per order line on
/// the combined sales and duty amount.
pub trait TaxCalculator: Send + Sync {
    /// Registry key of this calculator, e.g. `"Import"`.
    fn name(&self) -> &str;

    /// Tax owed on `net_amount`, unrounded.
    fn calculate(&self, net_amount: Money) -> Money;
}

impl std::fmt::Debug for dyn TaxCalculator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxCalculator")
            .field("name", &self.name())
            .finish()
    }
}

// =============================================================================
// Flat Rate Calculator
// =============================================================================

/// Taxes a fixed fraction of the net amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRateCalculator {
    name: Cow<'static, str>,
    rate: TaxRate,
}

impl FlatRateCalculator {
    /// Creates a flat-rate calculator.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use till_core::calculator::{FlatRateCalculator, TaxCalculator};
    /// use till_core::money::Money;
    /// use till_core::types::TaxRate;
    ///
    /// let luxury = FlatRateCalculator::new("Luxury", TaxRate::new(dec!(0.20)));
    /// assert_eq!(luxury.calculate(Money::new(dec!(50))).amount(), dec!(10));
    /// ```
    pub fn new(name: impl Into<Cow<'static, str>>, rate: TaxRate) -> Self {
        FlatRateCalculator {
            name: name.into(),
            rate,
        }
    }

    /// Returns the rate this calculator applies.
    pub fn rate(&self) -> TaxRate {
        self.rate
    }
}

impl TaxCalculator for FlatRateCalculator {
    fn name(&self) -> &str {
        &self.name
    }

    fn calculate(&self, net_amount: Money) -> Money {
        net_amount.apply_rate(self.rate)
    }
}

// =============================================================================
// Standard Calculator Set
// =============================================================================

/// Built-in `(name, rate)` pairs, one per category value.
pub const STANDARD_RATES: [(&str, TaxRate); 6] = [
    ("Default", TaxRate::new(dec!(0.09))),
    ("Food", TaxRate::new(dec!(0.00))),
    ("Book", TaxRate::new(dec!(0.00))),
    ("Medical", TaxRate::new(dec!(0.00))),
    ("Domestic", TaxRate::new(dec!(0.00))),
    ("Import", TaxRate::new(dec!(0.04))),
];

/// Returns the six built-in calculators, ready for a registry.
///
/// How the set is assembled is the caller's choice; this is just the
/// hand-wired default.
///
/// ## Example
/// ```rust
/// use till_core::calculator::standard_calculators;
/// use till_core::registry::CalculatorRegistry;
///
/// let registry = CalculatorRegistry::new(standard_calculators()).unwrap();
/// assert_eq!(registry.len(), 6);
/// ```
pub fn standard_calculators() -> Vec<Box<dyn TaxCalculator>> {
    STANDARD_RATES
        .iter()
        .map(|&(name, rate)| Box::new(FlatRateCalculator::new(name, rate)) as Box<dyn TaxCalculator>)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DutyTaxCategory, SalesTaxCategory};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_standard_rates_match_table() {
        let expected = [
            ("Default", dec!(0.09)),
            ("Food", dec!(0)),
            ("Book", dec!(0)),
            ("Medical", dec!(0)),
            ("Domestic", dec!(0)),
            ("Import", dec!(0.04)),
        ];
        for ((name, rate), (want_name, want_rate)) in STANDARD_RATES.iter().zip(expected) {
            assert_eq!(*name, want_name);
            assert_eq!(rate.fraction(), want_rate);
        }
    }

    #[test]
    fn test_every_category_has_a_standard_calculator() {
        let calculators = standard_calculators();
        let names: Vec<&str> = calculators.iter().map(|c| c.name()).collect();

        for category in SalesTaxCategory::ALL {
            assert!(names.contains(&category.calculator_name()), "{category}");
        }
        for category in DutyTaxCategory::ALL {
            assert!(names.contains(&category.calculator_name()), "{category}");
        }
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_flat_rate_does_not_round() {
        let default = FlatRateCalculator::new("Default", TaxRate::new(dec!(0.09)));
        let import = FlatRateCalculator::new("Import", TaxRate::new(dec!(0.04)));

        assert_eq!(default.calculate(Money::new(dec!(10.99))).amount(), dec!(0.9891));
        assert_eq!(import.calculate(Money::new(dec!(10.99))).amount(), dec!(0.4396));
        assert_eq!(import.calculate(Money::new(dec!(16.45))).amount(), dec!(0.658));
    }

    #[test]
    fn test_owned_name() {
        let name = String::from("Luxury");
        let calc = FlatRateCalculator::new(name, TaxRate::new(dec!(0.2)));
        assert_eq!(calc.name(), "Luxury");
        assert_eq!(calc.rate().fraction(), dec!(0.2));
    }

    proptest! {
        #[test]
        fn prop_standard_calculators_apply_their_rate(cents in 0i64..10_000_000, qty in 1u32..1000) {
            let net = Money::new(Decimal::new(cents, 2)).checked_multiply_quantity(qty).unwrap();
            for ((_, rate), calc) in STANDARD_RATES.iter().zip(standard_calculators()) {
                prop_assert_eq!(calc.calculate(net).amount(), net.amount() * rate.fraction());
            }
        }
    }
}

//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌──────────────────┐     │
//! │  │    Product      │   │ SalesTaxCategory │   │ DutyTaxCategory  │     │
//! │  │  ─────────────  │   │  ──────────────  │   │  ──────────────  │     │
//! │  │  name           │   │  Default         │   │  Domestic        │     │
//! │  │  unit_price     │   │  Food            │   │  Import          │     │
//! │  │  sales_tax ─────┼──►│  Book            │   └──────────────────┘     │
//! │  │  duty_tax ──────┼───┼──────────────────┼──►                         │
//! │  └─────────────────┘   │  Medical         │                            │
//! │                        └──────────────────┘                            │
//! │  ┌─────────────────┐                                                   │
//! │  │    TaxRate      │   Each category value names exactly one           │
//! │  │  ─────────────  │   calculator: SalesTaxCategory::Food → "Food".    │
//! │  │  0.09 = 9%      │   That name is the registry lookup key.           │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Product Identity
//! Products are grouped on checkout by `name` alone. Two products with the
//! same name and a different price end up on one order line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a decimal fraction of the net amount.
///
/// `0.09` is 9%, `0.04` is 4%. Kept as a [`Decimal`] so `net × rate` is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a tax rate from a fraction (`dec!(0.09)` for 9%).
    #[inline]
    pub const fn new(fraction: Decimal) -> Self {
        TaxRate(fraction)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Tax Categories
// =============================================================================

/// Error returned when a string names no category of the requested axis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {axis} tax category: '{value}'")]
pub struct UnknownCategory {
    pub axis: &'static str,
    pub value: String,
}

/// Sales tax classification of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum SalesTaxCategory {
    /// General merchandise, taxed at the standard rate.
    #[default]
    Default,
    Food,
    Book,
    Medical,
}

impl SalesTaxCategory {
    /// Every sales category, in declaration order.
    pub const ALL: [SalesTaxCategory; 4] = [
        SalesTaxCategory::Default,
        SalesTaxCategory::Food,
        SalesTaxCategory::Book,
        SalesTaxCategory::Medical,
    ];

    /// The name of the calculator that taxes this category.
    pub const fn calculator_name(&self) -> &'static str {
        match self {
            SalesTaxCategory::Default => "Default",
            SalesTaxCategory::Food => "Food",
            SalesTaxCategory::Book => "Book",
            SalesTaxCategory::Medical => "Medical",
        }
    }
}

/// Import duty classification of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum DutyTaxCategory {
    #[default]
    Domestic,
    Import,
}

impl DutyTaxCategory {
    /// Every duty category, in declaration order.
    pub const ALL: [DutyTaxCategory; 2] = [DutyTaxCategory::Domestic, DutyTaxCategory::Import];

    /// The name of the calculator that taxes this category.
    pub const fn calculator_name(&self) -> &'static str {
        match self {
            DutyTaxCategory::Domestic => "Domestic",
            DutyTaxCategory::Import => "Import",
        }
    }
}

impl fmt::Display for SalesTaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.calculator_name())
    }
}

impl fmt::Display for DutyTaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.calculator_name())
    }
}

/// Accepts the calculator name in any letter case: `"food"`, `"Food"`.
impl FromStr for SalesTaxCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.calculator_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory {
                axis: "sales",
                value: s.to_string(),
            })
    }
}

/// Accepts the calculator name in any letter case: `"import"`, `"Import"`.
impl FromStr for DutyTaxCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.calculator_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory {
                axis: "duty",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for SalesTaxCategory {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for DutyTaxCategory {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SalesTaxCategory> for &'static str {
    fn from(category: SalesTaxCategory) -> Self {
        category.calculator_name()
    }
}

impl From<DutyTaxCategory> for &'static str {
    fn from(category: DutyTaxCategory) -> Self {
        category.calculator_name()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry as it is purchased.
///
/// Immutable by convention: the checkout only ever reads it. Upstream
/// catalog data is trusted, so prices are not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name, also the grouping key on checkout.
    pub name: String,

    /// Price of one unit before tax.
    pub unit_price: Money,

    /// Sales tax classification.
    pub sales_tax: SalesTaxCategory,

    /// Import duty classification.
    pub duty_tax: DutyTaxCategory,
}

impl Product {
    /// Creates a product.
    pub fn new(
        name: impl Into<String>,
        unit_price: Money,
        sales_tax: SalesTaxCategory,
        duty_tax: DutyTaxCategory,
    ) -> Self {
        Product {
            name: name.into(),
            unit_price,
            sales_tax,
            duty_tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Order Building
//!
//! Turns a sequence of purchased products into a priced, tax-inclusive order.
//!
//! ## Checkout Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         OrderBuilder::build                             │
//! │                                                                         │
//! │  [CD, perfume, CD]                                                      │
//! │       │                                                                 │
//! │       ▼  group by name, first occurrence order                          │
//! │  [(CD ×2), (perfume ×1)]                                                │
//! │       │                                                                 │
//! │       ▼  per group, first item is the representative                    │
//! │  net   = unit_price × quantity                                          │
//! │  sales = TaxService("Default", net)      unrounded                      │
//! │  duty  = TaxService("Import",  net)      unrounded                      │
//! │  tax   = round_half_away_from_zero(sales + duty, 2)                     │
//! │  total = net + tax                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Order { lines, total_tax = Σ tax, total_price = Σ total }              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Order
//! Tax is rounded once, on the sum of both components. With a net of `0.05`
//! at 9% + 4%: `0.0045 + 0.002 = 0.0065 → 0.01`, while rounding each part
//! first would give `0.00 + 0.00`. Order totals add already rounded line
//! values and are never rounded again.
//!
//! ## Range
//! Every step uses checked decimal arithmetic. A line whose quantity, net,
//! tax or total falls outside `Decimal`'s range, or that pushes the order
//! sums out of it, fails the build with `CoreError::AmountOverflow`.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::cart::ShoppingCart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::service::TaxService;
use crate::types::Product;

// =============================================================================
// Order Line
// =============================================================================

/// One priced line per distinct product name.
///
/// ## Invariants
/// - `quantity >= 1`
/// - `tax_amount == round2(sales_tax + duty_tax)`
/// - `total_amount == unit_price × quantity + tax_amount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    product: Product,
    quantity: u32,
    tax_amount: Money,
    total_amount: Money,
}

impl OrderLine {
    /// The representative product of the group (its first occurrence).
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Product name, shorthand for `product().name`.
    pub fn name(&self) -> &str {
        &self.product.name
    }

    /// How many units were bought under this name.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Sales plus duty tax, rounded to cents.
    pub fn tax_amount(&self) -> Money {
        self.tax_amount
    }

    /// Net amount plus tax.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Line subtotal before tax.
    pub fn net_amount(&self) -> Money {
        self.total_amount - self.tax_amount
    }
}

// =============================================================================
// Order
// =============================================================================

/// The result of one checkout.
///
/// Freshly allocated per build and owned by the caller; there is no way to
/// change it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Order {
    lines: Vec<OrderLine>,
    total_tax: Money,
    total_price: Money,
}

impl Order {
    /// Lines in first-occurrence order of product names.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Sum of line taxes.
    pub fn total_tax(&self) -> Money {
        self.total_tax
    }

    /// Sum of line totals.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Checks if the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Finds the line for a product name.
    pub fn line(&self, name: &str) -> Option<&OrderLine> {
        self.lines.iter().find(|line| line.name() == name)
    }

    fn push(&mut self, line: OrderLine) -> CoreResult<()> {
        let overflow = || amount_overflow(&line.product);
        self.total_tax = self.total_tax.checked_add(line.tax_amount).ok_or_else(overflow)?;
        self.total_price = self
            .total_price
            .checked_add(line.total_amount)
            .ok_or_else(overflow)?;
        self.lines.push(line);
        Ok(())
    }
}

// =============================================================================
// Order Builder
// =============================================================================

/// Prices carts against a [`TaxService`].
///
/// ## Example
/// ```rust
/// use rust_decimal_macros::dec;
/// use till_core::calculator::standard_calculators;
/// use till_core::money::Money;
/// use till_core::order::OrderBuilder;
/// use till_core::registry::CalculatorRegistry;
/// use till_core::service::TaxService;
/// use till_core::types::{DutyTaxCategory, Product, SalesTaxCategory};
///
/// let registry = CalculatorRegistry::new(standard_calculators()).unwrap();
/// let builder = OrderBuilder::new(TaxService::new(registry));
///
/// let cd = Product::new(
///     "imported CD",
///     Money::new(dec!(10.99)),
///     SalesTaxCategory::Default,
///     DutyTaxCategory::Import,
/// );
/// let order = builder.build(&[cd]).unwrap();
///
/// assert_eq!(order.total_tax().amount(), dec!(1.43));
/// assert_eq!(order.total_price().amount(), dec!(12.42));
/// ```
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    tax_service: TaxService,
}

impl OrderBuilder {
    /// Creates a builder that prices lines with `tax_service`.
    pub fn new(tax_service: TaxService) -> Self {
        OrderBuilder { tax_service }
    }

    /// Returns the tax service used for pricing.
    pub fn tax_service(&self) -> &TaxService {
        &self.tax_service
    }

    /// Builds an order from products in purchase order.
    ///
    /// ## Errors
    /// - [`CoreError::CalculatorNotFound`] if any product's category has no
    ///   calculator.
    /// - [`CoreError::AmountOverflow`] if an amount leaves `Decimal`'s range.
    ///
    /// The whole build is abandoned; no partial order is returned.
    pub fn build(&self, products: &[Product]) -> CoreResult<Order> {
        let mut order = Order::default();

        for (representative, count) in group_by_name(products) {
            let quantity = line_quantity(representative, count)?;
            order.push(self.price_line(representative, quantity)?)?;
        }

        debug!(
            items = products.len(),
            lines = order.lines.len(),
            total_tax = %order.total_tax,
            total_price = %order.total_price,
            "Order built"
        );
        Ok(order)
    }

    /// Builds an order from everything in `cart`.
    pub fn checkout(&self, cart: &ShoppingCart) -> CoreResult<Order> {
        self.build(cart.items())
    }

    fn price_line(&self, product: &Product, quantity: u32) -> CoreResult<OrderLine> {
        let overflow = || amount_overflow(product);
        let net_amount = product
            .unit_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(overflow)?;

        let sales_tax = self
            .tax_service
            .calculate_tax(product.sales_tax.calculator_name(), net_amount)?;
        let duty_tax = self
            .tax_service
            .calculate_tax(product.duty_tax.calculator_name(), net_amount)?;

        let tax_amount = sales_tax
            .checked_add(duty_tax)
            .ok_or_else(overflow)?
            .round_to_cents();
        let total_amount = net_amount.checked_add(tax_amount).ok_or_else(overflow)?;

        trace!(
            product = %product.name,
            quantity,
            net = %net_amount.amount(),
            sales = %sales_tax.amount(),
            duty = %duty_tax.amount(),
            tax = %tax_amount,
            "Line priced"
        );

        Ok(OrderLine {
            product: product.clone(),
            quantity,
            tax_amount,
            total_amount,
        })
    }
}

/// Groups products by name, keeping the order of first occurrence.
///
/// Each group is represented by its first item. Later items with the same
/// name only add to the quantity, even when their price or categories differ.
fn group_by_name(products: &[Product]) -> Vec<(&Product, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&Product, usize)> = Vec::new();

    for product in products {
        match index.entry(product.name.as_str()) {
            Entry::Occupied(slot) => {
                let (representative, count) = &mut groups[*slot.get()];
                if *representative != product {
                    debug!(
                        product = %product.name,
                        "Same name bought with different price or categories, first entry wins"
                    );
                }
                *count += 1;
            }
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push((product, 1));
            }
        }
    }

    groups
}

fn line_quantity(product: &Product, count: usize) -> CoreResult<u32> {
    u32::try_from(count).map_err(|_| amount_overflow(product))
}

fn amount_overflow(product: &Product) -> CoreError {
    CoreError::AmountOverflow {
        product: product.name.clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{standard_calculators, FlatRateCalculator, TaxCalculator};
    use crate::registry::CalculatorRegistry;
    use crate::types::{DutyTaxCategory, SalesTaxCategory, TaxRate};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn standard_builder() -> OrderBuilder {
        let registry = CalculatorRegistry::new(standard_calculators()).unwrap();
        OrderBuilder::new(TaxService::new(registry))
    }

    fn product(
        name: &str,
        price: Decimal,
        sales: SalesTaxCategory,
        duty: DutyTaxCategory,
    ) -> Product {
        Product::new(name, Money::new(price), sales, duty)
    }

    fn reference_cart() -> Vec<Product> {
        vec![
            product("imported CD", dec!(10.99), SalesTaxCategory::Default, DutyTaxCategory::Import),
            product("perfume", dec!(19.99), SalesTaxCategory::Default, DutyTaxCategory::Domestic),
            product("headache pills", dec!(4.65), SalesTaxCategory::Medical, DutyTaxCategory::Domestic),
            product("imported chocolates", dec!(16.45), SalesTaxCategory::Food, DutyTaxCategory::Import),
        ]
    }

    #[test]
    fn test_empty_input_gives_empty_order() {
        let order = standard_builder().build(&[]).unwrap();

        assert!(order.is_empty());
        assert!(order.total_tax().is_zero());
        assert!(order.total_price().is_zero());
    }

    #[test]
    fn test_single_line_rounding() {
        let order = standard_builder()
            .build(&[product("imported CD", dec!(10.99), SalesTaxCategory::Default, DutyTaxCategory::Import)])
            .unwrap();

        let line = &order.lines()[0];
        assert_eq!(line.quantity(), 1);
        assert_eq!(line.tax_amount().amount(), dec!(1.43));
        assert_eq!(line.total_amount().amount(), dec!(12.42));
        assert_eq!(line.net_amount().amount(), dec!(10.99));
    }

    #[test]
    fn test_reference_cart() {
        let order = standard_builder().build(&reference_cart()).unwrap();

        let taxes: Vec<_> = order.lines().iter().map(|l| l.tax_amount().amount()).collect();
        assert_eq!(taxes, [dec!(1.43), dec!(1.80), dec!(0.00), dec!(0.66)]);

        let totals: Vec<_> = order.lines().iter().map(|l| l.total_amount().amount()).collect();
        assert_eq!(totals, [dec!(12.42), dec!(21.79), dec!(4.65), dec!(17.11)]);

        assert_eq!(order.total_tax().amount(), dec!(3.89));
        assert_eq!(order.total_price().amount(), dec!(55.97));
    }

    #[test]
    fn test_grouping_is_stable() {
        let a = product("A", dec!(1.00), SalesTaxCategory::Book, DutyTaxCategory::Domestic);
        let b = product("B", dec!(2.00), SalesTaxCategory::Book, DutyTaxCategory::Domestic);

        let order = standard_builder().build(&[a.clone(), b, a]).unwrap();

        let lines: Vec<(&str, u32)> = order.lines().iter().map(|l| (l.name(), l.quantity())).collect();
        assert_eq!(lines, [("A", 2), ("B", 1)]);
        assert_eq!(order.line("A").unwrap().total_amount().amount(), dec!(2.00));
    }

    #[test]
    fn test_quantity_multiplies_before_tax() {
        let perfume = product("perfume", dec!(19.99), SalesTaxCategory::Default, DutyTaxCategory::Domestic);

        let order = standard_builder()
            .build(&[perfume.clone(), perfume.clone(), perfume])
            .unwrap();

        // 59.97 × 0.09 = 5.3973
        let line = &order.lines()[0];
        assert_eq!(line.quantity(), 3);
        assert_eq!(line.tax_amount().amount(), dec!(5.40));
        assert_eq!(line.total_amount().amount(), dec!(65.37));
    }

    #[test]
    fn test_first_item_wins_for_same_name() {
        let cheap = product("widget", dec!(1.00), SalesTaxCategory::Default, DutyTaxCategory::Domestic);
        let pricey = product("widget", dec!(5.00), SalesTaxCategory::Food, DutyTaxCategory::Import);

        let order = standard_builder().build(&[cheap, pricey]).unwrap();

        let line = &order.lines()[0];
        assert_eq!(order.lines().len(), 1);
        assert_eq!(line.quantity(), 2);
        assert_eq!(line.product().unit_price.amount(), dec!(1.00));
        assert_eq!(line.tax_amount().amount(), dec!(0.18));
        assert_eq!(line.total_amount().amount(), dec!(2.18));
    }

    #[test]
    fn test_rounds_sum_not_components() {
        let order = standard_builder()
            .build(&[product("sticker", dec!(0.05), SalesTaxCategory::Default, DutyTaxCategory::Import)])
            .unwrap();

        // 0.0045 + 0.002 = 0.0065 → 0.01
        assert_eq!(order.total_tax().amount(), dec!(0.01));
        assert_eq!(order.total_price().amount(), dec!(0.06));
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        let order = standard_builder()
            .build(&[product("eraser", dec!(0.50), SalesTaxCategory::Default, DutyTaxCategory::Domestic)])
            .unwrap();

        // 0.50 × 0.09 = 0.045 → 0.05
        assert_eq!(order.total_tax().amount(), dec!(0.05));

        let refund = standard_builder()
            .build(&[product("eraser", dec!(-0.50), SalesTaxCategory::Default, DutyTaxCategory::Domestic)])
            .unwrap();
        assert_eq!(refund.total_tax().amount(), dec!(-0.05));
        assert_eq!(refund.total_price().amount(), dec!(-0.55));
    }

    #[test]
    fn test_totals_are_sums_of_rounded_lines() {
        // Each line: 0.05 × 0.09 = 0.0045 → 0.00. The unrounded sum of three
        // lines would be 0.0135, which must not resurface as 0.01.
        let order = standard_builder()
            .build(&[
                product("a", dec!(0.05), SalesTaxCategory::Default, DutyTaxCategory::Domestic),
                product("b", dec!(0.05), SalesTaxCategory::Default, DutyTaxCategory::Domestic),
                product("c", dec!(0.05), SalesTaxCategory::Default, DutyTaxCategory::Domestic),
            ])
            .unwrap();

        assert!(order.total_tax().is_zero());
        assert_eq!(order.total_price().amount(), dec!(0.15));

        let tax: Money = order.lines().iter().map(OrderLine::tax_amount).sum();
        let price: Money = order.lines().iter().map(OrderLine::total_amount).sum();
        assert_eq!(order.total_tax(), tax);
        assert_eq!(order.total_price(), price);
    }

    #[test]
    fn test_build_is_idempotent() {
        let builder = standard_builder();
        let cart = reference_cart();

        let first = builder.build(&cart).unwrap();
        let second = builder.build(&cart).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_calculator_aborts_build() {
        let calculators: Vec<Box<dyn TaxCalculator>> = standard_calculators()
            .into_iter()
            .filter(|c| c.name() != "Import")
            .collect();
        let builder = OrderBuilder::new(TaxService::new(CalculatorRegistry::new(calculators).unwrap()));

        let err = builder.build(&reference_cart()).unwrap_err();
        assert_eq!(
            err,
            CoreError::CalculatorNotFound {
                name: "Import".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_range_amounts_fail_the_build() {
        let builder = standard_builder();
        let gold = product("gold bar", Decimal::MAX, SalesTaxCategory::Book, DutyTaxCategory::Domestic);

        // MAX × 2
        let err = builder.build(&[gold.clone(), gold.clone()]).unwrap_err();
        assert_eq!(
            err,
            CoreError::AmountOverflow {
                product: "gold bar".to_string()
            }
        );

        // MAX + 9% tax
        let taxed = product("taxed bar", Decimal::MAX, SalesTaxCategory::Default, DutyTaxCategory::Domestic);
        assert!(matches!(
            builder.build(&[taxed]),
            Err(CoreError::AmountOverflow { product }) if product == "taxed bar"
        ));

        // Each line fits, their sum does not
        let other = product("silver bar", Decimal::MAX, SalesTaxCategory::Book, DutyTaxCategory::Domestic);
        assert_eq!(builder.build(&[gold.clone()]).unwrap().total_price().amount(), Decimal::MAX);
        assert!(matches!(
            builder.build(&[gold, other]),
            Err(CoreError::AmountOverflow { product }) if product == "silver bar"
        ));
    }

    #[test]
    fn test_group_counts_convert_to_quantities() {
        let item = product("pen", dec!(1.00), SalesTaxCategory::Default, DutyTaxCategory::Domestic);

        let groups = group_by_name(std::slice::from_ref(&item));
        assert_eq!(groups, [(&item, 1)]);

        assert_eq!(line_quantity(&item, 3).unwrap(), 3);
        assert_eq!(line_quantity(&item, u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_group_count_beyond_u32_is_rejected() {
        let item = product("pen", dec!(1.00), SalesTaxCategory::Default, DutyTaxCategory::Domestic);

        assert_eq!(
            line_quantity(&item, u32::MAX as usize + 1).unwrap_err(),
            CoreError::AmountOverflow {
                product: "pen".to_string()
            }
        );
    }

    #[test]
    fn test_custom_calculator_set() {
        let calculators: Vec<Box<dyn TaxCalculator>> = vec![
            Box::new(FlatRateCalculator::new("Default", TaxRate::new(dec!(0.10)))),
            Box::new(FlatRateCalculator::new("Domestic", TaxRate::zero())),
        ];
        let builder = OrderBuilder::new(TaxService::new(CalculatorRegistry::new(calculators).unwrap()));

        let order = builder
            .build(&[product("perfume", dec!(19.99), SalesTaxCategory::Default, DutyTaxCategory::Domestic)])
            .unwrap();

        // 1.999 → 2.00
        assert_eq!(order.total_tax().amount(), dec!(2.00));
        assert_eq!(order.total_price().amount(), dec!(21.99));
    }

    #[test]
    fn test_checkout_uses_cart_items() {
        let mut cart = ShoppingCart::new();
        for item in reference_cart() {
            cart.buy(item);
        }
        cart.buy(product("perfume", dec!(19.99), SalesTaxCategory::Default, DutyTaxCategory::Domestic));
        cart.remove("perfume");

        let order = standard_builder().checkout(&cart).unwrap();
        assert_eq!(order.line("perfume").unwrap().quantity(), 1);
        assert_eq!(order.total_price().amount(), dec!(55.97));
    }

    #[test]
    fn test_order_serializes_amounts_as_strings() {
        let order = standard_builder().build(&reference_cart()).unwrap();
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["total_tax"], "3.89");
        assert_eq!(json["lines"][0]["quantity"], 1);
        assert_eq!(json["lines"][0]["product"]["name"], "imported CD");
    }
}

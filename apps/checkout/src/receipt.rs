//! Receipt rendering.
//!
//! ```text
//! 1 imported CD: 12.42
//! 1 perfume: 21.79
//! 1 headache pills: 4.65
//! 1 imported chocolates: 17.11
//! Sales Taxes: 3.89
//! Total: 55.97
//! ```
//!
//! Lines come out in the order the builder produced them. Every amount has
//! exactly two decimal places through `Money`'s `Display`.

use std::fmt;

use till_core::Order;

/// Text receipt for an order.
pub struct Receipt<'a> {
    order: &'a Order,
}

impl<'a> Receipt<'a> {
    pub fn new(order: &'a Order) -> Self {
        Receipt { order }
    }
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.order.lines() {
            writeln!(f, "{} {}: {}", line.quantity(), line.name(), line.total_amount())?;
        }
        writeln!(f, "Sales Taxes: {}", self.order.total_tax())?;
        writeln!(f, "Total: {}", self.order.total_price())
    }
}

/// JSON rendering of an order.
pub fn to_json(order: &Order) -> serde_json::Result<String> {
    serde_json::to_string_pretty(order)
}

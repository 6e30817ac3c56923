//! JSON cart files.
//!
//! ## Format
//! ```json
//! [
//!   { "name": "imported CD", "unit_price": "10.99", "sales_tax": "default", "duty_tax": "import" },
//!   { "name": "book", "unit_price": "12.49", "sales_tax": "book", "duty_tax": "domestic", "quantity": 2 }
//! ]
//! ```
//!
//! `quantity` defaults to 1. An entry with quantity `n` is bought `n` times,
//! so the cart holds one item per unit just as if each had been scanned.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use till_core::{DutyTaxCategory, Money, Product, SalesTaxCategory, ShoppingCart};
use tracing::debug;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct CartEntry {
    #[serde(flatten)]
    product: Product,

    #[serde(default = "default_quantity")]
    quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Parses cart JSON.
pub fn parse_cart(json: &str) -> Result<ShoppingCart, serde_json::Error> {
    let entries: Vec<CartEntry> = serde_json::from_str(json)?;

    let mut cart = ShoppingCart::new();
    for entry in entries {
        for _ in 0..entry.quantity {
            cart.buy(entry.product.clone());
        }
    }
    Ok(cart)
}

/// Reads and parses a cart file.
pub fn load_cart(path: &Path) -> AppResult<ShoppingCart> {
    let json = std::fs::read_to_string(path).map_err(|source| AppError::CartRead {
        path: path.to_path_buf(),
        source,
    })?;
    let cart = parse_cart(&json).map_err(|source| AppError::CartParse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(?path, items = cart.len(), "Cart loaded");
    Ok(cart)
}

/// The demo cart checked out when no cart file is given.
pub fn reference_cart() -> ShoppingCart {
    [
        ("imported CD", Decimal::new(1099, 2), SalesTaxCategory::Default, DutyTaxCategory::Import),
        ("perfume", Decimal::new(1999, 2), SalesTaxCategory::Default, DutyTaxCategory::Domestic),
        ("headache pills", Decimal::new(465, 2), SalesTaxCategory::Medical, DutyTaxCategory::Domestic),
        ("imported chocolates", Decimal::new(1645, 2), SalesTaxCategory::Food, DutyTaxCategory::Import),
    ]
    .into_iter()
    .map(|(name, price, sales, duty)| Product::new(name, Money::new(price), sales, duty))
    .collect()
}

//! # Shopping Cart
//!
//! Ordered multiset of purchased products.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Action              Method              Cart Change                    │
//! │  ──────              ──────              ───────────                    │
//! │                                                                         │
//! │  Scan product ──────► buy(p) ──────────► items.push(p)                  │
//! │                                                                         │
//! │  Take one back ─────► remove(name) ────► drop LAST item with that name  │
//! │                                                                         │
//! │  Start over ────────► clear() ─────────► items.clear()                  │
//! │                                                                         │
//! │  Pay ───────────────► OrderBuilder::checkout(&cart)  (read only)        │
//! │                                                                         │
//! │  NOTE: one entry per unit. Buying the same product twice stores it      │
//! │        twice; grouping into quantities happens at checkout.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// The products a customer is about to pay for, in purchase order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingCart {
    items: Vec<Product>,
}

impl ShoppingCart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        ShoppingCart { items: Vec::new() }
    }

    /// Adds one unit of a product.
    pub fn buy(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Removes the most recently bought unit named `name`.
    ///
    /// Returns the removed product, or `None` if nothing by that name is in
    /// the cart. Earlier units with the same name stay where they are, so the
    /// order lines built afterwards keep their position.
    pub fn remove(&mut self, name: &str) -> Option<Product> {
        let index = self.items.iter().rposition(|item| item.name == name)?;
        Some(self.items.remove(index))
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in purchase order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Number of units in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units bought under `name`.
    pub fn quantity_of(&self, name: &str) -> usize {
        self.items.iter().filter(|item| item.name == name).count()
    }
}

impl FromIterator<Product> for ShoppingCart {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        ShoppingCart {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Product> for ShoppingCart {
    fn extend<I: IntoIterator<Item = Product>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

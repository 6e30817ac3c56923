//! # till-core: Pure Checkout Logic for Till
//!
//! This crate is the **heart** of Till. It prices a shopping cart: every
//! product carries a sales tax category and a duty category, and checkout
//! turns the cart into a tax-inclusive order.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/checkout (till-checkout)                   │   │
//! │  │   config ──► composition root ──► checkout ──► receipt          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Vec<Box<dyn TaxCalculator>>            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌────────────┐  ┌───────────┐  ┌──────────┐  │   │
//! │  │   │ calculator │─►│  registry  │─►│  service  │─►│  order   │  │   │
//! │  │   │ FlatRate   │  │ name → calc│  │ TaxService│  │ Builder  │  │   │
//! │  │   └────────────┘  └────────────┘  └───────────┘  └──────────┘  │   │
//! │  │   ┌────────────┐  ┌────────────┐  ┌───────────┐                │   │
//! │  │   │   types    │  │   money    │  │   cart    │                │   │
//! │  │   │  Product   │  │   Money    │  │ Shopping  │                │   │
//! │  │   │ categories │  │  TaxRate   │  │   Cart    │                │   │
//! │  │   └────────────┘  └────────────┘  └───────────┘                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, tax categories, TaxRate
//! - [`money`] - Exact decimal Money with explicit cent rounding
//! - [`calculator`] - The `TaxCalculator` contract and built-in rates
//! - [`registry`] - Name → calculator lookup
//! - [`service`] - `TaxService` facade
//! - [`order`] - `OrderBuilder`, `Order`, `OrderLine`
//! - [`cart`] - `ShoppingCart`
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same cart and calculators = same order
//! 2. **No I/O**: config files and printing live in the app crate
//! 3. **Decimal Money**: no floating point anywhere in a tax computation
//! 4. **Explicit Wiring**: the tax service is passed in, never looked up
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use till_core::{
//!     standard_calculators, CalculatorRegistry, DutyTaxCategory, Money, OrderBuilder, Product,
//!     SalesTaxCategory, ShoppingCart, TaxService,
//! };
//!
//! let registry = CalculatorRegistry::new(standard_calculators()).unwrap();
//! let builder = OrderBuilder::new(TaxService::new(registry));
//!
//! let mut cart = ShoppingCart::new();
//! cart.buy(Product::new("perfume", Money::new(dec!(19.99)), SalesTaxCategory::Default, DutyTaxCategory::Domestic));
//! cart.buy(Product::new("headache pills", Money::new(dec!(4.65)), SalesTaxCategory::Medical, DutyTaxCategory::Domestic));
//!
//! let order = builder.checkout(&cart).unwrap();
//! assert_eq!(order.total_tax().to_string(), "1.80");
//! assert_eq!(order.total_price().to_string(), "26.44");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod cart;
pub mod error;
pub mod money;
pub mod order;
pub mod registry;
pub mod service;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use till_core::Money` instead of
// `use till_core::money::Money`

pub use calculator::{standard_calculators, FlatRateCalculator, TaxCalculator, STANDARD_RATES};
pub use cart::ShoppingCart;
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use order::{Order, OrderBuilder, OrderLine};
pub use registry::CalculatorRegistry;
pub use service::TaxService;
pub use types::*;

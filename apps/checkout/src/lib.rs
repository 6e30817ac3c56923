//! # till-checkout
//!
//! Checkout binary around `till-core`.
//!
//! ## Run Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  argv ──► cli::Command                                                  │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  CheckoutConfig::load (defaults → checkout.toml → TILL_* env)          │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  logging::init (RUST_LOG or logging.level, to stderr)                  │
//! │  CheckoutConfig::log_summary (source file, env overrides)              │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  compose::order_builder ── built-in rates + [rates] overrides          │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  cart_file::load_cart / reference_cart ──► OrderBuilder::checkout      │
//! │             │                                                           │
//! │             ▼                                                           │
//! │  receipt (text or JSON) ──► stdout                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart_file;
pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod logging;
pub mod receipt;

use tracing::info;

use crate::cli::Args;
use crate::config::CheckoutConfig;
use crate::error::AppResult;
use crate::receipt::Receipt;

/// Prices the requested cart and returns the rendered receipt.
pub fn run(args: &Args, config: &CheckoutConfig) -> AppResult<String> {
    let builder = compose::order_builder(config)?;

    let cart = match &args.cart {
        Some(path) => cart_file::load_cart(path)?,
        None => {
            info!("No cart file given, checking out the demo cart");
            cart_file::reference_cart()
        }
    };

    let order = builder.checkout(&cart)?;
    info!(
        lines = order.lines().len(),
        total_tax = %order.total_tax(),
        total_price = %order.total_price(),
        "Checkout complete"
    );

    if args.json || config.receipt.json {
        Ok(receipt::to_json(&order)?)
    } else {
        Ok(Receipt::new(&order).to_string())
    }
}

//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  └── CoreError                                                         │
//! │      ├── CalculatorNotFound   (raised by resolve / checkout)           │
//! │      ├── DuplicateCalculator  (raised by registry construction)        │
//! │      └── AmountOverflow       (raised by checkout)                     │
//! │                                                                         │
//! │  till-checkout errors (app crate)                                      │
//! │  ├── ConfigError      - Bad checkout.toml / env values                 │
//! │  └── AppError         - What main reports                              │
//! │                                                                         │
//! │  Flow: CoreError → AppError → anyhow (main) → stderr + exit code       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the calculator name)
//! 3. Errors are enum variants, never String
//! 4. Nothing here is retryable

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the tax engine.
///
/// Any of these aborts a checkout; no partial order is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No registered calculator carries the requested name.
    ///
    /// ## When This Occurs
    /// ```text
    /// Product { duty_tax: Import }
    ///      │
    ///      ▼
    /// TaxService::calculate_tax("Import", net)
    ///      │
    ///      ▼
    /// registry has no "Import" entry
    ///      │
    ///      ▼
    /// CalculatorNotFound { name: "Import" }
    /// ```
    ///
    /// Matching is exact and case-sensitive: `"import"` does not find
    /// `"Import"`.
    #[error("Calculator was not found: {name}")]
    CalculatorNotFound { name: String },

    /// Two calculators were registered under the same name.
    ///
    /// Resolution would be ambiguous, so the registry refuses to build
    /// instead of silently keeping one of them.
    #[error("Calculator registered more than once: {name}")]
    DuplicateCalculator { name: String },

    /// Pricing a line left the range of [`Decimal`](rust_decimal::Decimal).
    ///
    /// `product` names the line whose quantity, net amount, tax or total
    /// could not be represented, or whose total pushed the order sums out of
    /// range.
    #[error("Amount out of range while pricing: {product}")]
    AmountOverflow { product: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

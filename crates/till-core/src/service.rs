//! # Tax Service
//!
//! Facade over the registry: name in, tax amount out.
//!
//! The service knows nothing about sales versus duty tax. Callers pass the
//! calculator name of whichever category they hold, and an unknown name comes
//! back as [`CoreError::CalculatorNotFound`](crate::error::CoreError) exactly
//! as the registry reported it.

use std::sync::Arc;

use tracing::{trace, warn};

use crate::error::CoreResult;
use crate::money::Money;
use crate::registry::CalculatorRegistry;

/// Applies the calculator registered for a category name.
///
/// Cloning is cheap: clones share one registry.
#[derive(Debug, Clone)]
pub struct TaxService {
    registry: Arc<CalculatorRegistry>,
}

impl TaxService {
    /// Creates a service over a registry.
    pub fn new(registry: CalculatorRegistry) -> Self {
        TaxService {
            registry: Arc::new(registry),
        }
    }

    /// Creates a service over a registry that is already shared.
    pub fn from_shared(registry: Arc<CalculatorRegistry>) -> Self {
        TaxService { registry }
    }

    /// Returns the registry backing this service.
    pub fn registry(&self) -> &CalculatorRegistry {
        &self.registry
    }

    /// Computes the unrounded tax on `net_amount` for `category_name`.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use till_core::calculator::standard_calculators;
    /// use till_core::money::Money;
    /// use till_core::registry::CalculatorRegistry;
    /// use till_core::service::TaxService;
    ///
    /// let service = TaxService::new(CalculatorRegistry::new(standard_calculators()).unwrap());
    /// let tax = service.calculate_tax("Default", Money::new(dec!(19.99))).unwrap();
    /// assert_eq!(tax.amount(), dec!(1.7991));
    /// ```
    pub fn calculate_tax(&self, category_name: &str, net_amount: Money) -> CoreResult<Money> {
        let calculator = self.registry.resolve(category_name).map_err(|err| {
            warn!(category = category_name, error = %err, "No calculator for tax category");
            err
        })?;

        let tax = calculator.calculate(net_amount);
        trace!(category = category_name, net = %net_amount.amount(), tax = %tax.amount(), "Tax calculated");
        Ok(tax)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

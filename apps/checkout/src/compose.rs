//! Composition root: decides which calculators exist and wires the engine.
//!
//! The built-in rate table is the starting point. Each `[rates]` entry in the
//! config replaces the built-in calculator with the same name or, for a name
//! the table does not know, registers an additional one.

use tracing::info;

use till_core::{
    CalculatorRegistry, CoreResult, FlatRateCalculator, OrderBuilder, TaxCalculator, TaxService,
    STANDARD_RATES,
};

use crate::config::CheckoutConfig;

/// Assembles the calculator set described by `config`.
pub fn calculators(config: &CheckoutConfig) -> Vec<Box<dyn TaxCalculator>> {
    let mut calculators: Vec<Box<dyn TaxCalculator>> = Vec::with_capacity(STANDARD_RATES.len());

    for (name, built_in) in STANDARD_RATES {
        let rate = match config.rates.get(name) {
            Some(&configured) => {
                info!(calculator = name, rate = %configured.fraction(), "Overriding built-in rate");
                configured
            }
            None => built_in,
        };
        calculators.push(Box::new(FlatRateCalculator::new(name, rate)));
    }

    for (name, &rate) in &config.rates {
        if STANDARD_RATES.iter().any(|(built_in, _)| built_in == name) {
            continue;
        }
        info!(calculator = %name, rate = %rate.fraction(), "Registering extra calculator");
        calculators.push(Box::new(FlatRateCalculator::new(name.clone(), rate)));
    }

    calculators
}

/// Builds a ready-to-use order builder for `config`.
pub fn order_builder(config: &CheckoutConfig) -> CoreResult<OrderBuilder> {
    let registry = CalculatorRegistry::new(calculators(config))?;
    info!(calculators = ?registry.names(), "Tax engine ready");
    Ok(OrderBuilder::new(TaxService::new(registry)))
}

//! # Calculator Registry
//!
//! Resolves a tax category name to the calculator registered under it.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Calculator Resolution                             │
//! │                                                                         │
//! │  composition root                                                       │
//! │  (hand-wired, config-driven, ...)                                      │
//! │       │  Vec<Box<dyn TaxCalculator>>                                    │
//! │       ▼                                                                 │
//! │  CalculatorRegistry::new ── duplicate name? ──► DuplicateCalculator    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HashMap<name, calculator>   (read-only from here on)                  │
//! │       │                                                                 │
//! │  resolve("Import") ── exact match ──► &dyn TaxCalculator               │
//! │       │                                                                 │
//! │       └── no match ──► CalculatorNotFound { name: "Import" }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Calculators are `Send + Sync` and the map is never mutated after
//! construction, so one registry can serve concurrent checkouts behind an
//! `Arc` without locking.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

use crate::calculator::TaxCalculator;
use crate::error::{CoreError, CoreResult};

/// The set of calculators available to a checkout, keyed by name.
pub struct CalculatorRegistry {
    calculators: HashMap<String, Box<dyn TaxCalculator>>,
}

impl CalculatorRegistry {
    /// Builds a registry from a pre-assembled set of calculators.
    ///
    /// ## Errors
    /// [`CoreError::DuplicateCalculator`] if two calculators share a name.
    /// Names are compared exactly, so `"Food"` and `"food"` are distinct.
    pub fn new<I>(calculators: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = Box<dyn TaxCalculator>>,
    {
        let mut map: HashMap<String, Box<dyn TaxCalculator>> = HashMap::new();

        for calculator in calculators {
            match map.entry(calculator.name().to_string()) {
                Entry::Occupied(slot) => {
                    return Err(CoreError::DuplicateCalculator {
                        name: slot.key().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    trace!(name = %slot.key(), "Registering tax calculator");
                    slot.insert(calculator);
                }
            }
        }

        debug!(count = map.len(), "Calculator registry built");
        Ok(CalculatorRegistry { calculators: map })
    }

    /// Returns the calculator registered under `name`.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use till_core::calculator::standard_calculators;
    /// use till_core::error::CoreError;
    /// use till_core::money::Money;
    /// use till_core::registry::CalculatorRegistry;
    ///
    /// let registry = CalculatorRegistry::new(standard_calculators()).unwrap();
    ///
    /// let import = registry.resolve("Import").unwrap();
    /// assert_eq!(import.calculate(Money::new(dec!(10))).amount(), dec!(0.40));
    ///
    /// let err = registry.resolve("import").unwrap_err();
    /// assert_eq!(err, CoreError::CalculatorNotFound { name: "import".into() });
    /// ```
    pub fn resolve(&self, name: &str) -> CoreResult<&dyn TaxCalculator> {
        self.calculators
            .get(name)
            .map(|calculator| calculator.as_ref())
            .ok_or_else(|| CoreError::CalculatorNotFound {
                name: name.to_string(),
            })
    }

    /// Checks whether a calculator is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.calculators.contains_key(name)
    }

    /// Number of registered calculators.
    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    /// Checks if no calculators are registered.
    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.calculators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for CalculatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorRegistry")
            .field("calculators", &self.names())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

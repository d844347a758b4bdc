//! Pricing Rules

use thiserror::Error;

use crate::prices::{Price, PriceError};

pub mod strategies;

pub use strategies::PricingStrategy;

/// Errors raised when applying a pricing rule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// The rule was applied to a product it does not govern.
    #[error("rule for {expected} applied to product {found}")]
    InvalidProduct {
        /// Code the rule was built for
        expected: String,

        /// Code it was applied to
        found: String,
    },

    /// The rule was applied to fewer than one unit.
    #[error("invalid quantity {0}; rules apply to one or more units")]
    InvalidQuantity(usize),

    /// Wrapped price arithmetic error.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Binds a pricing strategy to a single product code.
#[derive(Debug, Clone)]
pub struct PricingRule {
    product_code: String,
    strategy: PricingStrategy,
}

impl PricingRule {
    /// Create a rule for the given product code.
    pub fn new(product_code: impl Into<String>, strategy: PricingStrategy) -> Self {
        PricingRule {
            product_code: product_code.into(),
            strategy,
        }
    }

    /// Create a rule from a pricing function.
    pub fn custom(
        product_code: impl Into<String>,
        f: impl Fn(usize, Price) -> Result<Price, PriceError> + Send + Sync + 'static,
    ) -> Self {
        Self::new(product_code, PricingStrategy::custom(f))
    }

    /// Code of the product this rule governs.
    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    /// The pricing strategy.
    pub fn strategy(&self) -> &PricingStrategy {
        &self.strategy
    }

    /// Calculate the subtotal for `quantity` units of `product_code`.
    ///
    /// # Errors
    ///
    /// - [`RuleError::InvalidProduct`]: `product_code` is not this rule's code.
    /// - [`RuleError::InvalidQuantity`]: `quantity` is zero.
    /// - [`RuleError::Price`]: the strategy's arithmetic failed.
    pub fn apply(
        &self,
        product_code: &str,
        quantity: usize,
        unit_price: Price,
    ) -> Result<Price, RuleError> {
        if product_code != self.product_code {
            return Err(RuleError::InvalidProduct {
                expected: self.product_code.clone(),
                found: product_code.to_string(),
            });
        }

        if quantity < 1 {
            return Err(RuleError::InvalidQuantity(quantity));
        }

        Ok(self.strategy.subtotal(quantity, unit_price)?)
    }
}

//! Checkout

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    prices::{Price, PriceError},
    products::{Product, ProductError},
    rules::{PricingRule, RuleError},
};

pub mod summary;

pub use summary::{BasketSummary, SummaryLine};

/// Errors raised while scanning or totalling a basket.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The scanned product was rejected; the basket is unchanged.
    #[error("invalid product: {0}")]
    InvalidArgument(#[from] ProductError),

    /// The scanned product's price differs from an earlier scan of the same code.
    #[error("product {code} scanned at {found}, but already in basket at {expected}")]
    PriceMismatch {
        /// Product code
        code: String,

        /// Price already in the basket
        expected: Price,

        /// Price of the rejected scan
        found: Price,
    },

    /// A pricing rule could not be applied.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Wrapped price arithmetic error.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Accumulates scanned products and prices them against a rule set.
///
/// Only the first rule for a product code is used; later rules for the
/// same code are ignored. A `Checkout` is not synchronised, so share one
/// between threads only behind a lock. Rules may be shared freely.
#[derive(Debug)]
pub struct Checkout<'a> {
    rules: &'a [PricingRule],
    rules_by_code: FxHashMap<&'a str, &'a PricingRule>,
    prices_by_code: FxHashMap<&'a str, Price>,
    basket: Vec<&'a Product>,
}

impl<'a> Checkout<'a> {
    /// Create an empty checkout using the given pricing rules.
    pub fn new(rules: &'a [PricingRule]) -> Self {
        let mut rules_by_code: FxHashMap<&'a str, &'a PricingRule> = FxHashMap::default();

        for rule in rules {
            let code = rule.product_code();

            if rules_by_code.contains_key(code) {
                warn!(product_code = code, "ignoring duplicate pricing rule");
                continue;
            }

            rules_by_code.insert(code, rule);
        }

        Checkout {
            rules,
            rules_by_code,
            prices_by_code: FxHashMap::default(),
            basket: Vec::new(),
        }
    }

    /// Add a product to the basket.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidArgument`]: the product has an empty code or a
    ///   negative price.
    /// - [`CheckoutError::PriceMismatch`]: a product with the same code but a
    ///   different price is already in the basket.
    pub fn scan(&mut self, product: &'a Product) -> Result<(), CheckoutError> {
        product.validate()?;

        if let Some(&expected) = self.prices_by_code.get(product.code())
            && expected != product.price()
        {
            return Err(CheckoutError::PriceMismatch {
                code: product.code().to_string(),
                expected,
                found: product.price(),
            });
        }

        self.prices_by_code
            .entry(product.code())
            .or_insert(product.price());
        self.basket.push(product);

        trace!(
            product_code = product.code(),
            basket_len = self.basket.len(),
            "scanned product"
        );

        Ok(())
    }

    /// Calculate the basket total, rounded to two decimal places.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Rule`]: a pricing rule failed.
    /// - [`CheckoutError::Price`]: summing the subtotals overflowed.
    pub fn total(&self) -> Result<Price, CheckoutError> {
        if self.basket.is_empty() {
            return Ok(Price::zero());
        }

        let summary = self.summary();

        let total = summary.iter().try_fold(Price::zero(), |acc, line| {
            let subtotal = self.subtotal(line)?;

            Ok::<_, CheckoutError>(acc.checked_add(subtotal)?)
        })?;

        let rounded = total.rounded();

        debug!(
            items = self.basket.len(),
            lines = summary.len(),
            %total,
            %rounded,
            "calculated basket total"
        );

        Ok(rounded)
    }

    /// Group the basket by product code.
    pub fn summary(&self) -> BasketSummary<'a> {
        BasketSummary::from_products(self.basket.iter().copied())
    }

    /// Rule governing a product code, if any.
    pub fn rule_for(&self, product_code: &str) -> Option<&'a PricingRule> {
        self.rules_by_code.get(product_code).copied()
    }

    /// The configured rules, in the order given.
    pub fn rules(&self) -> &'a [PricingRule] {
        self.rules
    }

    /// Iterate over scanned products in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Product> + '_ {
        self.basket.iter().copied()
    }

    /// Number of scanned products.
    pub fn len(&self) -> usize {
        self.basket.len()
    }

    /// Check if nothing has been scanned.
    pub fn is_empty(&self) -> bool {
        self.basket.is_empty()
    }

    fn subtotal(&self, line: &SummaryLine<'_>) -> Result<Price, CheckoutError> {
        match self.rule_for(line.code()) {
            Some(rule) => {
                trace!(
                    product_code = line.code(),
                    quantity = line.quantity(),
                    strategy = ?rule.strategy(),
                    "applying pricing rule"
                );

                Ok(rule.apply(line.code(), line.quantity(), line.unit_price())?)
            }
            None => Ok(line.unit_price().checked_mul_quantity(line.quantity())?),
        }
    }
}

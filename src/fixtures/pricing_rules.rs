//! Pricing Rule Fixtures

use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    prices::Price,
    rules::{PricingRule, PricingStrategy},
};

/// Wrapper for pricing rules in YAML
#[derive(Debug, Deserialize)]
pub struct PricingRulesFixture {
    /// Rules in priority order
    pub pricing_rules: Vec<PricingRuleFixture>,
}

/// Pricing rule fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricingRuleFixture {
    /// Unit price times quantity
    Flat {
        /// Product code
        product: String,
    },

    /// Buy some, get some free
    BuyGetFree {
        /// Product code
        product: String,

        /// Units charged per group
        buy: usize,

        /// Units free per group
        free: usize,
    },

    /// Fixed per-unit price from a threshold
    BulkPrice {
        /// Product code
        product: String,

        /// Minimum quantity
        threshold: usize,

        /// Per-unit price (e.g., "4.50")
        price: String,
    },

    /// Fraction of the unit price from a threshold
    BulkRatio {
        /// Product code
        product: String,

        /// Minimum quantity
        threshold: usize,

        /// Ratio numerator
        numerator: u32,

        /// Ratio denominator
        denominator: u32,
    },
}

impl TryFrom<PricingRuleFixture> for PricingRule {
    type Error = FixtureError;

    fn try_from(fixture: PricingRuleFixture) -> Result<Self, Self::Error> {
        let rule = match fixture {
            PricingRuleFixture::Flat { product } => {
                PricingRule::new(product, PricingStrategy::Flat)
            }
            PricingRuleFixture::BuyGetFree { product, buy, free } => {
                if buy == 0 {
                    return Err(FixtureError::InvalidPricingRule(format!(
                        "{product}: buy must be at least 1"
                    )));
                }

                PricingRule::new(product, PricingStrategy::BuyGetFree { buy, free })
            }
            PricingRuleFixture::BulkPrice {
                product,
                threshold,
                price,
            } => {
                let unit_price = price
                    .parse::<Price>()
                    .map_err(|_err| FixtureError::InvalidPrice(price.clone()))?;

                PricingRule::new(
                    product,
                    PricingStrategy::BulkPrice {
                        threshold,
                        unit_price,
                    },
                )
            }
            PricingRuleFixture::BulkRatio {
                product,
                threshold,
                numerator,
                denominator,
            } => {
                if denominator == 0 {
                    return Err(FixtureError::InvalidPricingRule(format!(
                        "{product}: denominator must not be zero"
                    )));
                }

                PricingRule::new(
                    product,
                    PricingStrategy::BulkRatio {
                        threshold,
                        numerator,
                        denominator,
                    },
                )
            }
        };

        Ok(rule)
    }
}

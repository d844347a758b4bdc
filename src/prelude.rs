//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    checkout::{BasketSummary, Checkout, CheckoutError, SummaryLine},
    fixtures::{Fixture, FixtureError},
    prices::{Price, PriceError},
    products::{Product, ProductError},
    rules::{PricingRule, PricingStrategy, RuleError, strategies::CustomPricing},
};

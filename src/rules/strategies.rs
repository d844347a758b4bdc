//! Pricing Strategies

use std::{fmt, sync::Arc};

use crate::prices::{Price, PriceError};

/// Caller-supplied pricing function: `(quantity, unit_price) -> subtotal`.
pub type CustomPricing = Arc<dyn Fn(usize, Price) -> Result<Price, PriceError> + Send + Sync>;

/// The shape of a pricing rule.
#[derive(Clone)]
pub enum PricingStrategy {
    /// Every unit at the product price.
    Flat,

    /// Of every `buy + free` units only `buy` are charged.
    BuyGetFree {
        /// Units charged per group
        buy: usize,

        /// Units given away per group
        free: usize,
    },

    /// From `threshold` units upwards every unit costs `unit_price`.
    BulkPrice {
        /// Minimum quantity for the bulk price
        threshold: usize,

        /// Per-unit price once the threshold is met
        unit_price: Price,
    },

    /// From `threshold` units upwards every unit costs
    /// `numerator / denominator` of the product price.
    BulkRatio {
        /// Minimum quantity for the reduced price
        threshold: usize,

        /// Ratio numerator
        numerator: u32,

        /// Ratio denominator
        denominator: u32,
    },

    /// Arbitrary pricing function.
    Custom(CustomPricing),
}

impl PricingStrategy {
    /// Buy one, get one free.
    pub fn buy_one_get_one_free() -> Self {
        PricingStrategy::BuyGetFree { buy: 1, free: 1 }
    }

    /// Wraps a pricing function.
    pub fn custom(
        f: impl Fn(usize, Price) -> Result<Price, PriceError> + Send + Sync + 'static,
    ) -> Self {
        PricingStrategy::Custom(Arc::new(f))
    }

    /// Calculates the subtotal for `quantity` units at `unit_price`.
    ///
    /// The result is not rounded.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the arithmetic overflows or a ratio has a
    /// zero denominator.
    pub fn subtotal(&self, quantity: usize, unit_price: Price) -> Result<Price, PriceError> {
        match self {
            PricingStrategy::Flat => unit_price.checked_mul_quantity(quantity),
            PricingStrategy::BuyGetFree { buy, free } => {
                unit_price.checked_mul_quantity(chargeable_units(quantity, *buy, *free))
            }
            PricingStrategy::BulkPrice {
                threshold,
                unit_price: bulk_price,
            } => {
                if quantity >= *threshold {
                    bulk_price.checked_mul_quantity(quantity)
                } else {
                    unit_price.checked_mul_quantity(quantity)
                }
            }
            PricingStrategy::BulkRatio {
                threshold,
                numerator,
                denominator,
            } => {
                if quantity >= *threshold {
                    unit_price
                        .checked_ratio(*numerator, *denominator)?
                        .checked_mul_quantity(quantity)
                } else {
                    unit_price.checked_mul_quantity(quantity)
                }
            }
            PricingStrategy::Custom(f) => f(quantity, unit_price),
        }
    }
}

/// Number of units charged under buy-`buy`-get-`free`.
fn chargeable_units(quantity: usize, buy: usize, free: usize) -> usize {
    let Some(group) = buy.checked_add(free).filter(|group| *group > 0) else {
        return quantity;
    };

    (quantity / group) * buy + (quantity % group).min(buy)
}

impl fmt::Debug for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingStrategy::Flat => f.write_str("Flat"),
            PricingStrategy::BuyGetFree { buy, free } => f
                .debug_struct("BuyGetFree")
                .field("buy", buy)
                .field("free", free)
                .finish(),
            PricingStrategy::BulkPrice {
                threshold,
                unit_price,
            } => f
                .debug_struct("BulkPrice")
                .field("threshold", threshold)
                .field("unit_price", unit_price)
                .finish(),
            PricingStrategy::BulkRatio {
                threshold,
                numerator,
                denominator,
            } => f
                .debug_struct("BulkRatio")
                .field("threshold", threshold)
                .field("numerator", numerator)
                .field("denominator", denominator)
                .finish(),
            PricingStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const GREEN_TEA: i64 = 311;
    const COFFEE: i64 = 1123;

    #[test]
    fn flat_multiplies_quantity() -> TestResult {
        let subtotal = PricingStrategy::Flat.subtotal(3, Price::from_minor(GREEN_TEA))?;

        assert_eq!(subtotal, Price::from_minor(933));

        Ok(())
    }

    #[test]
    fn buy_one_get_one_free_charges_half_rounded_up() -> TestResult {
        let strategy = PricingStrategy::buy_one_get_one_free();
        let price = Price::from_minor(GREEN_TEA);

        assert_eq!(strategy.subtotal(1, price)?, Price::from_minor(311));
        assert_eq!(strategy.subtotal(2, price)?, Price::from_minor(311));
        assert_eq!(strategy.subtotal(3, price)?, Price::from_minor(622));
        assert_eq!(strategy.subtotal(4, price)?, Price::from_minor(622));

        Ok(())
    }

    #[test]
    fn three_for_two_charges_two_of_every_three() -> TestResult {
        let strategy = PricingStrategy::BuyGetFree { buy: 2, free: 1 };
        let price = Price::from_minor(100);

        assert_eq!(strategy.subtotal(2, price)?, Price::from_minor(200));
        assert_eq!(strategy.subtotal(3, price)?, Price::from_minor(200));
        assert_eq!(strategy.subtotal(5, price)?, Price::from_minor(400));
        assert_eq!(strategy.subtotal(7, price)?, Price::from_minor(500));

        Ok(())
    }

    #[test]
    fn empty_buy_get_free_group_prices_flat() -> TestResult {
        let strategy = PricingStrategy::BuyGetFree { buy: 0, free: 0 };

        assert_eq!(
            strategy.subtotal(3, Price::from_minor(100))?,
            Price::from_minor(300)
        );

        Ok(())
    }

    #[test]
    fn bulk_price_applies_from_threshold() -> TestResult {
        let strategy = PricingStrategy::BulkPrice {
            threshold: 3,
            unit_price: Price::from_minor(450),
        };
        let price = Price::from_minor(500);

        assert_eq!(strategy.subtotal(2, price)?, Price::from_minor(1000));
        assert_eq!(strategy.subtotal(3, price)?, Price::from_minor(1350));

        Ok(())
    }

    #[test]
    fn bulk_ratio_keeps_precision_until_rounded() -> TestResult {
        let strategy = PricingStrategy::BulkRatio {
            threshold: 3,
            numerator: 2,
            denominator: 3,
        };
        let price = Price::from_minor(COFFEE);

        assert_eq!(strategy.subtotal(2, price)?, Price::from_minor(2246));
        assert_eq!(
            strategy.subtotal(3, price)?.rounded(),
            Price::from_minor(2246)
        );

        Ok(())
    }

    #[test]
    fn bulk_ratio_with_zero_denominator_fails_at_threshold() {
        let strategy = PricingStrategy::BulkRatio {
            threshold: 1,
            numerator: 1,
            denominator: 0,
        };

        let result = strategy.subtotal(1, Price::from_minor(100));

        assert_eq!(result, Err(PriceError::DivisionByZero));
    }

    #[test]
    fn custom_strategy_is_called_with_quantity_and_price() -> TestResult {
        let strategy = PricingStrategy::custom(|quantity, unit_price| {
            if quantity > 1 {
                Ok(Price::from_minor(199))
            } else {
                Ok(unit_price)
            }
        });

        assert_eq!(
            strategy.subtotal(1, Price::from_minor(150))?,
            Price::from_minor(150)
        );
        assert_eq!(
            strategy.subtotal(4, Price::from_minor(150))?,
            Price::from_minor(199)
        );

        Ok(())
    }

    #[test]
    fn custom_strategy_errors_are_returned() {
        let strategy = PricingStrategy::custom(|quantity, unit_price| {
            unit_price.checked_mul_quantity(quantity)
        });

        let result = strategy.subtotal(2, Price::new(rust_decimal::Decimal::MAX));

        assert_eq!(result, Err(PriceError::Overflow));
    }

    #[test]
    fn debug_hides_custom_function() {
        let custom = format!("{:?}", PricingStrategy::custom(|_, price| Ok(price)));
        let bulk = format!("{:?}", PricingStrategy::buy_one_get_one_free());

        assert_eq!(custom, "Custom(..)");
        assert!(bulk.contains("BuyGetFree"));
    }
}

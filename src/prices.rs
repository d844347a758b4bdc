//! Prices

use std::{fmt, ops::Deref, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Number of decimal places a rounded price carries.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Errors raised by price arithmetic and conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The result does not fit in a decimal.
    #[error("price arithmetic overflowed")]
    Overflow,

    /// A ratio was configured with a zero denominator.
    #[error("price ratio has a zero denominator")]
    DivisionByZero,

    /// The price could not be expressed in minor units.
    #[error("price {0} cannot be expressed in minor units")]
    MinorUnits(Price),

    /// The target currency does not use two decimal places.
    #[error("currency {0} does not use {PRICE_DECIMAL_PLACES} decimal places")]
    UnsupportedExponent(&'static str),

    /// The string is not a decimal amount.
    #[error("invalid price: {0}")]
    Parse(String),
}

/// An exact decimal monetary amount.
///
/// Arithmetic is carried out on the unrounded value; call [`Price::rounded`]
/// once a final amount is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    value: Decimal,
}

impl Price {
    /// Creates a new price from a decimal amount.
    pub fn new(value: Decimal) -> Self {
        Price { value }
    }

    /// A price of zero.
    pub fn zero() -> Self {
        Price {
            value: Decimal::ZERO,
        }
    }

    /// Creates a price from minor units, e.g. `311` for `3.11`.
    pub fn from_minor(minor: i64) -> Self {
        Price {
            value: Decimal::new(minor, PRICE_DECIMAL_PLACES),
        }
    }

    /// Adds two prices.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the sum is out of range.
    pub fn checked_add(self, other: Price) -> Result<Price, PriceError> {
        self.value
            .checked_add(other.value)
            .map(Price::new)
            .ok_or(PriceError::Overflow)
    }

    /// Multiplies the price by a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Overflow`] if the product is out of range.
    pub fn checked_mul_quantity(self, quantity: usize) -> Result<Price, PriceError> {
        self.value
            .checked_mul(Decimal::from(quantity))
            .map(Price::new)
            .ok_or(PriceError::Overflow)
    }

    /// Scales the price by `numerator / denominator` without rounding.
    ///
    /// Multiplies first to keep precision. If that overflows, divides first
    /// instead, so any price whose scaled value fits still succeeds.
    ///
    /// # Errors
    ///
    /// - [`PriceError::DivisionByZero`]: `denominator` is zero.
    /// - [`PriceError::Overflow`]: the scaled value is out of range.
    pub fn checked_ratio(self, numerator: u32, denominator: u32) -> Result<Price, PriceError> {
        if denominator == 0 {
            return Err(PriceError::DivisionByZero);
        }

        let numerator = Decimal::from(numerator);
        let denominator = Decimal::from(denominator);

        self.value
            .checked_mul(numerator)
            .and_then(|scaled| scaled.checked_div(denominator))
            .or_else(|| {
                self.value
                    .checked_div(denominator)
                    .and_then(|divided| divided.checked_mul(numerator))
            })
            .map(Price::new)
            .ok_or(PriceError::Overflow)
    }

    /// Rounds to two decimal places, midpoints away from zero.
    #[must_use]
    pub fn rounded(self) -> Price {
        Price {
            value: self.value.round_dp_with_strategy(
                PRICE_DECIMAL_PLACES,
                RoundingStrategy::MidpointAwayFromZero,
            ),
        }
    }

    /// Returns true if the amount is below zero.
    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative() && !self.value.is_zero()
    }

    /// Returns the rounded amount in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::MinorUnits`] if the value does not fit in an `i64`.
    pub fn to_minor_units(self) -> Result<i64, PriceError> {
        self.rounded()
            .value
            .checked_mul(Decimal::ONE_HUNDRED)
            .as_ref()
            .and_then(ToPrimitive::to_i64)
            .ok_or(PriceError::MinorUnits(self))
    }

    /// Converts the rounded amount into money of the given currency.
    ///
    /// # Errors
    ///
    /// - [`PriceError::UnsupportedExponent`]: the currency has no two-place minor unit.
    /// - [`PriceError::MinorUnits`]: the amount does not fit in minor units.
    pub fn to_money(
        self,
        currency: &'static Currency,
    ) -> Result<Money<'static, Currency>, PriceError> {
        if currency.exponent != PRICE_DECIMAL_PLACES {
            return Err(PriceError::UnsupportedExponent(currency.iso_alpha_code));
        }

        Ok(Money::from_minor(self.to_minor_units()?, currency))
    }
}

impl Deref for Price {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Price::new(value)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Decimal>()
            .map(Price::new)
            .map_err(|_err| PriceError::Parse(s.to_string()))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

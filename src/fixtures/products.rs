//! Product Fixtures

use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{fixtures::FixtureError, prices::Price, products::Product};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product code -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product price (e.g., "3.11 GBP")
    pub price: String,
}

impl ProductFixture {
    /// Build the product for `code`, returning it with its currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the price cannot be parsed.
    pub fn try_into_product(
        self,
        code: String,
    ) -> Result<(Product, &'static Currency), FixtureError> {
        let (price, currency) = parse_price(&self.price)?;

        Ok((Product::new(code, self.name, price), currency))
    }
}

/// Parse price string (e.g., "3.11 GBP") into a price and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(Price, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let price = amount
        .parse::<Price>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((price, currency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_keeps_exact_amount() -> Result<(), FixtureError> {
        let (price, currency) = parse_price("11.23 GBP")?;

        assert_eq!(price, Price::from_minor(1123));
        assert_eq!(currency, GBP);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("3.11GBP");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_non_decimal_amount() {
        let result = parse_price("three GBP");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(s)) if s == "three GBP"));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("3.11 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_accepts_usd_and_eur() -> Result<(), FixtureError> {
        let (usd_price, usd) = parse_price("1.00 USD")?;
        let (eur_price, eur) = parse_price("2.50 EUR")?;

        assert_eq!(usd_price, Price::from_minor(100));
        assert_eq!(usd, USD);
        assert_eq!(eur_price, Price::from_minor(250));
        assert_eq!(eur, EUR);

        Ok(())
    }

    #[test]
    fn product_fixture_builds_product() -> Result<(), FixtureError> {
        let fixture = ProductFixture {
            name: "Coffee".to_string(),
            price: "11.23 GBP".to_string(),
        };

        let (product, currency) = fixture.try_into_product("CF1".to_string())?;

        assert_eq!(product.code(), "CF1");
        assert_eq!(product.name(), "Coffee");
        assert_eq!(product.price(), Price::from_minor(1123));
        assert_eq!(currency, GBP);

        Ok(())
    }
}

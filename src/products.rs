//! Products

use thiserror::Error;

use crate::prices::Price;

/// Reasons a product is rejected at the checkout boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// The product has an empty code.
    #[error("product code must not be empty")]
    EmptyCode,

    /// The product has a negative price (code, price).
    #[error("product {code} has negative price {price}")]
    NegativePrice {
        /// Product code
        code: String,

        /// Offending price
        price: Price,
    },
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    code: String,
    name: String,
    price: Price,
}

impl Product {
    /// Creates a new product. No validation is performed here.
    pub fn new(code: impl Into<String>, name: impl Into<String>, price: Price) -> Self {
        Product {
            code: code.into(),
            name: name.into(),
            price,
        }
    }

    /// Product code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> Price {
        self.price
    }

    /// Checks the product has a code and a non-negative price.
    ///
    /// # Errors
    ///
    /// - [`ProductError::EmptyCode`]: the code is empty.
    /// - [`ProductError::NegativePrice`]: the price is below zero.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.code.is_empty() {
            return Err(ProductError::EmptyCode);
        }

        if self.price.is_negative() {
            return Err(ProductError::NegativePrice {
                code: self.code.clone(),
                price: self.price,
            });
        }

        Ok(())
    }
}

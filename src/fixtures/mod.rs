//! Fixtures
//!
//! Loads products, pricing rules and scan lists from YAML files laid out as
//! `<base>/products/<name>.yml`, `<base>/pricing_rules/<name>.yml` and
//! `<base>/items/<name>.yml`.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    checkout::{Checkout, CheckoutError},
    fixtures::{
        items::ItemsFixture, pricing_rules::PricingRulesFixture, products::ProductsFixture,
    },
    products::Product,
    rules::PricingRule,
};

pub mod items;
pub mod pricing_rules;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product defined more than once
    #[error("Duplicate product: {0}")]
    DuplicateProduct(String),

    /// Invalid pricing rule data
    #[error("Invalid pricing rule: {0}")]
    InvalidPricingRule(String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Scanning the fixture items failed
    #[error("Failed to scan items: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products, file by file in load order, sorted by code within each file
    products: Vec<Product>,

    /// Product code -> index into `products`
    product_codes: FxHashMap<String, usize>,

    /// Pricing rules in load order
    pricing_rules: Vec<PricingRule>,

    /// Scan list as indices into `products`
    items: Vec<usize>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            product_codes: FxHashMap::default(),
            pricing_rules: Vec::new(),
            items: Vec::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// Products from one file are added sorted by code. Nothing is added if
    /// any product in the file is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a product is
    /// defined twice, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("products", name)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        let mut entries: Vec<_> = fixture.products.into_iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

        let mut currency = self.currency;
        let mut staged = Vec::with_capacity(entries.len());

        for (code, product_fixture) in entries {
            if self.product_codes.contains_key(&code) {
                return Err(FixtureError::DuplicateProduct(code));
            }

            let (product, product_currency) = product_fixture.try_into_product(code)?;

            match currency {
                Some(existing) if existing != product_currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        product_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(product_currency),
            }

            staged.push(product);
        }

        for product in staged {
            self.product_codes
                .insert(product.code().to_string(), self.products.len());
            self.products.push(product);
        }

        self.currency = currency;

        debug!(fixture = name, products = self.products.len(), "loaded products");

        Ok(self)
    }

    /// Load pricing rules from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a rule is invalid.
    pub fn load_pricing_rules(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("pricing_rules", name)?;
        let fixture: PricingRulesFixture = serde_norway::from_str(&contents)?;

        let rules = fixture
            .pricing_rules
            .into_iter()
            .map(PricingRule::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        self.pricing_rules.extend(rules);

        debug!(
            fixture = name,
            pricing_rules = self.pricing_rules.len(),
            "loaded pricing rules"
        );

        Ok(self)
    }

    /// Load a scan list from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced
    /// products don't exist.
    pub fn load_items(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let contents = self.read("items", name)?;
        let fixture: ItemsFixture = serde_norway::from_str(&contents)?;

        let indices = fixture
            .items
            .into_iter()
            .map(|code| {
                self.product_codes
                    .get(&code)
                    .copied()
                    .ok_or(FixtureError::ProductNotFound(code))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.items.extend(indices);

        Ok(self)
    }

    /// Load a complete fixture set (products, pricing rules and items with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_pricing_rules(name)?
            .load_items(name)?;

        Ok(fixture)
    }

    /// Get a product by its code
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, code: &str) -> Result<&Product, FixtureError> {
        self.product_codes
            .get(code)
            .and_then(|&index| self.products.get(index))
            .ok_or_else(|| FixtureError::ProductNotFound(code.to_string()))
    }

    /// Get all products
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Get all pricing rules
    pub fn pricing_rules(&self) -> &[PricingRule] {
        &self.pricing_rules
    }

    /// Iterate over the scan list
    pub fn items(&self) -> impl Iterator<Item = &Product> {
        self.items
            .iter()
            .filter_map(|&index| self.products.get(index))
    }

    /// Create a checkout with the loaded rules and scan every loaded item
    ///
    /// # Errors
    ///
    /// Returns an error if an item is rejected by the checkout.
    pub fn checkout(&self) -> Result<Checkout<'_>, FixtureError> {
        let mut checkout = Checkout::new(&self.pricing_rules);

        for product in self.items() {
            checkout.scan(product)?;
        }

        Ok(checkout)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn read(&self, category: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));

        Ok(fs::read_to_string(file_path)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

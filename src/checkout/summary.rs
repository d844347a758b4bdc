//! Basket Summary

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{prices::Price, products::Product};

/// Quantity and unit price of one product code in the basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLine<'a> {
    code: &'a str,
    quantity: usize,
    unit_price: Price,
}

impl<'a> SummaryLine<'a> {
    /// Product code
    pub fn code(&self) -> &'a str {
        self.code
    }

    /// Number of scanned units
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    /// Price of the first scanned unit
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }
}

/// Basket contents grouped by product code, in first-scanned order.
#[derive(Debug, Default, Clone)]
pub struct BasketSummary<'a> {
    lines: SmallVec<[SummaryLine<'a>; 10]>,
}

impl<'a> BasketSummary<'a> {
    /// Group products by code.
    pub fn from_products<I>(products: I) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let mut lines: SmallVec<[SummaryLine<'a>; 10]> = SmallVec::new();
        let mut positions: FxHashMap<&'a str, usize> = FxHashMap::default();

        for product in products {
            let code = product.code();

            if let Some(line) = positions
                .get(code)
                .and_then(|&position| lines.get_mut(position))
            {
                line.quantity += 1;
                continue;
            }

            positions.insert(code, lines.len());
            lines.push(SummaryLine {
                code,
                quantity: 1,
                unit_price: product.price(),
            });
        }

        BasketSummary { lines }
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &SummaryLine<'a>> {
        self.lines.iter()
    }

    /// Find the line for a product code.
    pub fn line(&self, code: &str) -> Option<&SummaryLine<'a>> {
        self.lines.iter().find(|line| line.code == code)
    }

    /// Number of distinct product codes.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the summary has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

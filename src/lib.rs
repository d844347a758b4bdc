//! Checkout
//!
//! Prices a basket of scanned products, applying at most one pricing rule per
//! product code and rounding the total to two decimal places with exact
//! decimal arithmetic.

pub mod checkout;
pub mod fixtures;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod rules;

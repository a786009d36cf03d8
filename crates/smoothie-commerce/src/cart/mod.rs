//! Shopping cart module.
//!
//! Contains the cart store, its lines and order pricing.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine};
pub use pricing::OrderTotals;

//! Shopping cart module.
//!
//! Contains the cart value, its actions and derived totals.

mod action;
mod cart;
mod pricing;

pub use action::CartAction;
pub use cart::{Cart, CartEntry};
pub use pricing::{CartSummary, LineSummary};

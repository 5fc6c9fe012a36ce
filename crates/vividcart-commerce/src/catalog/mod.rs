//! Product catalog module.
//!
//! Contains the product type and the static catalog it lives in.

mod catalog;
mod product;

pub use catalog::Catalog;
pub use product::{Product, Rating, MAX_RATING, STAR_COUNT};

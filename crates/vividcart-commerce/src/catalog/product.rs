//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f32 = 5.0;

/// Number of stars shown next to a product.
pub const STAR_COUNT: u8 = 5;

/// Customer rating on a 0.0 to 5.0 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Rating(f32);

impl Rating {
    /// Create a rating, rejecting values outside `0.0..=5.0` and NaN.
    pub fn new(value: f32) -> Option<Self> {
        (0.0..=MAX_RATING).contains(&value).then_some(Self(value))
    }

    /// Raw value.
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Whether the stored value is within range.
    ///
    /// Deserialized ratings bypass [`Rating::new`]; the catalog checks this.
    pub fn is_valid(&self) -> bool {
        (0.0..=MAX_RATING).contains(&self.0)
    }

    /// Number of filled stars (rating rounded to the nearest whole star).
    pub fn filled_stars(&self) -> u8 {
        (self.0.round() as u8).min(STAR_COUNT)
    }

    /// Rating with one decimal (e.g., "4.7").
    pub fn display(&self) -> String {
        format!("{:.1}", self.0)
    }
}

/// A product in the catalog.
///
/// Products are immutable reference data. Carts hold them behind an `Arc`
/// and never touch their fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in cents.
    pub price: Money,
    /// Opaque reference to the product image.
    pub image: String,
    /// Customer rating.
    pub rating: Rating,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price_cents: u64,
        image: impl Into<String>,
        rating: Rating,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: Money::new(price_cents),
            image: image.into(),
            rating,
        }
    }

    /// Formatted unit price (e.g., "$1299.99").
    pub fn price_display(&self) -> String {
        self.price.display()
    }

    /// Alt text for the product photo.
    pub fn image_alt(&self) -> String {
        format!("{} product photo", self.name)
    }
}

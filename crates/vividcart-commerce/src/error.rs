//! Commerce error types.
//!
//! Cart and search transitions are total and never produce these. Errors only
//! arise at the fallible edges: building a catalog, parsing recordings and
//! talking to a checkout collaborator.

use thiserror::Error;

/// Errors that can occur at the edges of the storefront core.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Two catalog products share an id.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(String),

    /// Rating outside the 0..=5 range.
    #[error("Invalid rating {rating} for product {product_id}: expected 0.0 to 5.0")]
    InvalidRating { product_id: String, rating: f32 },

    /// Recording format this build does not understand.
    #[error("Unsupported recording version {found}, expected {expected}")]
    UnsupportedRecording { found: u32, expected: u32 },

    /// Checkout collaborator failed.
    #[error("Checkout failed: {0}")]
    CheckoutFailed(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

//! The product catalog.

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{Product, Rating};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Static, ordered list of products available in a session.
///
/// Products are shared by `Arc` so carts and search results point at the
/// same immutable data the catalog holds.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, keeping the given order.
    ///
    /// Returns an error if two products share an id or a rating is out of
    /// range.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut index = HashMap::with_capacity(products.len());
        let mut shared = Vec::with_capacity(products.len());

        for (position, product) in products.into_iter().enumerate() {
            if !product.rating.is_valid() {
                return Err(CommerceError::InvalidRating {
                    product_id: product.id.to_string(),
                    rating: product.rating.value(),
                });
            }
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CommerceError::DuplicateProduct(product.id.to_string()));
            }
            shared.push(Arc::new(product));
        }

        Ok(Self {
            products: shared,
            index,
        })
    }

    /// Load a catalog from a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The storefront's built-in seed catalog.
    pub fn demo() -> Self {
        let products = DEMO_PRODUCTS
            .iter()
            .map(|&(id, name, price, image, rating)| {
                Product::new(id, name, price, image, Rating::new(rating).unwrap_or_default())
            })
            .collect::<Vec<_>>();

        // Seed ids are distinct and ratings in range, so construction is infallible.
        let index = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self {
            products: products.into_iter().map(Arc::new).collect(),
            index,
        }
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<Arc<Product>> {
        self.index.get(id).map(|&i| Arc::clone(&self.products[i]))
    }

    /// Check whether a product id is in the catalog.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    /// Products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.products.iter()
    }

    /// Products as a slice, in catalog order.
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

const DEMO_PRODUCTS: &[(&str, &str, u64, &str, f32)] = &[
    ("laptop", "Ultrabook Pro 14\"", 129_999, "/assets/products/laptop.jpg", 4.7),
    ("headphones", "Auralux Wireless Headphones", 19_999, "/assets/products/headphones.jpg", 4.5),
    ("sneakers", "StrideOne Sneakers", 8_999, "/assets/products/sneakers.jpg", 4.2),
    ("laptop-2", "Ultrabook Air 13\"", 99_999, "/assets/products/laptop.jpg", 4.4),
    ("headphones-2", "Auralux Studio", 24_999, "/assets/products/headphones.jpg", 4.6),
    ("sneakers-2", "StrideOne Lite", 7_999, "/assets/products/sneakers.jpg", 4.0),
];

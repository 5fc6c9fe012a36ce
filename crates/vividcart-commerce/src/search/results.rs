//! Search results.

use std::sync::Arc;

use crate::catalog::{Catalog, Product};
use crate::search::{filter, SearchQuery};

/// Filtered view of the catalog for one query.
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// The query that produced these results.
    pub query: SearchQuery,
    /// Matching products in catalog order.
    pub products: Vec<Arc<Product>>,
}

impl SearchResults {
    /// Run a query against the catalog.
    pub fn run(catalog: &Catalog, query: impl Into<SearchQuery>) -> Self {
        let query = query.into();
        let products = filter(catalog, query.clone());
        Self { query, products }
    }

    /// Number of matching products.
    pub fn total(&self) -> usize {
        self.products.len()
    }

    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Count shown above the product grid (e.g., "6 items").
    pub fn count_label(&self) -> String {
        format!("{} items", self.total())
    }
}

//! Search query normalization.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Text typed into the storefront search box.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SearchQuery {
    raw: String,
}

impl SearchQuery {
    /// Create a query from raw input.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The input as typed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Check whether the query filters nothing (empty or whitespace only).
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Lowercased text to look for, or `None` for a blank query.
    ///
    /// A non-blank query is matched as typed, surrounding spaces included.
    pub fn needle(&self) -> Option<String> {
        (!self.is_blank()).then(|| self.raw.to_lowercase())
    }

    /// Check whether a product name contains the query, ignoring case.
    pub fn matches(&self, product: &Product) -> bool {
        match self.needle() {
            Some(needle) => product.name.to_lowercase().contains(&needle),
            None => true,
        }
    }
}

impl From<&str> for SearchQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SearchQuery {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_queries() {
        assert!(SearchQuery::new("").is_blank());
        assert!(SearchQuery::new("  \t ").is_blank());
        assert_eq!(SearchQuery::new("   ").needle(), None);
        assert!(!SearchQuery::new(" a ").is_blank());
    }

    #[test]
    fn test_needle_is_lowercased() {
        assert_eq!(SearchQuery::new("ULTRA").needle().as_deref(), Some("ultra"));
        assert_eq!(SearchQuery::new("Air 13").needle().as_deref(), Some("air 13"));
    }

    #[test]
    fn test_matches_product_names() {
        let catalog = crate::catalog::Catalog::demo();
        let laptop = catalog.get(&crate::ids::ProductId::new("laptop")).unwrap();

        assert!(SearchQuery::new("ULTRABOOK pro").matches(&laptop));
        assert!(SearchQuery::new("  ").matches(&laptop));
        assert!(!SearchQuery::new("sneaker").matches(&laptop));
        assert!(!SearchQuery::new(" ultrabook").matches(&laptop));
    }
}

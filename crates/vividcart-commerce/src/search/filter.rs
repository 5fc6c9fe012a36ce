//! Catalog filtering.

use std::sync::Arc;

use crate::catalog::{Catalog, Product};
use crate::search::SearchQuery;

/// Products whose name contains `query`, ignoring case, in catalog order.
///
/// A blank query returns the whole catalog. No match returns an empty vector.
pub fn filter(catalog: &Catalog, query: impl Into<SearchQuery>) -> Vec<Arc<Product>> {
    let query = query.into();
    if query.is_blank() {
        return catalog.products().to_vec();
    }

    catalog
        .iter()
        .filter(|product| query.matches(product))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(products: &[Arc<Product>]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_catalog() {
        let catalog = Catalog::demo();
        let all = filter(&catalog, "");
        assert_eq!(all.len(), catalog.len());
        assert!(all
            .iter()
            .zip(catalog.iter())
            .all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn test_whitespace_query_returns_catalog() {
        let catalog = Catalog::demo();
        assert_eq!(filter(&catalog, "   ").len(), catalog.len());
    }

    #[test]
    fn test_case_insensitive_match_in_catalog_order() {
        let catalog = Catalog::demo();
        let results = filter(&catalog, "ULTRA");
        assert_eq!(names(&results), ["Ultrabook Pro 14\"", "Ultrabook Air 13\""]);
    }

    #[test]
    fn test_substring_match() {
        let catalog = Catalog::demo();
        assert_eq!(
            names(&filter(&catalog, "stride")),
            ["StrideOne Sneakers", "StrideOne Lite"]
        );
        assert_eq!(names(&filter(&catalog, "studio")), ["Auralux Studio"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let catalog = Catalog::demo();
        assert!(filter(&catalog, "toaster").is_empty());
    }
}

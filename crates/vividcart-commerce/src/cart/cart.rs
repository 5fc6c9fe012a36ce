//! Cart and cart entry types.
//!
//! Every transition borrows the current cart and returns a new one. The
//! previous value is never touched, so any sequence of transitions can be
//! replayed from the same starting cart with the same result.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;

/// A product in the cart and how many of it.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    product: Arc<Product>,
    qty: u64,
}

impl CartEntry {
    fn new(product: Arc<Product>) -> Self {
        Self { product, qty: 1 }
    }

    /// The product this entry refers to.
    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    /// Quantity, always at least 1.
    pub fn qty(&self) -> u64 {
        self.qty
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply(self.qty)
    }
}

/// A shopping cart.
///
/// Entries are keyed by product id, so a product appears at most once, and
/// kept in the order each product was first added.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: IndexMap<ProductId, CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// An existing entry keeps its position and gains one unit; a new product
    /// is appended with quantity 1.
    #[must_use]
    pub fn add_item(&self, product: &Arc<Product>) -> Self {
        let mut next = self.clone();
        match next.entries.get_mut(&product.id) {
            Some(entry) => entry.qty = entry.qty.saturating_add(1),
            None => {
                next.entries
                    .insert(product.id.clone(), CartEntry::new(Arc::clone(product)));
            }
        }
        next
    }

    /// Add one unit to an existing entry. Unknown ids leave the cart unchanged.
    #[must_use]
    pub fn increment_qty(&self, id: &ProductId) -> Self {
        self.with_entry(id, |entry| entry.qty = entry.qty.saturating_add(1))
    }

    /// Take one unit from an existing entry, never going below 1.
    ///
    /// Decrementing never removes an entry; that is what [`Cart::remove_item`]
    /// is for. Unknown ids leave the cart unchanged.
    #[must_use]
    pub fn decrement_qty(&self, id: &ProductId) -> Self {
        self.with_entry(id, |entry| entry.qty = entry.qty.saturating_sub(1).max(1))
    }

    /// Drop the entry for a product. Unknown ids leave the cart unchanged.
    #[must_use]
    pub fn remove_item(&self, id: &ProductId) -> Self {
        if !self.entries.contains_key(id) {
            return self.clone();
        }
        let mut next = self.clone();
        next.entries.shift_remove(id);
        next
    }

    /// An empty cart.
    ///
    /// The storefront never clears a cart on its own; checkout flows that
    /// want a reset ask for one.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::new()
    }

    /// Get the entry for a product.
    pub fn get(&self, id: &ProductId) -> Option<&CartEntry> {
        self.entries.get(id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries in the order products were first added.
    pub fn entries(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.values()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn with_entry(&self, id: &ProductId, update: impl FnOnce(&mut CartEntry)) -> Self {
        let mut next = self.clone();
        if let Some(entry) = next.entries.get_mut(id) {
            update(entry);
        }
        next
    }
}

// IndexMap equality ignores order; cart equality does not.
impl PartialEq for Cart {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn product(catalog: &Catalog, id: &str) -> Arc<Product> {
        catalog.get(&ProductId::new(id)).unwrap()
    }

    fn quantities(cart: &Cart) -> Vec<(&str, u64)> {
        cart.entries()
            .map(|e| (e.product().id.as_str(), e.qty()))
            .collect()
    }

    #[test]
    fn test_cart_starts_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
    }

    #[test]
    fn test_add_item_appends() {
        let catalog = Catalog::demo();
        let cart = Cart::new()
            .add_item(&product(&catalog, "sneakers"))
            .add_item(&product(&catalog, "laptop"));

        assert_eq!(quantities(&cart), [("sneakers", 1), ("laptop", 1)]);
    }

    #[test]
    fn test_add_same_item_increases_quantity_in_place() {
        let catalog = Catalog::demo();
        let laptop = product(&catalog, "laptop");
        let cart = Cart::new()
            .add_item(&laptop)
            .add_item(&product(&catalog, "headphones"))
            .add_item(&laptop);

        assert_eq!(quantities(&cart), [("laptop", 2), ("headphones", 1)]);
    }

    #[test]
    fn test_transitions_leave_prior_cart_untouched() {
        let catalog = Catalog::demo();
        let laptop = product(&catalog, "laptop");
        let before = Cart::new().add_item(&laptop);
        let after = before.add_item(&laptop).increment_qty(&laptop.id);

        assert_eq!(before.get(&laptop.id).unwrap().qty(), 1);
        assert_eq!(after.get(&laptop.id).unwrap().qty(), 3);
    }

    #[test]
    fn test_increment_qty() {
        let catalog = Catalog::demo();
        let sneakers = product(&catalog, "sneakers");
        let cart = Cart::new().add_item(&sneakers).increment_qty(&sneakers.id);
        assert_eq!(cart.get(&sneakers.id).unwrap().qty(), 2);
    }

    #[test]
    fn test_decrement_stops_at_one() {
        let catalog = Catalog::demo();
        let sneakers = product(&catalog, "sneakers");
        let cart = Cart::new()
            .add_item(&sneakers)
            .add_item(&sneakers)
            .decrement_qty(&sneakers.id);
        assert_eq!(cart.get(&sneakers.id).unwrap().qty(), 1);

        let cart = cart.decrement_qty(&sneakers.id);
        assert_eq!(quantities(&cart), [("sneakers", 1)]);
    }

    #[test]
    fn test_remove_item_preserves_order_of_rest() {
        let catalog = Catalog::demo();
        let cart = Cart::new()
            .add_item(&product(&catalog, "laptop"))
            .add_item(&product(&catalog, "headphones"))
            .add_item(&product(&catalog, "sneakers"))
            .remove_item(&ProductId::new("headphones"));

        assert_eq!(quantities(&cart), [("laptop", 1), ("sneakers", 1)]);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let catalog = Catalog::demo();
        let cart = Cart::new().add_item(&product(&catalog, "laptop"));
        let ghost = ProductId::new("ghost");

        assert_eq!(cart.increment_qty(&ghost), cart);
        assert_eq!(cart.decrement_qty(&ghost), cart);
        assert_eq!(cart.remove_item(&ghost), cart);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let catalog = Catalog::demo();
        let laptop = product(&catalog, "laptop");
        let sneakers = product(&catalog, "sneakers");

        let a = Cart::new().add_item(&laptop).add_item(&sneakers);
        let b = Cart::new().add_item(&sneakers).add_item(&laptop);
        assert_ne!(a, b);
    }

    #[test]
    fn test_readding_after_remove_goes_to_end() {
        let catalog = Catalog::demo();
        let laptop = product(&catalog, "laptop");
        let cart = Cart::new()
            .add_item(&laptop)
            .add_item(&product(&catalog, "sneakers"))
            .remove_item(&laptop.id)
            .add_item(&laptop);

        assert_eq!(quantities(&cart), [("sneakers", 1), ("laptop", 1)]);
    }

    #[test]
    fn test_cleared() {
        let catalog = Catalog::demo();
        let cart = Cart::new().add_item(&product(&catalog, "laptop"));
        assert!(cart.cleared().is_empty());
        assert_eq!(cart.len(), 1);
    }
}

//! Cart totals.
//!
//! Totals are always derived from the current cart, never stored beside it.

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartEntry};
use crate::ids::ProductId;
use crate::money::Money;

/// One cart line as shown to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineSummary {
    /// Product in the line.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub qty: u64,
    /// Unit price times quantity.
    pub line_total: Money,
}

impl From<&CartEntry> for LineSummary {
    fn from(entry: &CartEntry) -> Self {
        let product = entry.product();
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            qty: entry.qty(),
            line_total: entry.line_total(),
        }
    }
}

/// Read model of a cart: its lines and aggregate figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CartSummary {
    /// Lines in cart order.
    pub lines: Vec<LineSummary>,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Sum of quantities.
    pub item_count: u64,
}

impl CartSummary {
    /// Check if the summarized cart was empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Cart {
    /// Sum of price times quantity over all entries, in cents.
    pub fn subtotal(&self) -> Money {
        self.entries().map(CartEntry::line_total).sum()
    }

    /// Sum of quantities over all entries.
    pub fn item_count(&self) -> u64 {
        self.entries()
            .fold(0u64, |count, entry| count.saturating_add(entry.qty()))
    }

    /// Build the display summary for this cart.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            lines: self.entries().map(LineSummary::from).collect(),
            subtotal: self.subtotal(),
            item_count: self.item_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::new();
        assert_eq!(cart.subtotal(), Money::zero());
        assert_eq!(cart.item_count(), 0);
        assert!(cart.summary().is_empty());
    }

    #[test]
    fn test_pricing() {
        let catalog = Catalog::demo();
        let laptop = catalog.get(&ProductId::new("laptop")).unwrap();
        let headphones = catalog.get(&ProductId::new("headphones")).unwrap();

        let cart = Cart::new()
            .add_item(&laptop)
            .add_item(&headphones)
            .add_item(&laptop);

        assert_eq!(cart.subtotal().amount_cents, 2 * 129_999 + 19_999);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_summary_lines() {
        let catalog = Catalog::demo();
        let sneakers = catalog.get(&ProductId::new("sneakers")).unwrap();
        let cart = Cart::new().add_item(&sneakers).add_item(&sneakers);

        let summary = cart.summary();
        assert_eq!(
            summary.lines,
            vec![LineSummary {
                product_id: ProductId::new("sneakers"),
                name: "StrideOne Sneakers".to_string(),
                unit_price: Money::new(8_999),
                qty: 2,
                line_total: Money::new(17_998),
            }]
        );
        assert_eq!(summary.subtotal, Money::new(17_998));
        assert_eq!(summary.item_count, 2);
    }

    #[test]
    fn test_summary_json_shape() {
        let catalog = Catalog::demo();
        let sneakers = catalog.get(&ProductId::new("sneakers-2")).unwrap();
        let summary = Cart::new().add_item(&sneakers).summary();

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["subtotal"], 7_999);
        assert_eq!(value["item_count"], 1);
        assert_eq!(value["lines"][0]["product_id"], "sneakers-2");
    }
}

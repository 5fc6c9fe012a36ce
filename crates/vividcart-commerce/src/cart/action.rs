//! Cart actions and the reducer that applies them.

use std::sync::Arc;

use crate::cart::Cart;
use crate::catalog::Product;
use crate::ids::ProductId;

/// A user-triggered change to the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add one unit of a product.
    AddItem(Arc<Product>),
    /// Add one unit to an existing entry.
    IncrementQty(ProductId),
    /// Take one unit from an existing entry, floored at 1.
    DecrementQty(ProductId),
    /// Drop an entry.
    RemoveItem(ProductId),
    /// Empty the cart.
    Clear,
}

impl CartAction {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::AddItem(_) => "add_item",
            CartAction::IncrementQty(_) => "increment_qty",
            CartAction::DecrementQty(_) => "decrement_qty",
            CartAction::RemoveItem(_) => "remove_item",
            CartAction::Clear => "clear",
        }
    }

    /// The product the action targets, if any.
    pub fn product_id(&self) -> Option<&ProductId> {
        match self {
            CartAction::AddItem(product) => Some(&product.id),
            CartAction::IncrementQty(id)
            | CartAction::DecrementQty(id)
            | CartAction::RemoveItem(id) => Some(id),
            CartAction::Clear => None,
        }
    }
}

impl Cart {
    /// Apply an action, producing the next cart.
    #[must_use]
    pub fn apply(&self, action: &CartAction) -> Cart {
        match action {
            CartAction::AddItem(product) => self.add_item(product),
            CartAction::IncrementQty(id) => self.increment_qty(id),
            CartAction::DecrementQty(id) => self.decrement_qty(id),
            CartAction::RemoveItem(id) => self.remove_item(id),
            CartAction::Clear => self.cleared(),
        }
    }
}

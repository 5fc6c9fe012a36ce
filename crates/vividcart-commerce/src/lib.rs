//! Storefront domain types and logic for VividCart.
//!
//! This crate holds the parts of the storefront that carry real invariants:
//!
//! - **Catalog**: the static, ordered product list
//! - **Search**: case-insensitive name filtering that preserves catalog order
//! - **Cart**: keyed cart entries with pure state transitions and derived totals
//! - **Checkout**: the collaborator seam that consumes cart totals
//! - **Replay**: serializable event logs replayed into a deterministic session
//!
//! # Example
//!
//! ```rust
//! use vividcart_commerce::prelude::*;
//!
//! let catalog = Catalog::demo();
//! let laptop = catalog.get(&ProductId::new("laptop")).unwrap();
//! let headphones = catalog.get(&ProductId::new("headphones")).unwrap();
//!
//! let cart = Cart::new()
//!     .add_item(&laptop)
//!     .add_item(&headphones)
//!     .add_item(&laptop);
//!
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.subtotal().amount_cents, 279_997);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod replay;
pub mod search;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, Product, Rating};

    // Cart
    pub use crate::cart::{Cart, CartAction, CartEntry, CartSummary, LineSummary};
    pub use crate::store::CartStore;

    // Checkout
    pub use crate::checkout::{
        CheckoutCollaborator, CheckoutOutcome, CheckoutRequest, ClearPolicy, DemoCheckout,
    };

    // Search
    pub use crate::search::{filter, SearchQuery, SearchResults};

    // Replay
    pub use crate::replay::{replay, Recording, ReplayDiff, ReplayOutcome, Session, StoreEvent};
}

//! Checkout module.
//!
//! The storefront does not take payment itself. It hands cart totals to a
//! [`CheckoutCollaborator`] and leaves clearing the cart to a [`ClearPolicy`].

mod collaborator;
mod request;

pub use collaborator::{CheckoutCollaborator, DemoCheckout, DEMO_CHECKOUT_NOTICE};
pub use request::{CheckoutOutcome, CheckoutRequest, ClearPolicy};

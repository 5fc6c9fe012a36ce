//! The seam between the cart and whatever takes payment.

use tracing::info;

use crate::checkout::{CheckoutOutcome, CheckoutRequest};
use crate::error::CommerceError;

/// Notice shown when no payment backend is connected.
pub const DEMO_CHECKOUT_NOTICE: &str = "This is a demo. Connect Stripe to enable payments.";

/// Receives checkout requests built from the current cart.
pub trait CheckoutCollaborator {
    /// Start a checkout for the given figures.
    fn begin_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutOutcome, CommerceError>;
}

/// Stub collaborator that takes no payment.
#[derive(Debug, Clone, Default)]
pub struct DemoCheckout;

impl CheckoutCollaborator for DemoCheckout {
    fn begin_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutOutcome, CommerceError> {
        info!(
            checkout_id = %request.id,
            subtotal_cents = request.subtotal.amount_cents,
            item_count = request.item_count,
            "checkout initiated"
        );
        Ok(CheckoutOutcome::NotConnected {
            notice: DEMO_CHECKOUT_NOTICE.to_string(),
        })
    }
}

//! Checkout request and outcome types.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::ids::CheckoutId;
use crate::money::Money;

/// Figures handed to a checkout collaborator when a customer checks out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Id for correlating this checkout.
    pub id: CheckoutId,
    /// Cart subtotal at the moment of checkout.
    pub subtotal: Money,
    /// Cart item count at the moment of checkout.
    pub item_count: u64,
}

impl CheckoutRequest {
    /// Build a request from the current cart.
    pub fn from_cart(cart: &Cart) -> Self {
        Self::with_id(CheckoutId::generate(), cart)
    }

    /// Build a request from the current cart under a given id.
    pub fn with_id(id: CheckoutId, cart: &Cart) -> Self {
        Self {
            id,
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
        }
    }
}

/// What a collaborator did with a checkout request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// The collaborator took over (e.g., redirected to a payment page).
    Accepted {
        /// Where the customer continues, if anywhere.
        #[serde(skip_serializing_if = "Option::is_none")]
        redirect: Option<String>,
    },
    /// No payment backend is wired up.
    NotConnected {
        /// Notice to show the customer.
        notice: String,
    },
}

impl CheckoutOutcome {
    /// Check whether the collaborator accepted the checkout.
    pub fn is_accepted(&self) -> bool {
        matches!(self, CheckoutOutcome::Accepted { .. })
    }
}

/// Whether the cart is emptied after a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Leave the cart as it is.
    #[default]
    KeepCart,
    /// Empty the cart once a collaborator accepts the checkout.
    ClearOnAccepted,
}

impl ClearPolicy {
    /// Decide whether to clear after the given outcome.
    pub fn should_clear(&self, outcome: &CheckoutOutcome) -> bool {
        match self {
            ClearPolicy::KeepCart => false,
            ClearPolicy::ClearOnAccepted => outcome.is_accepted(),
        }
    }

    /// Config-file spelling of the policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearPolicy::KeepCart => "keep_cart",
            ClearPolicy::ClearOnAccepted => "clear_on_accepted",
        }
    }
}

//! Checkout
//!
//! The checkout flow is a small state machine guarding the upsell prompt:
//!
//! ```text
//! Idle --finalize (non-empty cart)--> OfferPending --accept/decline--> Completed
//!  ^                                       |                             |
//!  +---------------dismiss-----------------+-----------------------------+
//! ```
//!
//! `Completed` is not kept as a state. Accepting or declining hands back a
//! [`CompletedOrder`] and the machine is `Idle` again. The cart is never
//! cleared by checkout.

use tracing::{debug, info};

use crate::{
    cart::Cart,
    order::{OrderError, OrderMessage},
    products::SpecialOffer,
};

/// Where the checkout flow currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutState {
    /// Nothing in progress.
    #[default]
    Idle,

    /// The upsell offer is being shown; waiting for accept, decline or dismiss.
    OfferPending,
}

/// The customer's answer to the upsell prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferDecision {
    /// Add the special offer to the order.
    Accept,

    /// Send the order without the special offer.
    Decline,
}

/// An order that finished checkout and is ready to be delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedOrder<'a> {
    /// The rendered message
    pub message: OrderMessage<'a>,

    /// How the upsell was answered
    pub decision: OfferDecision,
}

/// Checkout state machine.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    state: CheckoutState,
}

impl Checkout {
    /// Create a new checkout in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Request to finish the order. Moves to `OfferPending` when the cart has
    /// lines; an empty cart leaves the machine `Idle`.
    ///
    /// Returns the state after the request.
    pub fn finalize(&mut self, cart: &Cart<'_>) -> CheckoutState {
        match self.state {
            CheckoutState::Idle if cart.is_empty() => {
                debug!("checkout requested on an empty cart");
            }
            CheckoutState::Idle => {
                self.state = CheckoutState::OfferPending;

                info!(lines = cart.len(), "checkout started, offering upsell");
            }
            CheckoutState::OfferPending => {}
        }

        self.state
    }

    /// Answer the upsell prompt and build the order message.
    ///
    /// Returns `None` when no offer is pending. If the cart was emptied while
    /// the offer was pending, the machine resets to `Idle` and `None` is
    /// returned. Otherwise the machine resets to `Idle` and the completed
    /// order is returned.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the message cannot be built. The machine
    /// stays in `OfferPending` in that case.
    pub fn decide<'a>(
        &mut self,
        decision: OfferDecision,
        store_name: &str,
        cart: &Cart<'a>,
        offer: &SpecialOffer<'a>,
    ) -> Result<Option<CompletedOrder<'a>>, OrderError> {
        if self.state != CheckoutState::OfferPending {
            return Ok(None);
        }

        if cart.is_empty() {
            self.state = CheckoutState::Idle;

            debug!(?decision, "cart emptied while the offer was pending, nothing to send");

            return Ok(None);
        }

        let offer = match decision {
            OfferDecision::Accept => Some(offer),
            OfferDecision::Decline => None,
        };

        let message = OrderMessage::build(store_name, cart, offer)?;

        self.state = CheckoutState::Idle;

        info!(
            ?decision,
            total = %message.total(),
            "checkout completed"
        );

        Ok(Some(CompletedOrder { message, decision }))
    }

    /// Close the upsell prompt without sending anything.
    pub fn dismiss(&mut self) {
        if self.state == CheckoutState::OfferPending {
            debug!("upsell dismissed, checkout abandoned");
        }

        self.state = CheckoutState::Idle;
    }
}

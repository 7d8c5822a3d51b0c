//! Session
//!
//! One shopper's state: the category being browsed, the cart, and the
//! checkout flow. Nothing here outlives the session.

use std::{
    num::NonZeroU32,
    time::{Duration, Instant},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::Cart,
    catalog::Catalog,
    channel::{ChannelError, OrderChannel},
    checkout::{Checkout, CheckoutState, CompletedOrder, OfferDecision},
    order::OrderError,
    products::{Category, Product, ProductId},
};

/// How long the "added to cart" acknowledgement stays up.
pub const ACKNOWLEDGEMENT_WINDOW: Duration = Duration::from_millis(500);

/// Errors raised by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The id is not a catalog product.
    #[error("no product with id {0}")]
    UnknownProduct(ProductId),

    /// Building the order message failed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Delivering the order failed.
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// A shopping session over a catalog.
#[derive(Debug)]
pub struct Session<'a> {
    catalog: &'a Catalog<'a>,
    category: Category,
    cart: Cart<'a>,
    checkout: Checkout,
    acknowledged_at: Option<Instant>,
}

impl<'a> Session<'a> {
    /// Start a session with an empty cart, browsing the first category.
    pub fn new(catalog: &'a Catalog<'a>) -> Self {
        Self {
            catalog,
            category: catalog.categories().first().copied().unwrap_or_default(),
            cart: Cart::new(catalog.currency()),
            checkout: Checkout::new(),
            acknowledged_at: None,
        }
    }

    /// The catalog this session sells from.
    pub fn catalog(&self) -> &'a Catalog<'a> {
        self.catalog
    }

    /// The cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Category currently browsed.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Browse another category.
    pub fn select_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Products in the browsed category.
    pub fn visible_products(&self) -> impl Iterator<Item = &'a Product<'a>> + use<'a> {
        self.catalog.by_category(self.category)
    }

    /// Add `quantity` of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownProduct`] if the id is not in the
    /// catalog. The special offer is never found here.
    pub fn add(&mut self, id: ProductId, quantity: NonZeroU32) -> Result<(), SessionError> {
        self.add_at(id, quantity, Instant::now())
    }

    /// [`Session::add`] with an explicit clock reading.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownProduct`] if the id is not in the catalog.
    pub fn add_at(
        &mut self,
        id: ProductId,
        quantity: NonZeroU32,
        now: Instant,
    ) -> Result<(), SessionError> {
        let Some(product) = self.catalog.product(id) else {
            warn!(product = %id, "attempted to add unknown product");

            return Err(SessionError::UnknownProduct(id));
        };

        self.cart.add_item(product, quantity);
        self.acknowledged_at = Some(now);

        Ok(())
    }

    /// Drop the line for `id`.
    pub fn remove(&mut self, id: ProductId) {
        self.cart.remove_item(id);
    }

    /// Shift the quantity for `id` by `delta`, never below one.
    pub fn adjust(&mut self, id: ProductId, delta: i64) {
        self.cart.update_quantity(id, delta);
    }

    /// Whether the add-to-cart acknowledgement is still showing at `now`.
    pub fn is_acknowledging(&self, now: Instant) -> bool {
        self.acknowledged_at
            .is_some_and(|at| now.saturating_duration_since(at) < ACKNOWLEDGEMENT_WINDOW)
    }

    /// Checkout state.
    pub fn checkout_state(&self) -> CheckoutState {
        self.checkout.state()
    }

    /// Ask to finish the order. Empty carts stay `Idle`.
    pub fn finalize(&mut self) -> CheckoutState {
        self.checkout.finalize(&self.cart)
    }

    /// Accept the upsell and deliver the order.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the order cannot be built or delivered.
    pub fn accept_offer(
        &mut self,
        channel: &mut dyn OrderChannel,
    ) -> Result<Option<CompletedOrder<'a>>, SessionError> {
        self.complete(OfferDecision::Accept, channel)
    }

    /// Decline the upsell and deliver the order.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the order cannot be built or delivered.
    pub fn decline_offer(
        &mut self,
        channel: &mut dyn OrderChannel,
    ) -> Result<Option<CompletedOrder<'a>>, SessionError> {
        self.complete(OfferDecision::Decline, channel)
    }

    /// Close the upsell without sending.
    pub fn dismiss_offer(&mut self) {
        self.checkout.dismiss();
    }

    fn complete(
        &mut self,
        decision: OfferDecision,
        channel: &mut dyn OrderChannel,
    ) -> Result<Option<CompletedOrder<'a>>, SessionError> {
        let order = self.checkout.decide(
            decision,
            self.catalog.store_name(),
            &self.cart,
            self.catalog.special_offer(),
        )?;

        match order {
            Some(order) => {
                channel.deliver(&order)?;

                Ok(Some(order))
            }
            None => {
                debug!(?decision, "no offer pending, nothing to send");

                Ok(None)
            }
        }
    }
}

//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine},
    catalog::{Catalog, CatalogError},
    channel::{ChannelError, DeepLink, LinkWriter, OrderChannel},
    checkout::{Checkout, CheckoutState, CompletedOrder, OfferDecision},
    fixtures::FixtureError,
    order::{OrderError, OrderMessage},
    pricing::PricingError,
    products::{Category, Product, ProductId, SpecialOffer},
    session::{Session, SessionError},
};

//! Storefront
//!
//! A small storefront engine: a category-filtered catalog, an in-memory cart,
//! and a checkout flow that turns the cart into an order message delivered
//! through a chat deep link.

pub mod cart;
pub mod catalog;
pub mod channel;
pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod observability;
pub mod order;
pub mod pricing;
pub mod prelude;
pub mod products;
pub mod session;
pub mod shell;
pub mod summary;

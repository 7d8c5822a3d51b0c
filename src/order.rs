//! Order messages
//!
//! Renders the cart into the text sent to the store when an order is placed.
//! The layout is fixed:
//!
//! ```text
//! *Olá, {store}! Gostaria de fazer um pedido:*
//!
//! • 2x Caneca - R$ 40.00
//!
//! *✨ OFERTA ESPECIAL ADICIONADA:*
//! • 1x Lápis de Cor - R$ 27.90
//!
//! *Total do Pedido: R$ 67.90*
//! ```
//!
//! The offer block only appears when the upsell was accepted.

use std::fmt::{self, Write};

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::{PricingError, format_amount},
    products::SpecialOffer,
};

/// Errors that can occur while building an order message.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Error calculating the cart or line totals.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing into the message buffer failed.
    #[error("failed to format order message")]
    Format(#[from] fmt::Error),
}

impl From<MoneyError> for OrderError {
    fn from(err: MoneyError) -> Self {
        OrderError::Pricing(PricingError::Money(err))
    }
}

/// A rendered order, ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderMessage<'a> {
    text: String,
    total: Money<'a, Currency>,
    includes_offer: bool,
}

impl<'a> OrderMessage<'a> {
    /// Build the order message for `cart`, adding `offer` when given.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if a total cannot be calculated.
    pub fn build(
        store_name: &str,
        cart: &Cart<'a>,
        offer: Option<&SpecialOffer<'a>>,
    ) -> Result<Self, OrderError> {
        let mut text = String::new();

        writeln!(text, "*Olá, {store_name}! Gostaria de fazer um pedido:*")?;
        writeln!(text)?;

        for line in cart.iter() {
            writeln!(
                text,
                "• {}x {} - {}",
                line.quantity(),
                line.product().name,
                display_price(&line.subtotal()?),
            )?;
        }

        let mut total = cart.total()?;

        if let Some(offer) = offer {
            writeln!(text)?;
            writeln!(text, "*✨ OFERTA ESPECIAL ADICIONADA:*")?;
            writeln!(text, "• 1x {} - {}", offer.name, display_price(&offer.price))?;

            total = total.add(offer.price)?;
        }

        writeln!(text)?;
        write!(text, "*Total do Pedido: {}*", display_price(&total))?;

        Ok(Self {
            text,
            total,
            includes_offer: offer.is_some(),
        })
    }

    /// The message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Grand total stated in the message.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Whether the special offer line was included.
    pub fn includes_offer(&self) -> bool {
        self.includes_offer
    }
}

impl fmt::Display for OrderMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// `R$ 27.90` style price: currency symbol, a space, the plain amount.
pub fn display_price(money: &Money<'_, Currency>) -> String {
    format!("{} {}", money.currency().symbol, format_amount(money))
}

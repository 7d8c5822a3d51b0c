//! Summary tables
//!
//! Plain-text views of the catalog and the cart for the shell.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    cart::Cart,
    order::display_price,
    pricing::PricingError,
    products::{Product, SpecialOffer},
};

/// Errors that can occur when rendering a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating a line or cart total.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Writes a product listing.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_products<'p, 'a: 'p>(
    mut out: impl io::Write,
    products: impl IntoIterator<Item = &'p Product<'a>>,
) -> Result<(), SummaryError> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Item", "Category", "Price"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.to_string(),
            display_price(&product.price),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::rounded());
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Writes the cart lines followed by the item count and total.
///
/// # Errors
///
/// Returns an error if a total cannot be calculated or the output cannot be written.
pub fn write_cart(mut out: impl io::Write, cart: &Cart<'_>) -> Result<(), SummaryError> {
    if cart.is_empty() {
        writeln!(out, "Cart is empty.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Category", "Unit Price", "Qty", "Subtotal"]);

    for (idx, line) in cart.iter().enumerate() {
        let product = line.product();

        builder.push_record([
            format!("#{:<3}", idx + 1),
            format!("{} ({})", product.name, product.id),
            product.category.to_string(),
            display_price(&product.price),
            line.quantity().to_string(),
            display_price(&line.subtotal()?),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::rounded());
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, " Items: {}", cart.item_count())?;
    writeln!(out, " Total: {}", display_price(&cart.total()?))?;

    Ok(())
}

/// Writes the upsell prompt for the special offer.
///
/// # Errors
///
/// Returns an error if the savings cannot be calculated or the output cannot be written.
pub fn write_offer(mut out: impl io::Write, offer: &SpecialOffer<'_>) -> Result<(), SummaryError> {
    let savings = offer.savings().map_err(PricingError::from)?;
    let percent = percent_points(offer.savings_percent().map_err(PricingError::from)?);

    writeln!(out, "✨ Special offer: {}", offer.name)?;
    writeln!(
        out,
        "   {} (was {}, save {} / {percent}%)",
        display_price(&offer.price),
        display_price(&offer.original_price),
        display_price(&savings),
    )?;
    writeln!(out, "   accept | decline | dismiss")?;

    Ok(())
}

fn percent_points(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(0)
}

//! Pricing

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::cart::CartLine;

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A line subtotal does not fit in the minor unit range.
    #[error("line subtotal overflowed: {quantity} x {unit_minor} minor units")]
    Overflow {
        /// Requested quantity
        quantity: u32,
        /// Unit price in minor units
        unit_minor: i64,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates `quantity × price`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
pub fn line_total<'a>(
    price: &Money<'a, Currency>,
    quantity: NonZeroU32,
) -> Result<Money<'a, Currency>, PricingError> {
    let unit_minor = price.to_minor_units();

    let minor = unit_minor
        .checked_mul(i64::from(quantity.get()))
        .ok_or(PricingError::Overflow {
            quantity: quantity.get(),
            unit_minor,
        })?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// Calculates the total price of a list of cart lines.
///
/// An empty list totals zero in `currency`.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line subtotal did not fit in minor units.
/// - [`PricingError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(
    lines: &[CartLine<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line| {
            Ok(acc.add(line.subtotal()?)?)
        })
}

/// Formats a money amount as a plain decimal with the currency's fraction digits,
/// using `.` as the separator (e.g. `27.90`).
pub fn format_amount(money: &Money<'_, Currency>) -> String {
    Decimal::new(money.to_minor_units(), money.currency().exponent).to_string()
}

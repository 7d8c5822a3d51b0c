//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{BRL, Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::{Category, Product, ProductId, SpecialOffer},
};

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Product price (e.g., "20.00 BRL")
    pub price: String,

    /// Product image reference
    pub image: String,

    /// Product category
    pub category: Category,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Product {
            id: ProductId(fixture.id),
            name: fixture.name,
            price: Money::from_minor(minor_units, currency),
            image: fixture.image,
            category: fixture.category,
        })
    }
}

/// Special Offer Fixture
#[derive(Debug, Deserialize)]
pub struct OfferFixture {
    /// Offer id
    pub id: u32,

    /// Offer name
    pub name: String,

    /// Offer price (e.g., "27.90 BRL")
    pub price: String,

    /// Price before the offer (e.g., "41.00 BRL")
    pub original_price: String,

    /// Offer image reference
    pub image: String,
}

impl TryFrom<OfferFixture> for SpecialOffer<'_> {
    type Error = FixtureError;

    fn try_from(fixture: OfferFixture) -> Result<Self, Self::Error> {
        let (price_minor, price_currency) = parse_price(&fixture.price)?;
        let (original_minor, original_currency) = parse_price(&fixture.original_price)?;

        Ok(SpecialOffer {
            id: ProductId(fixture.id),
            name: fixture.name,
            price: Money::from_minor(price_minor, price_currency),
            original_price: Money::from_minor(original_minor, original_currency),
            image: fixture.image,
        })
    }
}

/// Parse price string (e.g., "27.90 BRL") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a non-negative decimal, or if the
/// currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "BRL" => BRL,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    if amount.scale() > currency.exponent {
        return Err(FixtureError::InvalidPrice(format!(
            "{s} has more than {} decimal places",
            currency.exponent
        )));
    }

    let minor_units = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .and_then(|value| value.normalize().to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_reads_brl() -> Result<(), FixtureError> {
        let (minor, currency) = parse_price("27.90 BRL")?;

        assert_eq!(minor, 2790);
        assert_eq!(currency, BRL);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("27.90BRL");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_negative_amounts() {
        let result = parse_price("-1.00 BRL");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_extra_fraction_digits() {
        let result = parse_price("20.005 BRL");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_accepts_fewer_fraction_digits() -> Result<(), FixtureError> {
        assert_eq!(parse_price("20 BRL")?.0, 2000);
        assert_eq!(parse_price("27.9 BRL")?.0, 2790);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_accepts_usd_and_eur() -> Result<(), FixtureError> {
        let (usd_minor, usd) = parse_price("1.00 USD")?;
        let (eur_minor, eur) = parse_price("2.50 EUR")?;

        assert_eq!(usd_minor, 100);
        assert_eq!(usd, USD);
        assert_eq!(eur_minor, 250);
        assert_eq!(eur, EUR);

        Ok(())
    }
}

//! Products

use std::{fmt, str::FromStr};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

/// Product identifier, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product category, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Mugs
    #[default]
    Canecas,

    /// Pens
    Canetas,

    /// Custom pieces
    Personalizados,

    /// Notebooks
    Cadernos,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Canecas,
        Category::Canetas,
        Category::Personalizados,
        Category::Cadernos,
    ];

    /// Upper-case label used in fixtures and the shell.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Canecas => "CANECAS",
            Category::Canetas => "CANETAS",
            Category::Personalizados => "PERSONALIZADOS",
            Category::Cadernos => "CADERNOS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown category label.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product price
    pub price: Money<'a, Currency>,

    /// Product image reference
    pub image: String,

    /// Product category
    pub category: Category,
}

/// The one-off product offered during checkout.
///
/// It is kept apart from the catalog products so it can only reach an order
/// through the upsell step.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialOffer<'a> {
    /// Offer id, never shared with a catalog product
    pub id: ProductId,

    /// Offer name
    pub name: String,

    /// Price charged when the offer is accepted
    pub price: Money<'a, Currency>,

    /// Price shown struck through next to the offer price
    pub original_price: Money<'a, Currency>,

    /// Offer image reference
    pub image: String,
}

impl<'a> SpecialOffer<'a> {
    /// Amount saved against the original price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the two prices use different currencies.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.original_price.sub(self.price)
    }

    /// Savings as a share of the original price.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the two prices use different currencies.
    pub fn savings_percent(&self) -> Result<Percentage, MoneyError> {
        let savings_minor = self.savings()?.to_minor_units();
        let original_minor = self.original_price.to_minor_units();

        if original_minor == 0 {
            return Ok(Percentage::from(0.0));
        }

        let savings_dec = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
        let original_dec = Decimal::from_i64(original_minor).unwrap_or(Decimal::ZERO);

        Ok(Percentage::from(savings_dec / original_dec))
    }
}

//! Fixtures
//!
//! Catalogs are described in YAML. A copy of the store's catalog is compiled in
//! and used when no file is given.

use std::{fs, path::Path};

use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{Catalog, CatalogError},
    fixtures::products::{OfferFixture, ProductFixture},
    products::Product,
};

pub mod products;

pub use products::parse_price;

/// Catalog compiled into the crate.
pub const BUILTIN_CATALOG: &str = include_str!("../../fixtures/catalog.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The parsed products do not form a valid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Top-level catalog document.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Store name used in order greetings
    pub store: String,

    /// Products, in display order
    pub products: Vec<ProductFixture>,

    /// Checkout upsell product
    pub special_offer: OfferFixture,
}

impl CatalogFixture {
    /// Convert into a validated catalog.
    ///
    /// The catalog currency is taken from the special offer price; every
    /// product must match it.
    ///
    /// # Errors
    ///
    /// Returns an error if a price cannot be parsed or the catalog is invalid.
    pub fn into_catalog(self) -> Result<Catalog<'static>, FixtureError> {
        let currency: &'static Currency = parse_price(&self.special_offer.price)?.1;

        let products = self
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let offer = self.special_offer.try_into()?;

        Ok(Catalog::new(self.store, currency, products, offer)?)
    }
}

/// Parse a catalog from YAML text.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or describes an invalid catalog.
pub fn from_yaml(contents: &str) -> Result<Catalog<'static>, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(contents)?;

    fixture.into_catalog()
}

/// Load a catalog from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or is not a valid catalog.
pub fn load(path: &Path) -> Result<Catalog<'static>, FixtureError> {
    let contents = fs::read_to_string(path)?;
    let catalog = from_yaml(&contents)?;

    debug!(path = %path.display(), products = catalog.len(), "loaded catalog");

    Ok(catalog)
}

/// The compiled-in catalog.
///
/// # Errors
///
/// Returns an error only if the bundled YAML is broken.
pub fn builtin() -> Result<Catalog<'static>, FixtureError> {
    from_yaml(BUILTIN_CATALOG)
}

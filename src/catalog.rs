//! Catalog

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::products::{Category, Product, ProductId, SpecialOffer};

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no products.
    #[error("catalog has no products")]
    Empty,

    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),

    /// The special offer reuses a catalog product id.
    #[error("special offer id {0} collides with a catalog product")]
    OfferCollision(ProductId),

    /// A price is not in the catalog currency (name, price currency, catalog currency).
    #[error("{0} is priced in {1}, but the catalog uses {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// The read-only product list a storefront sells from.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    store_name: String,
    products: Vec<Product<'a>>,
    index: FxHashMap<ProductId, usize>,
    special_offer: SpecialOffer<'a>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Build a catalog, checking ids and currencies.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if there are no products, an id is repeated,
    /// the offer id collides with a product, or any price uses another currency.
    pub fn new(
        store_name: impl Into<String>,
        currency: &'static Currency,
        products: Vec<Product<'a>>,
        special_offer: SpecialOffer<'a>,
    ) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            check_currency(&product.name, product.price.currency(), currency)?;

            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        if index.contains_key(&special_offer.id) {
            return Err(CatalogError::OfferCollision(special_offer.id));
        }

        check_currency(&special_offer.name, special_offer.price.currency(), currency)?;
        check_currency(
            &special_offer.name,
            special_offer.original_price.currency(),
            currency,
        )?;

        Ok(Self {
            store_name: store_name.into(),
            products,
            index,
            special_offer,
            currency,
        })
    }

    /// Name used to greet the store in order messages.
    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Look up a product by id. The special offer is not reachable here.
    pub fn product(&self, id: ProductId) -> Option<&Product<'a>> {
        self.index
            .get(&id)
            .and_then(|position| self.products.get(*position))
    }

    /// Products in `category`, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Product<'a>> {
        self.products
            .iter()
            .filter(move |product| product.category == category)
    }

    /// Categories in display order.
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// The checkout upsell product.
    pub fn special_offer(&self) -> &SpecialOffer<'a> {
        &self.special_offer
    }

    /// Currency every price in the catalog is expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Always `false` for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn check_currency(
    name: &str,
    actual: &Currency,
    expected: &'static Currency,
) -> Result<(), CatalogError> {
    if actual == expected {
        Ok(())
    } else {
        Err(CatalogError::CurrencyMismatch(
            name.to_string(),
            actual.iso_alpha_code,
            expected.iso_alpha_code,
        ))
    }
}

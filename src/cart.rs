//! Cart

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use tracing::debug;

use crate::{
    pricing::{PricingError, line_total, total_price},
    products::{Product, ProductId},
};

/// One cart entry: a product and how many of it were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    product: Product<'a>,
    quantity: NonZeroU32,
}

impl<'a> CartLine<'a> {
    /// Creates a new line for the given product and quantity.
    pub fn new(product: Product<'a>, quantity: NonZeroU32) -> Self {
        Self { product, quantity }
    }

    /// Returns the product of the line
    pub fn product(&self) -> &Product<'a> {
        &self.product
    }

    /// Returns the requested quantity
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Returns `quantity × price`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the subtotal overflows.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, PricingError> {
        line_total(&self.product.price, self.quantity)
    }
}

/// Cart
///
/// Lines keep insertion order and there is at most one line per product id.
/// The three mutators below are the only write path.
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add `quantity` of `product`.
    ///
    /// An existing line for the same id is incremented in place; otherwise a
    /// new line is appended.
    pub fn add_item(&mut self, product: &Product<'a>, quantity: NonZeroU32) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(quantity.get());

            debug!(product = %product.id, quantity = line.quantity.get(), "incremented cart line");
        } else {
            self.lines.push(CartLine::new(product.clone(), quantity));

            debug!(product = %product.id, quantity = quantity.get(), "appended cart line");
        }
    }

    /// Remove the line for `id`. Absent ids are ignored.
    pub fn remove_item(&mut self, id: ProductId) {
        let before = self.lines.len();

        self.lines.retain(|line| line.product.id != id);

        if self.lines.len() != before {
            debug!(product = %id, "removed cart line");
        }
    }

    /// Shift the quantity of `id` by `delta`, never going below one.
    ///
    /// Absent ids are ignored. Use [`Cart::remove_item`] to drop a line.
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) {
        let Some(line) = self.line_mut(id) else {
            return;
        };

        let target = i64::from(line.quantity.get()).saturating_add(delta);
        let clamped = u32::try_from(target.max(1)).unwrap_or(u32::MAX);

        line.quantity = NonZeroU32::new(clamped).unwrap_or(NonZeroU32::MIN);

        debug!(product = %id, delta, quantity = clamped, "updated cart line quantity");
    }

    /// Calculate the total of the cart: `Σ quantity × price` over all lines.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if there was a money arithmetic, overflow or
    /// currency mismatch error.
    pub fn total(&self) -> Result<Money<'a, Currency>, PricingError> {
        total_price(&self.lines, self.currency)
    }

    /// Get the line for a product, if present.
    pub fn line(&self, id: ProductId) -> Option<&CartLine<'a>> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine<'a>> {
        self.lines.iter_mut().find(|line| line.product.id == id)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine<'a>> {
        self.lines.iter()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::BRL;
    use testresult::TestResult;

    use crate::products::Category;

    use super::*;

    fn product<'a>(id: u32, minor: i64) -> Product<'a> {
        Product {
            id: ProductId(id),
            name: format!("Product {id}"),
            price: Money::from_minor(minor, BRL),
            image: String::new(),
            category: Category::Canecas,
        }
    }

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
    }

    fn quantities(cart: &Cart<'_>) -> Vec<(u32, u32)> {
        cart.iter()
            .map(|line| (line.product().id.0, line.quantity().get()))
            .collect()
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(BRL);

        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.currency(), BRL);
    }

    #[test]
    fn add_item_appends_new_lines_in_order() {
        let mut cart = Cart::new(BRL);

        cart.add_item(&product(3, 2000), qty(1));
        cart.add_item(&product(1, 2000), qty(2));

        assert_eq!(quantities(&cart), vec![(3, 1), (1, 2)]);
    }

    #[test]
    fn add_item_merges_repeated_product_at_first_position() {
        let mut cart = Cart::new(BRL);

        cart.add_item(&product(1, 2000), qty(1));
        cart.add_item(&product(2, 2000), qty(1));
        cart.add_item(&product(1, 2000), qty(3));
        cart.add_item(&product(1, 2000), qty(2));

        assert_eq!(quantities(&cart), vec![(1, 6), (2, 1)]);
    }

    #[test]
    fn remove_item_drops_matching_line() {
        let mut cart = Cart::new(BRL);

        cart.add_item(&product(1, 2000), qty(1));
        cart.add_item(&product(2, 2000), qty(1));
        cart.remove_item(ProductId(1));

        assert_eq!(quantities(&cart), vec![(2, 1)]);
    }

    #[test]
    fn remove_item_missing_is_noop() {
        let mut cart = Cart::new(BRL);

        cart.add_item(&product(1, 2000), qty(1));
        cart.add_item(&product(2, 2000), qty(4));
        cart.remove_item(ProductId(42));

        assert_eq!(quantities(&cart), vec![(1, 1), (2, 4)]);
    }

    #[test]
    fn update_quantity_never_drops_below_one() {
        let mut cart = Cart::new(BRL);

        cart.add_item(&product(1, 2000), qty(3));

        cart.update_quantity(ProductId(1), -1);
        assert_eq!(quantities(&cart), vec![(1, 2)]);

        cart.update_quantity(ProductId(1), -100);
        assert_eq!(quantities(&cart), vec![(1, 1)]);

        cart.update_quantity(ProductId(1), i64::MIN);
        assert_eq!(quantities(&cart), vec![(1, 1)]);
    }

    #[test]
    fn update_quantity_increments_and_saturates() {
        let mut cart = Cart::new(BRL);

        cart.add_item(&product(1, 2000), qty(1));

        cart.update_quantity(ProductId(1), 4);
        assert_eq!(quantities(&cart), vec![(1, 5)]);

        cart.update_quantity(ProductId(1), i64::MAX);
        assert_eq!(quantities(&cart), vec![(1, u32::MAX)]);
    }

    #[test]
    fn update_quantity_missing_is_noop() {
        let mut cart = Cart::new(BRL);

        cart.add_item(&product(1, 2000), qty(2));
        cart.update_quantity(ProductId(7), 5);

        assert_eq!(quantities(&cart), vec![(1, 2)]);
    }

    #[test]
    fn total_sums_quantity_times_price() -> TestResult {
        let mut cart = Cart::new(BRL);

        cart.add_item(&product(1, 2000), qty(2));
        cart.add_item(&product(4, 2000), qty(1));

        assert_eq!(cart.total()?, Money::from_minor(6000, BRL));

        Ok(())
    }

    #[test]
    fn total_of_empty_cart_is_zero() -> TestResult {
        let cart = Cart::new(BRL);

        assert_eq!(cart.total()?, Money::from_minor(0, BRL));

        Ok(())
    }

    #[test]
    fn total_tracks_every_mutation() -> TestResult {
        let mut cart = Cart::new(BRL);

        cart.add_item(&product(1, 1500), qty(2));
        cart.add_item(&product(2, 990), qty(1));
        assert_eq!(cart.total()?, Money::from_minor(3990, BRL));

        cart.update_quantity(ProductId(2), 2);
        assert_eq!(cart.total()?, Money::from_minor(5970, BRL));

        cart.remove_item(ProductId(1));
        assert_eq!(cart.total()?, Money::from_minor(2970, BRL));

        Ok(())
    }

    #[test]
    fn item_count_sums_quantities() {
        let mut cart = Cart::new(BRL);

        cart.add_item(&product(1, 2000), qty(2));
        cart.add_item(&product(2, 2000), qty(3));

        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn line_looks_up_by_id() {
        let mut cart = Cart::new(BRL);

        cart.add_item(&product(9, 2000), qty(2));

        assert_eq!(cart.line(ProductId(9)).map(|l| l.quantity().get()), Some(2));
        assert!(cart.line(ProductId(1)).is_none());
    }
}

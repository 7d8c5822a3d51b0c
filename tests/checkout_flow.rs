//! End-to-end checkout against the bundled catalog.
//!
//! Scenario:
//!
//! 1. Add product #1 (R$ 20.00) twice and product #4 (R$ 20.00) once
//! 2. Decrement #1 by one
//!    - Cart: [#1 x1, #4 x1], total R$ 40.00
//! 3. Finalize: the special offer (R$ 27.90) is presented
//! 4. Accept: the order message totals R$ 67.90
//!
//! The checkout returns to idle and the cart is left as it was.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::BRL};
use testresult::TestResult;

use storefront::{fixtures, prelude::*};

#[derive(Debug, Default)]
struct Outbox {
    orders: Vec<(OfferDecision, String)>,
}

impl OrderChannel for Outbox {
    fn deliver(&mut self, order: &CompletedOrder<'_>) -> Result<(), ChannelError> {
        self.orders
            .push((order.decision, order.message.text().to_string()));

        Ok(())
    }
}

fn qty(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
}

fn line_quantities(session: &Session<'_>) -> Vec<(u32, u32)> {
    session
        .cart()
        .iter()
        .map(|line| (line.product().id.0, line.quantity().get()))
        .collect()
}

#[test]
fn accept_offer_end_to_end() -> TestResult {
    let catalog = fixtures::builtin()?;
    let mut session = Session::new(&catalog);
    let mut outbox = Outbox::default();

    session.add(ProductId(1), qty(2))?;
    session.add(ProductId(4), NonZeroU32::MIN)?;
    session.adjust(ProductId(1), -1);

    assert_eq!(line_quantities(&session), vec![(1, 1), (4, 1)]);
    assert_eq!(session.cart().total()?, Money::from_minor(4000, BRL));

    assert_eq!(session.finalize(), CheckoutState::OfferPending);

    let order = session
        .accept_offer(&mut outbox)?
        .ok_or("expected a completed order")?;

    assert_eq!(order.message.total(), Money::from_minor(6790, BRL));
    assert!(
        order
            .message
            .text()
            .ends_with("*Total do Pedido: R$ 67.90*"),
        "{}",
        order.message
    );

    assert_eq!(session.checkout_state(), CheckoutState::Idle);
    assert_eq!(line_quantities(&session), vec![(1, 1), (4, 1)]);
    assert_eq!(session.cart().total()?, Money::from_minor(4000, BRL));
    assert_eq!(outbox.orders.len(), 1);

    Ok(())
}

#[test]
fn decline_offer_sends_cart_total_only() -> TestResult {
    let catalog = fixtures::builtin()?;
    let mut session = Session::new(&catalog);
    let mut outbox = Outbox::default();

    session.add(ProductId(1), qty(2))?;
    session.add(ProductId(4), NonZeroU32::MIN)?;
    session.finalize();

    let order = session
        .decline_offer(&mut outbox)?
        .ok_or("expected a completed order")?;

    assert_eq!(order.message.total(), Money::from_minor(6000, BRL));
    assert!(!order.message.text().contains("OFERTA ESPECIAL"));

    Ok(())
}

#[test]
fn expected_message_for_bundled_catalog() -> TestResult {
    let catalog = fixtures::builtin()?;
    let mut session = Session::new(&catalog);
    let mut outbox = Outbox::default();

    session.add(ProductId(1), qty(2))?;
    session.add(ProductId(4), NonZeroU32::MIN)?;
    session.finalize();
    session.accept_offer(&mut outbox)?;

    let (decision, text) = outbox.orders.first().ok_or("nothing delivered")?;

    assert_eq!(*decision, OfferDecision::Accept);
    assert_eq!(
        text,
        "*Olá, TH Personalizados! Gostaria de fazer um pedido:*\n\
         \n\
         • 2x Caneca Coleção Especial 01 - R$ 40.00\n\
         • 1x Caneta Fofa Personagens 01 - R$ 20.00\n\
         \n\
         *✨ OFERTA ESPECIAL ADICIONADA:*\n\
         • 1x Lápis de Cor Redondo 24 Cores Faber-Castell - R$ 27.90\n\
         \n\
         *Total do Pedido: R$ 87.90*"
    );

    Ok(())
}

#[test]
fn checkout_on_empty_cart_never_leaves_idle() -> TestResult {
    let catalog = fixtures::builtin()?;
    let mut session = Session::new(&catalog);
    let mut outbox = Outbox::default();

    assert_eq!(session.finalize(), CheckoutState::Idle);
    assert!(session.accept_offer(&mut outbox)?.is_none());
    assert!(session.decline_offer(&mut outbox)?.is_none());
    assert!(outbox.orders.is_empty());

    Ok(())
}

#[test]
fn removing_everything_makes_checkout_a_noop_again() -> TestResult {
    let catalog = fixtures::builtin()?;
    let mut session = Session::new(&catalog);

    session.add(ProductId(8), NonZeroU32::MIN)?;
    session.remove(ProductId(8));
    session.remove(ProductId(8));

    assert!(session.cart().is_empty());
    assert_eq!(session.finalize(), CheckoutState::Idle);

    Ok(())
}

//! End-to-end storefront scenarios: build, checkout, pay, finalize.
//!
//! Payment runs against the simulated processor with a recording sleeper, so
//! no real time passes.
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use smoothie_commerce::prelude::*;

#[derive(Default)]
struct RecordingSleeper {
    calls: Mutex<Vec<Duration>>,
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.calls.lock().unwrap().push(duration);
    }
}

fn fill_info(checkout: &mut CheckoutFlow) {
    checkout.set_field(Field::Name, "María José Vargas").unwrap();
    checkout.set_field(Field::Email, "mjose@example.cr").unwrap();
    checkout.set_field(Field::Phone, "8700-1234").unwrap();
    checkout.set_field(Field::Address, "Heredia, frente a la iglesia").unwrap();
    checkout.set_field(Field::Notes, "Sin hielo").unwrap();
    checkout.submit_info().unwrap();
}

#[tokio::test]
async fn custom_build_through_confirmation() {
    let mut store = Storefront::default();

    let builder = store.builder_mut();
    builder.select_base(&IngredientId::new("water")).unwrap();
    builder.next().unwrap();
    builder.toggle_fruit(&IngredientId::new("mango")).unwrap();
    builder.toggle_fruit(&IngredientId::new("strawberry")).unwrap();
    builder.next().unwrap();
    assert_eq!(builder.price(), Money::new(1350));

    let item = store.add_custom_build().unwrap();
    assert_eq!(item.name, "Custom: 🥭🍓");
    assert!(store.cart().is_open());

    let totals = store.totals();
    assert_eq!(totals.subtotal, Money::new(1350));
    assert_eq!(totals.shipping, Money::new(2000));
    assert_eq!(totals.grand_total, Money::new(3350));

    let checkout = store.begin_checkout().unwrap();
    assert_eq!(checkout.stage(), CheckoutStage::Info);
    fill_info(checkout);
    assert_eq!(checkout.step_label(), "Step 2 of 3");
    checkout.set_field(Field::CardNumber, "4111 1111 1111 4242").unwrap();
    checkout.set_field(Field::CardExpiry, "08/28").unwrap();
    checkout.set_field(Field::CardCvv, "321").unwrap();

    let sleeper = Arc::new(RecordingSleeper::default());
    let processor = SimulatedProcessor::with_sleeper(
        sleeper.clone(),
        store.config().payment.delay(),
    );
    let receipt = store.submit_payment(&processor).await.unwrap();
    assert_eq!(receipt.totals.grand_total, Money::new(3350));
    assert_eq!(receipt.payment.card_last4.as_deref(), Some("4242"));
    assert_eq!(receipt.contact.notes, "Sin hielo");
    assert!(receipt.greeting().contains("María,"));

    assert_eq!(*sleeper.calls.lock().unwrap(), vec![Duration::from_millis(2000)]);
    assert_eq!(store.checkout_stage(), Some(CheckoutStage::Confirmation));
    assert!(store
        .notices()
        .iter()
        .any(|n| n.kind == NoticeKind::Celebrate));

    let receipt = store.finalize_checkout().unwrap();
    assert_eq!(receipt.lines.len(), 1);
    assert!(store.cart().is_empty());
    assert!(!store.cart().is_open());

    // Next checkout starts from scratch.
    store.add_by_id(&ItemId::new("green-goddess")).unwrap();
    let checkout = store.begin_checkout().unwrap();
    assert_eq!(checkout.stage(), CheckoutStage::Info);
    assert_eq!(checkout.contact(), &ContactInfo::default());
    assert!(checkout.errors().is_empty());
}

#[tokio::test]
async fn cash_tender_must_cover_total() {
    let mut store = Storefront::default();
    // 2 × 4200 + 3600 = 12000, free shipping.
    store.add_by_id(&ItemId::new("berry-blast")).unwrap();
    store.add_by_id(&ItemId::new("berry-blast")).unwrap();
    store.add_by_id(&ItemId::new("pineapple-dream")).unwrap();
    assert_eq!(store.totals().grand_total, Money::new(12_000));
    assert!(store.totals().has_free_shipping());

    let checkout = store.begin_checkout().unwrap();
    fill_info(checkout);
    checkout.select_payment_method(PaymentMethodKind::Cash).unwrap();
    checkout.select_cash_option(CashOption::Tendered).unwrap();
    checkout.set_field(Field::TenderedAmount, "10000").unwrap();

    let processor = SimulatedProcessor::with_sleeper(
        Arc::new(RecordingSleeper::default()),
        Duration::from_millis(2000),
    );
    let err = store.submit_payment(&processor).await.unwrap_err();
    assert_eq!(err, CommerceError::Checkout(CheckoutError::Validation { count: 1 }));
    assert_eq!(store.checkout_stage(), Some(CheckoutStage::Payment));

    let checkout = store.checkout_mut().unwrap();
    checkout.set_field(Field::TenderedAmount, "15000").unwrap();
    assert!(checkout.errors().is_empty());

    let receipt = store.submit_payment(&processor).await.unwrap();
    assert_eq!(receipt.change_due(), Some(Money::new(3000)));
}

#[test]
fn quantity_edits_reprice_checkout() {
    let mut store = Storefront::default();
    store.add_by_id(&ItemId::new("coco-paradise")).unwrap();
    store.begin_checkout().unwrap();

    store
        .cart_mut()
        .update_quantity(&ItemId::new("coco-paradise"), 3);
    let checkout_totals = store.checkout().unwrap().totals(store.cart());
    assert_eq!(checkout_totals.subtotal, Money::new(10_500));
    assert_eq!(checkout_totals.shipping, Money::zero());

    store
        .cart_mut()
        .update_quantity(&ItemId::new("coco-paradise"), 0);
    assert!(store.cart().is_empty());
}

//! Run a scripted order through checkout.

use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use serde::{Deserialize, Serialize};
use smoothie_commerce::checkout::{
    CheckoutFlow, ContactInfo, Field, FieldErrors, PaymentMethod, Receipt, SimulatedProcessor,
    TokioSleeper,
};
use smoothie_commerce::error::CheckoutError;
use smoothie_commerce::{CommerceError, ItemId, Storefront};

use super::build::apply_selection;
use super::OrderArgs;
use crate::context::Context;
use crate::output::format_price;

/// An order file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFile {
    /// Menu and signature items.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Build-your-own smoothies.
    #[serde(default)]
    pub builds: Vec<CustomBuild>,
    pub contact: ContactInfo,
    #[serde(default)]
    pub payment: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomBuild {
    pub base: String,
    #[serde(default)]
    pub fruits: Vec<String>,
    #[serde(default)]
    pub addons: Vec<String>,
}

impl OrderFile {
    /// Load an order from TOML or JSON.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read order file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON order: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML order: {}", path))
        }
    }
}

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.file);
    let order = OrderFile::load(&path.to_string_lossy())?;
    let mut store = ctx.storefront();

    ctx.output.header("Filling the cart");
    fill_cart(&mut store, &order, ctx)?;
    print_cart(&store, ctx);

    ctx.output.header("Checkout");
    let checkout = store.begin_checkout()?;
    enter_contact(checkout, &order.contact, ctx)?;
    enter_payment(checkout, &order.payment)?;
    ctx.output.step(
        checkout.stage().number() as usize,
        3,
        order.payment.kind().display_name(),
    );

    let delay = if args.no_delay {
        Duration::ZERO
    } else {
        ctx.storefront_config().payment.delay()
    };
    let processor = SimulatedProcessor::with_sleeper(TokioSleeper, delay);

    let spinner = ctx.output.spinner("Procesando...");
    let result = store.submit_payment(&processor).await.map(|_| ());
    spinner.finish_and_clear();

    if let Err(e) = result {
        if let CommerceError::Checkout(CheckoutError::Validation { .. }) = e {
            if let Some(checkout) = store.checkout() {
                report_field_errors(checkout.errors(), ctx);
            }
        }
        show_notices(&mut store, ctx);
        return Err(e).context("Payment was not accepted");
    }
    show_notices(&mut store, ctx);

    let receipt = store.finalize_checkout()?;
    print_receipt(&receipt, ctx);

    Ok(())
}

fn fill_cart(store: &mut Storefront, order: &OrderFile, ctx: &Context) -> Result<()> {
    for item in &order.items {
        let id = ItemId::new(item.id.as_str());
        for _ in 0..item.quantity {
            store
                .add_by_id(&id)
                .with_context(|| format!("Cannot add {}", item.id))?;
        }
    }
    show_notices(store, ctx);

    for build in &order.builds {
        apply_selection(
            store.builder_mut(),
            &build.base,
            &build.fruits,
            &build.addons,
            &ctx.output,
        )?;
        let added = store.add_custom_build();
        show_notices(store, ctx);
        added?;
    }

    if store.cart().is_empty() {
        bail!("Order has no items");
    }
    Ok(())
}

fn enter_contact(checkout: &mut CheckoutFlow, contact: &ContactInfo, ctx: &Context) -> Result<()> {
    for field in Field::CONTACT {
        let value = contact.get(field).unwrap_or_default();
        checkout.set_field(field, value)?;
    }

    if let Err(e) = checkout.submit_info() {
        report_field_errors(checkout.errors(), ctx);
        return Err(e).context("Delivery details are incomplete");
    }
    ctx.output.debug(&checkout.step_label());
    Ok(())
}

fn enter_payment(checkout: &mut CheckoutFlow, payment: &PaymentMethod) -> Result<(), CheckoutError> {
    checkout.select_payment_method(payment.kind())?;
    match payment {
        PaymentMethod::Card(card) => {
            checkout.set_field(Field::CardNumber, card.number.as_str())?;
            checkout.set_field(Field::CardExpiry, card.expiry.as_str())?;
            checkout.set_field(Field::CardCvv, card.cvv.as_str())?;
        }
        PaymentMethod::Sinpe => {}
        PaymentMethod::Cash(cash) => {
            checkout.select_cash_option(cash.option)?;
            checkout.set_field(Field::TenderedAmount, cash.tendered.as_str())?;
        }
    }
    Ok(())
}

fn report_field_errors(errors: &FieldErrors, ctx: &Context) {
    for (field, error) in errors.iter() {
        ctx.output.warn(&format!("{}: {}", field, error));
    }
}

fn show_notices(store: &mut Storefront, ctx: &Context) {
    for notice in store.take_notices() {
        ctx.output.notice(&notice);
    }
}

fn print_cart(store: &Storefront, ctx: &Context) {
    if ctx.output.is_json() {
        return;
    }
    for line in store.cart().lines() {
        let quantity = format!("x{}", line.quantity);
        let total = format_price(line.total(), 8);
        ctx.output.table_row(
            &[
                line.emoji.as_str(),
                line.name.as_str(),
                quantity.as_str(),
                total.as_str(),
            ],
            &[2, 24, 4, 8],
        );
    }

    let totals = store.totals();
    ctx.output.kv("subtotal", &totals.subtotal.display());
    if totals.has_free_shipping() {
        ctx.output.kv("shipping", "gratis");
    } else {
        ctx.output.kv("shipping", &totals.shipping.display());
        let remaining = store
            .config()
            .shipping
            .remaining_for_free(totals.subtotal);
        ctx.output
            .debug(&format!("{} more for free shipping", remaining.display()));
    }
    ctx.output.kv("total", &totals.grand_total.display());
}

fn print_receipt(receipt: &Receipt, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(receipt);
        return;
    }

    ctx.output.header("¡Pedido Confirmado!");
    ctx.output.info(&receipt.greeting());
    ctx.output.kv("order", receipt.order_id.as_str());
    ctx.output.kv("placed", &receipt.placed_at.to_rfc3339());
    ctx.output.kv("items", &receipt.item_count().to_string());
    ctx.output.kv("total", &receipt.totals.grand_total.display());
    ctx.output.kv("payment", receipt.payment.method.display_name());
    if let Some(ref last4) = receipt.payment.card_last4 {
        ctx.output.kv("card", &format!("•••• {}", last4));
    }
    if let Some(change) = receipt.change_due() {
        ctx.output.kv("change", &change.display());
    }
    ctx.output.success(&receipt.reference);
}

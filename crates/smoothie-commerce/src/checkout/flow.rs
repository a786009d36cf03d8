//! Checkout flow state machine.

use crate::cart::{Cart, OrderTotals};
use crate::checkout::{
    CashOption, ContactInfo, Field, FieldErrors, PaymentConfirmation, PaymentMethod,
    PaymentMethodKind, PaymentProcessor, PaymentRequest, Receipt,
};
use crate::config::ShippingPolicy;
use crate::error::{CheckoutError, PaymentError};
use crate::ids::OrderId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Stages of the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    /// Contact and delivery details.
    Info,
    /// Payment method selection.
    Payment,
    /// Waiting on the payment processor.
    Processing,
    /// Order placed.
    Confirmation,
}

impl CheckoutStage {
    /// Number of stages shown to the customer.
    pub const VISIBLE_STEPS: u8 = 3;

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStage::Info => "info",
            CheckoutStage::Payment => "payment",
            CheckoutStage::Processing => "processing",
            CheckoutStage::Confirmation => "confirmation",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStage::Info => "Delivery details",
            CheckoutStage::Payment => "Payment",
            CheckoutStage::Processing => "Processing",
            CheckoutStage::Confirmation => "Confirmation",
        }
    }

    /// Get the step number (1-indexed). Processing shares the payment step.
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStage::Info => 1,
            CheckoutStage::Payment | CheckoutStage::Processing => 2,
            CheckoutStage::Confirmation => 3,
        }
    }
}

impl std::fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "stage", rename_all = "snake_case")]
enum State {
    Info,
    Payment,
    Processing,
    Confirmation { receipt: Box<Receipt> },
}

/// Checkout flow state.
///
/// Created when the customer leaves the cart for checkout and dropped when
/// they cancel or finalize. Totals are never stored: every read prices the
/// cart it is given.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckoutFlow {
    state: State,
    contact: ContactInfo,
    payment: PaymentMethod,
    errors: FieldErrors,
    #[serde(skip)]
    shipping: ShippingPolicy,
}

impl CheckoutFlow {
    /// Start a new checkout at the Info stage.
    pub fn new(shipping: ShippingPolicy) -> Self {
        Self {
            state: State::Info,
            contact: ContactInfo::default(),
            payment: PaymentMethod::default(),
            errors: FieldErrors::new(),
            shipping,
        }
    }

    pub fn stage(&self) -> CheckoutStage {
        match self.state {
            State::Info => CheckoutStage::Info,
            State::Payment => CheckoutStage::Payment,
            State::Processing => CheckoutStage::Processing,
            State::Confirmation { .. } => CheckoutStage::Confirmation,
        }
    }

    /// Progress label, e.g. "Step 2 of 3".
    pub fn step_label(&self) -> String {
        format!(
            "Step {} of {}",
            self.stage().number(),
            CheckoutStage::VISIBLE_STEPS
        )
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn payment(&self) -> &PaymentMethod {
        &self.payment
    }

    /// Field errors from the last failed submission, minus edited fields.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn shipping_policy(&self) -> &ShippingPolicy {
        &self.shipping
    }

    /// Price the cart under this checkout's shipping policy.
    pub fn totals(&self, cart: &Cart) -> OrderTotals {
        cart.totals(&self.shipping)
    }

    /// Whether leaving checkout for the cart is allowed.
    pub fn can_cancel(&self) -> bool {
        self.stage() == CheckoutStage::Info
    }

    /// Edit a form field and clear its error.
    ///
    /// Contact fields can only change during Info and payment fields only
    /// during Payment.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), CheckoutError> {
        if field.is_contact() {
            self.require(CheckoutStage::Info, "edit delivery details")?;
            self.contact.set(field, value);
        } else {
            self.require(CheckoutStage::Payment, "edit payment details")?;
            self.payment.set_field(field, value)?;
        }
        self.errors.remove(field);
        debug!(field = field.as_str(), "checkout field updated");
        Ok(())
    }

    /// Validate the contact form and move to Payment.
    pub fn submit_info(&mut self) -> Result<(), CheckoutError> {
        self.require(CheckoutStage::Info, "submit delivery details")?;

        let errors = self.contact.validate();
        if !errors.is_empty() {
            let count = errors.len();
            warn!(count, "delivery details rejected");
            self.errors = errors;
            return Err(CheckoutError::Validation { count });
        }

        self.errors.clear();
        self.state = State::Payment;
        info!(stage = %self.stage(), "delivery details accepted");
        Ok(())
    }

    /// Return from Payment to Info, keeping everything entered so far.
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        self.require(CheckoutStage::Payment, "go back")?;
        self.errors.retain(|field| field.is_contact());
        self.state = State::Info;
        debug!("checkout back to info");
        Ok(())
    }

    /// Switch payment method. Switching to a different method discards the
    /// previous method's details.
    pub fn select_payment_method(&mut self, kind: PaymentMethodKind) -> Result<(), CheckoutError> {
        self.require(CheckoutStage::Payment, "change payment method")?;
        if self.payment.kind() != kind {
            self.payment = PaymentMethod::from_kind(kind);
            self.errors.retain(|field| field.is_contact());
            debug!(method = kind.as_str(), "payment method selected");
        }
        Ok(())
    }

    /// Choose between exact cash and a tendered amount.
    pub fn select_cash_option(&mut self, option: CashOption) -> Result<(), CheckoutError> {
        self.require(CheckoutStage::Payment, "change cash option")?;
        match &mut self.payment {
            PaymentMethod::Cash(cash) => {
                cash.option = option;
                self.errors.remove(Field::TenderedAmount);
                debug!(option = option.as_str(), "cash option selected");
                Ok(())
            }
            other => Err(CheckoutError::FieldNotApplicable {
                field: "cash_option",
                method: other.kind().as_str(),
            }),
        }
    }

    /// Change owed for the current cart, recomputed on every call.
    pub fn change_due(&self, cart: &Cart) -> Option<Money> {
        self.payment.change_due(self.totals(cart).grand_total)
    }

    /// Validate the payment details and enter Processing.
    ///
    /// Returns the request to hand to a processor. The request snapshots the
    /// cart's lines and totals; the receipt is built from that snapshot. The
    /// flow stays in Processing until [`CheckoutFlow::complete_payment`] or
    /// [`CheckoutFlow::abandon_payment`] is called.
    pub fn begin_payment(&mut self, cart: &Cart) -> Result<PaymentRequest, CheckoutError> {
        self.require(CheckoutStage::Payment, "submit payment")?;
        if cart.is_empty() {
            warn!("payment submitted for an empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        let totals = self.totals(cart);
        let errors = self.payment.validate(totals.grand_total);
        if !errors.is_empty() {
            let count = errors.len();
            warn!(count, method = self.payment.kind().as_str(), "payment details rejected");
            self.errors = errors;
            return Err(CheckoutError::Validation { count });
        }

        self.errors.clear();
        self.state = State::Processing;

        let request = PaymentRequest {
            order_id: OrderId::generate(),
            amount: totals.grand_total,
            payment: self.payment.summary(totals.grand_total),
            lines: cart.lines().to_vec(),
            totals,
        };
        info!(
            order_id = %request.order_id,
            amount = request.amount.amount,
            method = request.payment.method.as_str(),
            "payment processing"
        );
        Ok(request)
    }

    /// Record the processor's answer.
    ///
    /// Approval moves to Confirmation and builds the receipt from the
    /// request. A failure returns to Payment so the customer can retry.
    pub fn complete_payment(
        &mut self,
        request: PaymentRequest,
        outcome: Result<PaymentConfirmation, PaymentError>,
    ) -> Result<&Receipt, CheckoutError> {
        self.require(CheckoutStage::Processing, "complete payment")?;

        let confirmation = match outcome {
            Ok(confirmation) => confirmation,
            Err(e) => {
                warn!(order_id = %request.order_id, error = %e, "payment failed");
                self.state = State::Payment;
                return Err(CheckoutError::PaymentFailed(e));
            }
        };

        let receipt = Receipt {
            order_id: request.order_id,
            placed_at: confirmation.processed_at,
            contact: self.contact.clone(),
            lines: request.lines,
            totals: request.totals,
            payment: request.payment,
            reference: confirmation.reference,
        };
        info!(
            order_id = %receipt.order_id,
            grand_total = receipt.totals.grand_total.amount,
            "order confirmed"
        );

        self.state = State::Confirmation {
            receipt: Box::new(receipt),
        };
        self.receipt().ok_or(CheckoutError::InvalidTransition {
            stage: CheckoutStage::Confirmation,
            action: "read the receipt",
        })
    }

    /// Give up on an in-flight payment and return to Payment.
    pub fn abandon_payment(&mut self) -> Result<(), CheckoutError> {
        self.require(CheckoutStage::Processing, "abandon payment")?;
        self.state = State::Payment;
        warn!("payment abandoned");
        Ok(())
    }

    /// Validate, charge through `processor`, and confirm.
    ///
    /// The flow is borrowed for the whole call, so a second submission
    /// cannot start while one is in flight. If the returned future is dropped
    /// before the processor answers, the flow goes back to Payment.
    pub async fn submit_payment<P>(&mut self, cart: &Cart, processor: &P) -> Result<&Receipt, CheckoutError>
    where
        P: PaymentProcessor + ?Sized,
    {
        let request = self.begin_payment(cart)?;
        let outcome = {
            let pending = PendingPayment::new(&mut self.state);
            let outcome = processor.process(&request).await;
            pending.settle();
            outcome
        };
        self.complete_payment(request, outcome)
    }

    /// The receipt, once confirmed.
    pub fn receipt(&self) -> Option<&Receipt> {
        match &self.state {
            State::Confirmation { receipt } => Some(receipt),
            _ => None,
        }
    }

    /// Check if checkout is complete.
    pub fn is_complete(&self) -> bool {
        self.stage() == CheckoutStage::Confirmation
    }

    fn require(&self, stage: CheckoutStage, action: &'static str) -> Result<(), CheckoutError> {
        let current = self.stage();
        if current == stage {
            Ok(())
        } else {
            Err(CheckoutError::InvalidTransition {
                stage: current,
                action,
            })
        }
    }
}

/// Puts a Processing flow back to Payment if the processor call never
/// returns, e.g. when the submitting future is cancelled.
struct PendingPayment<'a> {
    state: &'a mut State,
    settled: bool,
}

impl<'a> PendingPayment<'a> {
    fn new(state: &'a mut State) -> Self {
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for PendingPayment<'_> {
    fn drop(&mut self) {
        if !self.settled && *self.state == State::Processing {
            warn!("payment interrupted, back to payment stage");
            *self.state = State::Payment;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_item;
    use crate::checkout::SimulatedProcessor;
    use crate::checkout::{Sleeper, TokioSleeper};
    use crate::error::FieldError;
    use crate::ids::ItemId;
    use async_trait::async_trait;
    use std::time::Duration;

    struct NoopSleeper;

    #[async_trait]
    impl Sleeper for NoopSleeper {
        async fn sleep(&self, _duration: Duration) {}
    }

    struct DecliningProcessor;

    #[async_trait]
    impl PaymentProcessor for DecliningProcessor {
        async fn process(&self, _request: &PaymentRequest) -> Result<PaymentConfirmation, PaymentError> {
            Err(PaymentError::Declined("insufficient funds".to_string()))
        }
    }

    fn processor() -> SimulatedProcessor<NoopSleeper> {
        SimulatedProcessor::with_sleeper(NoopSleeper, Duration::from_millis(2000))
    }

    fn cart_worth(items: &[&str]) -> Cart {
        let mut cart = Cart::new();
        for id in items {
            cart.add_item(find_item(&ItemId::new(*id)).unwrap());
        }
        cart
    }

    fn fill_contact(flow: &mut CheckoutFlow) {
        flow.set_field(Field::Name, "Ana Solís").unwrap();
        flow.set_field(Field::Email, "ana@example.cr").unwrap();
        flow.set_field(Field::Phone, "8888-0000").unwrap();
        flow.set_field(Field::Address, "Escazú centro").unwrap();
    }

    fn at_payment() -> CheckoutFlow {
        let mut flow = CheckoutFlow::new(ShippingPolicy::default());
        fill_contact(&mut flow);
        flow.submit_info().unwrap();
        flow
    }

    /// Cart priced so the grand total is exactly 12000.
    fn twelve_thousand_cart() -> (Cart, CheckoutFlow) {
        let mut cart = Cart::new();
        let item = crate::catalog::CatalogItem::new(
            ItemId::new("party-pack"),
            "Party Pack",
            "🎉",
            Money::new(12_000),
            "#FF6B35",
        );
        cart.add_item(&item);
        let flow = at_payment();
        assert_eq!(flow.totals(&cart).grand_total, Money::new(12_000));
        (cart, flow)
    }

    #[test]
    fn test_new_flow_starts_at_info() {
        let flow = CheckoutFlow::new(ShippingPolicy::default());
        assert_eq!(flow.stage(), CheckoutStage::Info);
        assert_eq!(flow.step_label(), "Step 1 of 3");
        assert!(flow.errors().is_empty());
        assert!(flow.can_cancel());
        assert!(flow.receipt().is_none());
    }

    #[test]
    fn test_submit_info_requires_fields() {
        let mut flow = CheckoutFlow::new(ShippingPolicy::default());
        flow.set_field(Field::Email, "bad-email").unwrap();

        let err = flow.submit_info().unwrap_err();
        assert_eq!(err, CheckoutError::Validation { count: 4 });
        assert_eq!(flow.stage(), CheckoutStage::Info);
        assert_eq!(flow.errors().get(Field::Email), Some(&FieldError::InvalidEmail));
        assert!(flow.errors().contains(Field::Name));
    }

    #[test]
    fn test_editing_clears_field_error() {
        let mut flow = CheckoutFlow::new(ShippingPolicy::default());
        flow.submit_info().unwrap_err();
        assert!(flow.errors().contains(Field::Phone));

        flow.set_field(Field::Phone, "8888-0000").unwrap();
        assert!(!flow.errors().contains(Field::Phone));
        assert!(flow.errors().contains(Field::Name));
    }

    #[test]
    fn test_info_to_payment_and_back_keeps_fields() {
        let mut flow = at_payment();
        assert_eq!(flow.stage(), CheckoutStage::Payment);
        assert_eq!(flow.step_label(), "Step 2 of 3");
        assert!(!flow.can_cancel());

        flow.back().unwrap();
        assert_eq!(flow.stage(), CheckoutStage::Info);
        assert_eq!(flow.contact().name, "Ana Solís");
        assert_eq!(flow.contact().email, "ana@example.cr");
    }

    #[test]
    fn test_stage_guards() {
        let mut flow = CheckoutFlow::new(ShippingPolicy::default());
        assert_eq!(
            flow.back(),
            Err(CheckoutError::InvalidTransition {
                stage: CheckoutStage::Info,
                action: "go back"
            })
        );
        assert!(flow.set_field(Field::CardNumber, "4111").is_err());
        assert!(flow.select_payment_method(PaymentMethodKind::Cash).is_err());
        assert!(flow.begin_payment(&Cart::new()).is_err());

        let mut flow = at_payment();
        assert!(flow.set_field(Field::Name, "Otra").is_err());
        assert!(flow.submit_info().is_err());
    }

    #[test]
    fn test_totals_follow_cart() {
        let flow = at_payment();
        let mut cart = cart_worth(&["mango-madness"]);
        let before = flow.totals(&cart);
        cart.add_item(find_item(&ItemId::new("mango-madness")).unwrap());
        let after = flow.totals(&cart);
        assert_eq!(after.subtotal, before.subtotal * 2);
    }

    #[test]
    fn test_switching_method_replaces_details() {
        let mut flow = at_payment();
        flow.set_field(Field::CardNumber, "4111111111111111").unwrap();
        flow.select_payment_method(PaymentMethodKind::Cash).unwrap();
        flow.select_payment_method(PaymentMethodKind::Card).unwrap();
        assert_eq!(flow.payment(), &PaymentMethod::default());

        // Re-selecting the current method keeps its details.
        flow.set_field(Field::CardNumber, "4111111111111111").unwrap();
        flow.select_payment_method(PaymentMethodKind::Card).unwrap();
        assert_ne!(flow.payment(), &PaymentMethod::default());
    }

    #[test]
    fn test_cash_option_only_for_cash() {
        let mut flow = at_payment();
        assert_eq!(
            flow.select_cash_option(CashOption::Tendered),
            Err(CheckoutError::FieldNotApplicable {
                field: "cash_option",
                method: "card"
            })
        );
        flow.select_payment_method(PaymentMethodKind::Cash).unwrap();
        assert!(flow.select_cash_option(CashOption::Tendered).is_ok());
    }

    #[test]
    fn test_cash_tender_with_change() {
        let (cart, mut flow) = twelve_thousand_cart();
        flow.select_payment_method(PaymentMethodKind::Cash).unwrap();
        flow.select_cash_option(CashOption::Tendered).unwrap();
        flow.set_field(Field::TenderedAmount, "15000").unwrap();
        assert_eq!(flow.change_due(&cart), Some(Money::new(3000)));

        let request = flow.begin_payment(&cart).unwrap();
        assert_eq!(flow.stage(), CheckoutStage::Processing);
        assert_eq!(flow.step_label(), "Step 2 of 3");
        assert_eq!(request.amount, Money::new(12_000));
        assert_eq!(request.payment.change_due, Some(Money::new(3000)));
    }

    #[test]
    fn test_cash_tender_below_total_blocks() {
        let (cart, mut flow) = twelve_thousand_cart();
        flow.select_payment_method(PaymentMethodKind::Cash).unwrap();
        flow.select_cash_option(CashOption::Tendered).unwrap();
        flow.set_field(Field::TenderedAmount, "10000").unwrap();

        let err = flow.begin_payment(&cart).unwrap_err();
        assert_eq!(err, CheckoutError::Validation { count: 1 });
        assert_eq!(flow.stage(), CheckoutStage::Payment);
        assert_eq!(
            flow.errors().get(Field::TenderedAmount),
            Some(&FieldError::BelowTotal {
                total: Money::new(12_000)
            })
        );
        assert_eq!(flow.change_due(&cart), None);
    }

    #[test]
    fn test_card_requires_details() {
        let cart = cart_worth(&["mango-madness"]);
        let mut flow = at_payment();
        assert_eq!(
            flow.begin_payment(&cart),
            Err(CheckoutError::Validation { count: 3 })
        );
        assert_eq!(flow.stage(), CheckoutStage::Payment);
    }

    #[tokio::test]
    async fn test_submit_payment_confirms() {
        let cart = cart_worth(&["mango-madness", "mango-madness"]);
        let mut flow = at_payment();
        flow.select_payment_method(PaymentMethodKind::Sinpe).unwrap();

        let receipt = flow.submit_payment(&cart, &processor()).await.unwrap();
        assert_eq!(receipt.lines, cart.lines().to_vec());
        assert_eq!(receipt.totals, cart.totals(&ShippingPolicy::default()));
        assert!(receipt.reference.starts_with("SIM-ORD-"));

        assert_eq!(flow.stage(), CheckoutStage::Confirmation);
        assert_eq!(flow.step_label(), "Step 3 of 3");
        assert!(flow.is_complete());
        assert!(flow.back().is_err());
        assert!(flow.begin_payment(&cart).is_err());
    }

    #[tokio::test]
    async fn test_failed_payment_returns_to_payment() {
        let cart = cart_worth(&["mango-madness"]);
        let mut flow = at_payment();
        flow.select_payment_method(PaymentMethodKind::Sinpe).unwrap();

        let err = flow.submit_payment(&cart, &DecliningProcessor).await.unwrap_err();
        assert!(matches!(err, CheckoutError::PaymentFailed(PaymentError::Declined(_))));
        assert_eq!(flow.stage(), CheckoutStage::Payment);
        assert!(flow.receipt().is_none());

        flow.submit_payment(&cart, &processor()).await.unwrap();
        assert!(flow.is_complete());
    }

    #[test]
    fn test_complete_requires_processing() {
        let cart = cart_worth(&["mango-madness"]);
        let mut flow = at_payment();
        flow.select_payment_method(PaymentMethodKind::Sinpe).unwrap();
        let request = flow.begin_payment(&cart).unwrap();
        flow.complete_payment(
            request.clone(),
            Err(PaymentError::Unavailable("timeout".to_string())),
        )
        .unwrap_err();

        assert_eq!(
            flow.complete_payment(request, Err(PaymentError::Unavailable("again".into())))
                .unwrap_err(),
            CheckoutError::InvalidTransition {
                stage: CheckoutStage::Payment,
                action: "complete payment"
            }
        );
    }

    #[test]
    fn test_empty_cart_cannot_pay() {
        let mut flow = at_payment();
        flow.select_payment_method(PaymentMethodKind::Sinpe).unwrap();

        assert_eq!(flow.begin_payment(&Cart::new()), Err(CheckoutError::EmptyCart));
        assert_eq!(flow.stage(), CheckoutStage::Payment);
    }

    #[test]
    fn test_receipt_uses_priced_snapshot() {
        let mut cart = cart_worth(&["mango-madness"]);
        let mut flow = at_payment();
        flow.select_payment_method(PaymentMethodKind::Sinpe).unwrap();
        let request = flow.begin_payment(&cart).unwrap();
        let charged = request.amount;

        cart.add_item(find_item(&ItemId::new("mango-madness")).unwrap());
        let confirmation = PaymentConfirmation {
            reference: "SIM-TEST".to_string(),
            processed_at: chrono::Utc::now(),
        };
        let receipt = flow.complete_payment(request, Ok(confirmation)).unwrap().clone();

        assert_eq!(receipt.totals.grand_total, charged);
        assert_eq!(receipt.item_count(), 1);
        assert_ne!(receipt.totals, flow.totals(&cart));
    }

    #[test]
    fn test_abandon_payment() {
        let cart = cart_worth(&["mango-madness"]);
        let mut flow = at_payment();
        flow.select_payment_method(PaymentMethodKind::Sinpe).unwrap();
        assert!(flow.abandon_payment().is_err());

        flow.begin_payment(&cart).unwrap();
        flow.abandon_payment().unwrap();
        assert_eq!(flow.stage(), CheckoutStage::Payment);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupted_payment_returns_to_payment() {
        let cart = cart_worth(&["mango-madness"]);
        let mut flow = at_payment();
        flow.select_payment_method(PaymentMethodKind::Sinpe).unwrap();
        let slow = SimulatedProcessor::with_sleeper(TokioSleeper, Duration::from_millis(2000));

        let result =
            tokio::time::timeout(Duration::from_millis(10), flow.submit_payment(&cart, &slow)).await;
        assert!(result.is_err());
        assert_eq!(flow.stage(), CheckoutStage::Payment);
        assert!(flow.receipt().is_none());

        flow.submit_payment(&cart, &processor()).await.unwrap();
        assert!(flow.is_complete());
    }
}

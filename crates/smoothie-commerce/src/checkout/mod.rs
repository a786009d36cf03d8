//! Checkout module.
//!
//! Contains the checkout state machine, its form fields, payment methods,
//! the payment processor seam and the confirmation receipt.

mod contact;
mod fields;
mod flow;
mod payment;
mod processor;
mod receipt;

pub use contact::{is_valid_email, ContactInfo};
pub use fields::{Field, FieldErrors};
pub use flow::{CheckoutFlow, CheckoutStage};
pub use payment::{
    CardDetails, CashOption, CashTender, PaymentMethod, PaymentMethodKind, PaymentSummary,
};
pub use processor::{
    PaymentConfirmation, PaymentProcessor, PaymentRequest, SimulatedProcessor, Sleeper,
    TokioSleeper,
};
pub use receipt::Receipt;

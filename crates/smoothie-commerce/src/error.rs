//! Commerce error types.

use serde::Serialize;
use thiserror::Error;

use crate::checkout::CheckoutStage;
use crate::money::Money;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Item not found in any catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Checkout cannot start with an empty cart.
    #[error("Cannot start checkout with an empty cart")]
    EmptyCart,

    /// No checkout is in progress.
    #[error("No checkout in progress")]
    CheckoutNotStarted,

    /// A checkout is already in progress.
    #[error("A checkout is already in progress")]
    CheckoutInProgress,

    /// Checkout error.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Build-your-own error.
    #[error(transparent)]
    Builder(#[from] BuilderError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

/// Errors raised by the checkout state machine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckoutError {
    /// One or more fields failed validation; details are in the flow's error map.
    #[error("Checkout incomplete: {count} field(s) need attention")]
    Validation { count: usize },

    /// The requested action is not allowed in the current stage.
    #[error("Cannot {action} during the {stage} stage")]
    InvalidTransition {
        stage: CheckoutStage,
        action: &'static str,
    },

    /// A field was edited that does not belong to the selected payment method.
    #[error("Field {field} does not apply to payment method {method}")]
    FieldNotApplicable {
        field: &'static str,
        method: &'static str,
    },

    /// Payment was submitted while the cart is empty.
    #[error("Cannot pay for an empty cart")]
    EmptyCart,

    /// The payment processor reported a failure.
    #[error("Payment failed: {0}")]
    PaymentFailed(#[from] PaymentError),
}

/// Failures reported by a payment processor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The processor refused the payment.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The processor could not be reached.
    #[error("processor unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the build-your-own wizard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// Ingredient id not present in the ingredient catalog for that step.
    #[error("Unknown {kind} ingredient: {id}")]
    UnknownIngredient { kind: &'static str, id: String },

    /// The current step's selection requirement is not met.
    #[error("Step {0} is incomplete")]
    StepIncomplete(&'static str),

    /// Already at the first step.
    #[error("Already at the first step")]
    AtFirstStep,

    /// Already at the last step.
    #[error("Already at the last step")]
    AtLastStep,

    /// Finalize attempted without a base or without any fruit.
    #[error("Select a base and at least one fruit")]
    IncompleteBuild,
}

/// A validation failure attached to a single checkout field.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    /// Field must not be blank.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Email does not look like `local@domain.tld`.
    #[error("Invalid email address")]
    InvalidEmail,

    /// Tendered cash is not a non-negative number.
    #[error("Amount must be a non-negative number")]
    InvalidAmount,

    /// Tendered cash does not cover the grand total.
    #[error("Amount must be at least the total ({total})")]
    BelowTotal { total: Money },
}

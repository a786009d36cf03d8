//! Checkout form fields and the per-field error map.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An editable checkout field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Address,
    Notes,
    CardNumber,
    CardExpiry,
    CardCvv,
    TenderedAmount,
}

impl Field {
    /// Fields collected in the Info stage.
    pub const CONTACT: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Address,
        Field::Notes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::Notes => "notes",
            Field::CardNumber => "card_number",
            Field::CardExpiry => "card_expiry",
            Field::CardCvv => "card_cvv",
            Field::TenderedAmount => "tendered_amount",
        }
    }

    /// Human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Address => "Address",
            Field::Notes => "Notes",
            Field::CardNumber => "Card number",
            Field::CardExpiry => "Expiry date",
            Field::CardCvv => "CVV",
            Field::TenderedAmount => "Amount tendered",
        }
    }

    /// Check if this field belongs to the contact form.
    pub fn is_contact(&self) -> bool {
        Self::CONTACT.contains(self)
    }

    /// Check if this field belongs to a payment method.
    pub fn is_payment(&self) -> bool {
        !self.is_contact()
    }

    /// Parse from the `as_str` form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Field::Name),
            "email" => Some(Field::Email),
            "phone" => Some(Field::Phone),
            "address" => Some(Field::Address),
            "notes" => Some(Field::Notes),
            "card_number" => Some(Field::CardNumber),
            "card_expiry" => Some(Field::CardExpiry),
            "card_cvv" => Some(Field::CardCvv),
            "tendered_amount" => Some(Field::TenderedAmount),
            _ => None,
        }
    }

    /// Required-field error for this field.
    pub fn required(&self) -> FieldError {
        FieldError::Required { field: self.label() }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors keyed by field.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error, replacing any previous one for the field.
    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    /// Clear a single field's error.
    pub fn remove(&mut self, field: Field) -> Option<FieldError> {
        self.0.remove(&field)
    }

    /// Drop every error whose field matches the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(Field) -> bool) {
        self.0.retain(|field, _| keep(*field));
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    /// Merge another set of errors into this one.
    pub fn extend(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }
}

//! Customer contact and delivery details.

use crate::checkout::{Field, FieldErrors};
use crate::error::FieldError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Check an address against the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Delivery details collected in the Info stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    /// Full name.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Exact delivery address.
    #[serde(default)]
    pub address: String,
    /// Free-form notes for the kitchen or the rider. Optional.
    #[serde(default)]
    pub notes: String,
}

impl ContactInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a contact field, `None` for payment fields.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::Phone => Some(&self.phone),
            Field::Address => Some(&self.address),
            Field::Notes => Some(&self.notes),
            _ => None,
        }
    }

    /// Overwrite a contact field. Returns false for payment fields.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
            Field::Notes => &mut self.notes,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// Validate the required fields.
    ///
    /// Name, phone and address must be non-blank. Email must be non-blank
    /// and match `local@domain.tld`. Notes are never checked.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        for field in [Field::Name, Field::Email, Field::Phone, Field::Address] {
            let blank = self.get(field).map_or(true, |v| v.trim().is_empty());
            if blank {
                errors.insert(field, field.required());
            }
        }

        if !errors.contains(Field::Email) && !is_valid_email(&self.email) {
            errors.insert(Field::Email, FieldError::InvalidEmail);
        }

        errors
    }

    /// First word of the customer's name, used in the confirmation greeting.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

//! Payment methods and their per-method details.

use crate::checkout::{Field, FieldErrors};
use crate::error::{CheckoutError, FieldError};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Payment method without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    /// Credit or debit card.
    #[default]
    Card,
    /// SINPE Móvil transfer.
    Sinpe,
    /// Cash on delivery.
    Cash,
}

impl PaymentMethodKind {
    pub const ALL: [PaymentMethodKind; 3] = [
        PaymentMethodKind::Card,
        PaymentMethodKind::Sinpe,
        PaymentMethodKind::Cash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethodKind::Card => "card",
            PaymentMethodKind::Sinpe => "sinpe",
            PaymentMethodKind::Cash => "cash",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethodKind::Card => "Tarjeta de Crédito/Débito",
            PaymentMethodKind::Sinpe => "SINPE Móvil",
            PaymentMethodKind::Cash => "Efectivo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "card" => Some(PaymentMethodKind::Card),
            "sinpe" | "mobile" | "mobile_transfer" => Some(PaymentMethodKind::Sinpe),
            "cash" => Some(PaymentMethodKind::Cash),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card details. Only presence is checked, never the format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardDetails {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvv: String,
}

impl CardDetails {
    /// Last four digits of the card number, if it has that many.
    pub fn last4(&self) -> Option<String> {
        let digits: Vec<char> = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        (digits.len() >= 4).then(|| digits[digits.len() - 4..].iter().collect())
    }
}

/// How a cash customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CashOption {
    /// Customer has the exact amount.
    #[default]
    Exact,
    /// Customer pays with a larger bill and needs change.
    Tendered,
}

impl CashOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashOption::Exact => "exact",
            CashOption::Tendered => "tendered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Some(CashOption::Exact),
            "tendered" | "change" => Some(CashOption::Tendered),
            _ => None,
        }
    }
}

/// Cash payment details.
///
/// The typed amount is kept while switching between exact and tendered so
/// the customer does not lose it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CashTender {
    #[serde(default)]
    pub option: CashOption,
    /// Amount as typed by the customer.
    #[serde(default)]
    pub tendered: String,
}

impl CashTender {
    /// Parsed tendered amount, when the tendered option is active.
    pub fn tendered_amount(&self) -> Option<Money> {
        match self.option {
            CashOption::Exact => None,
            CashOption::Tendered => Money::parse(&self.tendered),
        }
    }

    /// Change owed when the tender covers the total.
    pub fn change_due(&self, grand_total: Money) -> Option<Money> {
        self.tendered_amount()
            .filter(|tendered| *tendered >= grand_total)
            .map(|tendered| tendered - grand_total)
    }
}

/// Selected payment method with the details that apply to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Card(CardDetails),
    Sinpe,
    Cash(CashTender),
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Card(CardDetails::default())
    }
}

impl PaymentMethod {
    /// Fresh method of the given kind with empty details.
    pub fn from_kind(kind: PaymentMethodKind) -> Self {
        match kind {
            PaymentMethodKind::Card => PaymentMethod::Card(CardDetails::default()),
            PaymentMethodKind::Sinpe => PaymentMethod::Sinpe,
            PaymentMethodKind::Cash => PaymentMethod::Cash(CashTender::default()),
        }
    }

    pub fn kind(&self) -> PaymentMethodKind {
        match self {
            PaymentMethod::Card(_) => PaymentMethodKind::Card,
            PaymentMethod::Sinpe => PaymentMethodKind::Sinpe,
            PaymentMethod::Cash(_) => PaymentMethodKind::Cash,
        }
    }

    /// Fields this method collects.
    pub fn fields(&self) -> &'static [Field] {
        match self {
            PaymentMethod::Card(_) => &[Field::CardNumber, Field::CardExpiry, Field::CardCvv],
            PaymentMethod::Sinpe => &[],
            PaymentMethod::Cash(_) => &[Field::TenderedAmount],
        }
    }

    /// Set a payment field on the active method.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> Result<(), CheckoutError> {
        let method = self.kind().as_str();
        let slot = match (self, field) {
            (PaymentMethod::Card(card), Field::CardNumber) => &mut card.number,
            (PaymentMethod::Card(card), Field::CardExpiry) => &mut card.expiry,
            (PaymentMethod::Card(card), Field::CardCvv) => &mut card.cvv,
            (PaymentMethod::Cash(cash), Field::TenderedAmount) => &mut cash.tendered,
            _ => {
                return Err(CheckoutError::FieldNotApplicable {
                    field: field.as_str(),
                    method,
                })
            }
        };
        *slot = value.into();
        Ok(())
    }

    /// Validate the details against the order's grand total.
    pub fn validate(&self, grand_total: Money) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match self {
            PaymentMethod::Card(card) => {
                for (field, value) in [
                    (Field::CardNumber, &card.number),
                    (Field::CardExpiry, &card.expiry),
                    (Field::CardCvv, &card.cvv),
                ] {
                    if value.trim().is_empty() {
                        errors.insert(field, field.required());
                    }
                }
            }
            PaymentMethod::Sinpe => {}
            PaymentMethod::Cash(cash) => {
                if cash.option == CashOption::Tendered {
                    if cash.tendered.trim().is_empty() {
                        errors.insert(Field::TenderedAmount, Field::TenderedAmount.required());
                    } else {
                        match Money::parse(&cash.tendered) {
                            None => {
                                errors.insert(Field::TenderedAmount, FieldError::InvalidAmount)
                            }
                            Some(tendered) if tendered < grand_total => errors.insert(
                                Field::TenderedAmount,
                                FieldError::BelowTotal { total: grand_total },
                            ),
                            Some(_) => {}
                        }
                    }
                }
            }
        }
        errors
    }

    /// Change owed to a cash customer; `None` for every other case.
    pub fn change_due(&self, grand_total: Money) -> Option<Money> {
        match self {
            PaymentMethod::Cash(cash) => cash.change_due(grand_total),
            _ => None,
        }
    }

    /// Receipt-safe summary. Card numbers are reduced to their last four digits.
    pub fn summary(&self, grand_total: Money) -> PaymentSummary {
        let (card_last4, cash_option, tendered) = match self {
            PaymentMethod::Card(card) => (card.last4(), None, None),
            PaymentMethod::Sinpe => (None, None, None),
            PaymentMethod::Cash(cash) => (None, Some(cash.option), cash.tendered_amount()),
        };
        PaymentSummary {
            method: self.kind(),
            card_last4,
            cash_option,
            tendered,
            change_due: self.change_due(grand_total),
        }
    }
}

/// What a receipt records about the payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentSummary {
    pub method: PaymentMethodKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_option: Option<CashOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tendered: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_due: Option<Money>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tendered(amount: &str) -> PaymentMethod {
        PaymentMethod::Cash(CashTender {
            option: CashOption::Tendered,
            tendered: amount.to_string(),
        })
    }

    #[test]
    fn test_default_is_card() {
        assert_eq!(PaymentMethod::default().kind(), PaymentMethodKind::Card);
    }

    #[test]
    fn test_card_requires_all_fields() {
        let mut method = PaymentMethod::default();
        assert_eq!(method.validate(Money::new(3350)).len(), 3);

        method.set_field(Field::CardNumber, "4111 1111 1111 1234").unwrap();
        method.set_field(Field::CardExpiry, "12/29").unwrap();
        let errors = method.validate(Money::new(3350));
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(Field::CardCvv));

        method.set_field(Field::CardCvv, "123").unwrap();
        assert!(method.validate(Money::new(3350)).is_empty());
    }

    #[test]
    fn test_field_not_applicable() {
        let mut method = PaymentMethod::Sinpe;
        let err = method.set_field(Field::CardCvv, "123").unwrap_err();
        assert_eq!(
            err,
            CheckoutError::FieldNotApplicable {
                field: "card_cvv",
                method: "sinpe"
            }
        );

        let mut method = PaymentMethod::default();
        assert!(method.set_field(Field::TenderedAmount, "5000").is_err());
        assert!(method.set_field(Field::Email, "a@b.co").is_err());
    }

    #[test]
    fn test_sinpe_and_exact_cash_need_nothing() {
        assert!(PaymentMethod::Sinpe.validate(Money::new(12_000)).is_empty());
        let exact = PaymentMethod::from_kind(PaymentMethodKind::Cash);
        assert!(exact.validate(Money::new(12_000)).is_empty());
        assert_eq!(exact.change_due(Money::new(12_000)), None);
    }

    #[test]
    fn test_cash_change_due() {
        let method = tendered("15000");
        assert!(method.validate(Money::new(12_000)).is_empty());
        assert_eq!(method.change_due(Money::new(12_000)), Some(Money::new(3000)));
        assert_eq!(method.change_due(Money::new(15_000)), Some(Money::zero()));
    }

    #[test]
    fn test_cash_below_total() {
        let method = tendered("10000");
        let errors = method.validate(Money::new(12_000));
        assert_eq!(
            errors.get(Field::TenderedAmount),
            Some(&FieldError::BelowTotal {
                total: Money::new(12_000)
            })
        );
        assert_eq!(method.change_due(Money::new(12_000)), None);
    }

    #[test]
    fn test_cash_decimal_tender() {
        let method = tendered("15000.75");
        assert!(method.validate(Money::new(12_000)).is_empty());
        assert_eq!(method.change_due(Money::new(12_000)), Some(Money::new(3000)));
    }

    #[test]
    fn test_cash_not_a_number() {
        let errors = tendered("diez mil").validate(Money::new(12_000));
        assert_eq!(
            errors.get(Field::TenderedAmount),
            Some(&FieldError::InvalidAmount)
        );

        let errors = tendered("  ").validate(Money::new(12_000));
        assert!(matches!(
            errors.get(Field::TenderedAmount),
            Some(FieldError::Required { .. })
        ));
    }

    #[test]
    fn test_summary_masks_card() {
        let method = PaymentMethod::Card(CardDetails {
            number: "4111-1111-1111-9876".to_string(),
            expiry: "01/30".to_string(),
            cvv: "999".to_string(),
        });
        let summary = method.summary(Money::new(3350));
        assert_eq!(summary.card_last4.as_deref(), Some("9876"));
        assert_eq!(summary.change_due, None);

        let summary = tendered("20000").summary(Money::new(12_000));
        assert_eq!(summary.method, PaymentMethodKind::Cash);
        assert_eq!(summary.tendered, Some(Money::new(20_000)));
        assert_eq!(summary.change_due, Some(Money::new(8000)));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(PaymentMethodKind::from_str("SINPE"), Some(PaymentMethodKind::Sinpe));
        assert_eq!(CashOption::from_str("tendered"), Some(CashOption::Tendered));
        assert_eq!(PaymentMethodKind::from_str("bitcoin"), None);
    }
}

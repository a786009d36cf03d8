//! Order confirmation receipt.

use crate::cart::{CartLine, OrderTotals};
use crate::checkout::{ContactInfo, PaymentSummary};
use crate::ids::OrderId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// In-memory record of a confirmed order.
///
/// Lines and contact details are snapshots; clearing the cart afterwards
/// does not change the receipt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Receipt {
    pub order_id: OrderId,
    /// When payment was approved.
    pub placed_at: DateTime<Utc>,
    pub contact: ContactInfo,
    pub lines: Vec<CartLine>,
    pub totals: OrderTotals,
    pub payment: PaymentSummary,
    /// Processor reference for the charge.
    pub reference: String,
}

impl Receipt {
    /// Total number of units ordered.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Change owed to a cash customer, if any.
    pub fn change_due(&self) -> Option<Money> {
        self.payment.change_due
    }

    /// Thank-you line shown on the confirmation screen.
    pub fn greeting(&self) -> String {
        format!(
            "Gracias por tu compra, {}. Prepararemos tus smoothies con amor.",
            self.contact.first_name()
        )
    }
}

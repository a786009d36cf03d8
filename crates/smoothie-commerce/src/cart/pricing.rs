//! Order pricing.

use crate::config::ShippingPolicy;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing breakdown shown at checkout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderTotals {
    /// Σ(price × quantity).
    pub subtotal: Money,
    /// Delivery fee.
    pub shipping: Money,
    /// subtotal + shipping.
    pub grand_total: Money,
}

impl OrderTotals {
    /// Price a subtotal under a shipping policy.
    pub fn compute(subtotal: Money, shipping: &ShippingPolicy) -> Self {
        let shipping = shipping.cost_for(subtotal);
        Self {
            subtotal,
            shipping,
            grand_total: subtotal + shipping,
        }
    }

    /// Check if delivery is free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

//! Storefront configuration.
//!
//! Every field has a default matching the shop's business rules, so an
//! empty config file (or none at all) yields the standard storefront.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Orders at or above this subtotal ship for free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::new(10_000);

/// Flat delivery fee charged below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Money = Money::new(2_000);

/// Simulated payment processing time.
pub const PAYMENT_DELAY_MS: u64 = 2_000;

/// Maximum number of fruits in a custom build.
pub const MAX_FRUITS: usize = 3;

/// Menu items shown before "load more".
pub const MENU_PAGE_SIZE: usize = 6;

/// Menu items revealed per "load more".
pub const MENU_PAGE_STEP: usize = 3;

/// Top-level storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Delivery pricing.
    #[serde(default)]
    pub shipping: ShippingPolicy,

    /// Simulated payment settings.
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Build-your-own limits.
    #[serde(default)]
    pub builder: BuilderConfig,

    /// Menu listing paging.
    #[serde(default)]
    pub menu: MenuConfig,
}

/// Delivery pricing: a flat fee waived at or above a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    /// Subtotal at which delivery becomes free.
    #[serde(default = "default_free_threshold")]
    pub free_threshold: Money,

    /// Fee charged below the threshold.
    #[serde(default = "default_flat_fee")]
    pub flat_fee: Money,
}

fn default_free_threshold() -> Money {
    FREE_SHIPPING_THRESHOLD
}

fn default_flat_fee() -> Money {
    FLAT_SHIPPING_FEE
}

impl ShippingPolicy {
    /// Shipping cost for a given subtotal.
    pub fn cost_for(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_threshold {
            Money::zero()
        } else {
            self.flat_fee
        }
    }

    /// How much more the customer must spend to get free delivery.
    pub fn remaining_for_free(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_threshold {
            Money::zero()
        } else {
            self.free_threshold - subtotal
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: FREE_SHIPPING_THRESHOLD,
            flat_fee: FLAT_SHIPPING_FEE,
        }
    }
}

/// Simulated payment settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Processing delay in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    PAYMENT_DELAY_MS
}

impl PaymentConfig {
    /// Processing delay as a duration.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            delay_ms: PAYMENT_DELAY_MS,
        }
    }
}

/// Build-your-own limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Maximum fruits per build.
    #[serde(default = "default_max_fruits")]
    pub max_fruits: usize,
}

fn default_max_fruits() -> usize {
    MAX_FRUITS
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_fruits: MAX_FRUITS,
        }
    }
}

/// Menu listing paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Items visible initially and after "show less".
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Items added per "load more".
    #[serde(default = "default_page_step")]
    pub page_step: usize,
}

fn default_page_size() -> usize {
    MENU_PAGE_SIZE
}

fn default_page_step() -> usize {
    MENU_PAGE_STEP
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            page_size: MENU_PAGE_SIZE,
            page_step: MENU_PAGE_STEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_below_threshold() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.cost_for(Money::new(9_999)), Money::new(2_000));
        assert_eq!(policy.cost_for(Money::zero()), Money::new(2_000));
    }

    #[test]
    fn test_shipping_free_at_threshold() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.cost_for(Money::new(10_000)), Money::zero());
        assert_eq!(policy.cost_for(Money::new(25_000)), Money::zero());
    }

    #[test]
    fn test_remaining_for_free() {
        let policy = ShippingPolicy::default();
        assert_eq!(policy.remaining_for_free(Money::new(7_500)), Money::new(2_500));
        assert_eq!(policy.remaining_for_free(Money::new(12_000)), Money::zero());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: StorefrontConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.payment.delay(), Duration::from_millis(2_000));
    }

    #[test]
    fn test_partial_override() {
        let config: StorefrontConfig =
            serde_json::from_str(r#"{"shipping": {"flat_fee": 1500}}"#).unwrap();
        assert_eq!(config.shipping.flat_fee, Money::new(1_500));
        assert_eq!(config.shipping.free_threshold, FREE_SHIPPING_THRESHOLD);
        assert_eq!(config.builder.max_fruits, 3);
    }
}

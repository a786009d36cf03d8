//! Payment processing.
//!
//! There is no real gateway. [`SimulatedProcessor`] waits for the configured
//! delay and approves every request. The wait goes through a [`Sleeper`] so
//! tests can run without a real timer.

use crate::cart::{CartLine, OrderTotals};
use crate::checkout::PaymentSummary;
use crate::config::PaymentConfig;
use crate::error::PaymentError;
use crate::ids::OrderId;
use crate::money::Money;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Suspends the current task.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[async_trait]
impl<S: Sleeper + ?Sized> Sleeper for Arc<S> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await
    }
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// A charge handed to the processor.
///
/// Carries the cart as it was priced when payment began, so the receipt
/// matches the amount charged even if the cart changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Order the charge belongs to.
    pub order_id: OrderId,
    /// Grand total to charge.
    pub amount: Money,
    pub payment: PaymentSummary,
    pub lines: Vec<CartLine>,
    pub totals: OrderTotals,
}

/// An approved charge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentConfirmation {
    /// Processor-side reference.
    pub reference: String,
    pub processed_at: DateTime<Utc>,
}

/// Payment processor backend trait.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Charge a request. Completes once the processor has decided.
    async fn process(&self, request: &PaymentRequest) -> Result<PaymentConfirmation, PaymentError>;
}

/// Processor that approves everything after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor<S: Sleeper = TokioSleeper> {
    sleeper: S,
    delay: Duration,
}

impl SimulatedProcessor<TokioSleeper> {
    /// Create a processor on the tokio timer.
    pub fn new(config: &PaymentConfig) -> Self {
        Self::with_sleeper(TokioSleeper, config.delay())
    }
}

impl<S: Sleeper> SimulatedProcessor<S> {
    /// Create a processor with a custom sleeper.
    pub fn with_sleeper(sleeper: S, delay: Duration) -> Self {
        Self { sleeper, delay }
    }

    /// Simulated processing time.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl<S: Sleeper> PaymentProcessor for SimulatedProcessor<S> {
    async fn process(&self, request: &PaymentRequest) -> Result<PaymentConfirmation, PaymentError> {
        tracing::debug!(
            order_id = %request.order_id,
            amount = request.amount.amount,
            method = request.payment.method.as_str(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating payment"
        );
        self.sleeper.sleep(self.delay).await;

        Ok(PaymentConfirmation {
            reference: format!("SIM-{}", request.order_id),
            processed_at: Utc::now(),
        })
    }
}

//! Money type for representing monetary values.
//!
//! The storefront sells in a single currency (Costa Rican colones), so an
//! amount is just an integer count of the smallest unit. Integer arithmetic
//! keeps totals exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// Currency symbol used for display.
pub const CURRENCY_SYMBOL: &str = "\u{20a1}";

/// A monetary amount in colones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount: i64,
}

impl Money {
    /// Create a new Money value.
    pub const fn new(amount: i64) -> Self {
        Self { amount }
    }

    /// Create a zero amount.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Parse an amount typed by a customer (e.g. a cash tender).
    ///
    /// Accepts a non-negative decimal number, surrounding whitespace allowed.
    /// Fractions of a colón are dropped. Returns `None` for anything else.
    ///
    /// ```
    /// use smoothie_commerce::money::Money;
    /// assert_eq!(Money::parse(" 15000 "), Some(Money::new(15000)));
    /// assert_eq!(Money::parse("12000.50"), Some(Money::new(12000)));
    /// assert_eq!(Money::parse("abc"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));
        let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !digits(whole) || !digits(fraction) {
            return None;
        }
        whole.parse().ok().map(Money::new)
    }

    /// Format as a display string (e.g., "₡3,800").
    pub fn display(&self) -> String {
        format!("{}{}", CURRENCY_SYMBOL, self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "3,800").
    pub fn display_amount(&self) -> String {
        let digits = self.amount.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.is_negative() {
            grouped.insert(0, '-');
        }
        grouped
    }

    /// Try to add another Money value, returning None on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.amount.checked_add(other.amount).map(Money::new)
    }

    /// Try to subtract another Money value, returning None on overflow.
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.amount.checked_sub(other.amount).map(Money::new)
    }

    /// Try to multiply by a quantity, returning None on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.amount.checked_mul(factor).map(Money::new)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount.saturating_add(other.amount))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount.saturating_sub(other.amount))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        Money::new(self.amount.saturating_mul(factor))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Money::new(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

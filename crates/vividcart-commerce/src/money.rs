//! Money type for representing monetary values.
//!
//! Amounts are unsigned integer cents. The storefront trades in a single
//! currency, so there is no currency tag and no floating point anywhere on
//! the money path, formatting included.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Display symbol for the storefront currency.
pub const CURRENCY_SYMBOL: &str = "$";

/// A monetary value in minor units (cents).
///
/// Arithmetic saturates at `u64::MAX` instead of wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: u64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: u64) -> Self {
        Self { amount_cents }
    }

    /// Zero.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Whole currency units (e.g. dollars).
    pub fn major(&self) -> u64 {
        self.amount_cents / 100
    }

    /// Remaining cents after the whole units.
    pub fn minor(&self) -> u64 {
        self.amount_cents % 100
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", CURRENCY_SYMBOL, self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!("{}.{:02}", self.major(), self.minor())
    }

    /// Multiply by a quantity.
    pub fn multiply(&self, factor: u64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, factor: u64) -> Money {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

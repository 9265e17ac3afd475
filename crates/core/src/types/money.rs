//! Currency-agnostic money amounts using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the store's single display currency (BYN).
///
/// The catalog feed carries one currency, so no currency code travels with
/// the amount. Decimal arithmetic keeps promo percentages exact where
/// floats would drift.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create an amount from a decimal value.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply a unit amount by a quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Take a percentage share of the amount (e.g. `percent(10)` for 10%).
    #[must_use]
    pub fn percent(&self, rate: u32) -> Self {
        Self(self.0 * Decimal::from(rate) / Decimal::from(100u32))
    }

    /// Subtract, flooring the result at zero.
    #[must_use]
    pub fn saturating_sub(&self, other: Self) -> Self {
        let result = self.0 - other.0;
        if result.is_sign_negative() {
            Self::ZERO
        } else {
            Self(result)
        }
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc + m)
    }
}

impl From<u32> for Money {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

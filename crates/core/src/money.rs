//! Monetary amounts.

use core::iter::Sum;
use core::ops::Add;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Monetary amount in major currency units (e.g. `249.50` rupees).
///
/// Store rows carry amounts as plain JSON numbers with up to two decimals;
/// they are read exactly (no binary floating point) and written back as
/// numbers. Arithmetic saturates instead of overflowing.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Amount given in the smallest currency unit (paise, cents).
    pub fn from_minor(minor_units: u64) -> Self {
        Self(Decimal::from_i128_with_scale(i128::from(minor_units), 2))
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Mean of `self` over `count` items, unrounded.
    ///
    /// Returns zero when `count == 0`.
    pub fn average_over(self, count: usize) -> Money {
        if count == 0 {
            return Money::ZERO;
        }
        self.0
            .checked_div(Decimal::from(count))
            .map(Money)
            .unwrap_or(Money::ZERO)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        self.saturating_add(rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

/// Two decimals, rounded half away from zero.
impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{rounded:.2}")
    }
}

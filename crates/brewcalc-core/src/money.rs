//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Per-can costs are sub-cent (a can end costs $0.035), so integer       │
//! │  cents are too coarse:                                                 │
//! │    4000 cans × $0.035 = $140.00, but 4000 × 4¢ = $160.00  ❌            │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                         │
//! │    4000 × 0.035 = 140.000 exactly                                      │
//! │    ingredient + packaging + freight + tolling == total, always         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brewcalc_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(250, 2)); // $2.50 per lb
//! let cost = price.times(Decimal::from(40));    // 40 lb ordered
//! assert_eq!(cost, Money::new(Decimal::from(100)));
//! assert_eq!(cost.to_string(), "$100.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::numeric;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in dollars, held as an exact Decimal.
///
/// ## Design Decisions
/// - **Decimal, not f64**: exact sums, bit-identical recomputation
/// - **Unrounded**: rounding to cents happens only in [`Display`](fmt::Display)
/// - **Lenient input**: deserializing `"abc"`, `null` or `NaN` yields $0
///
/// ## Where Money Flows
/// ```text
/// PricingTier.price_per_unit ──► OrderLineItem.unit_price ──► total_cost
///                                                               │
/// BatchCostsConfig (per can) ──► packaging total                 │
/// FreightCost.cost ──────────► freight total                     │
///                                                               ▼
///                                       BatchCostSummary.total_batch_cost
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(
    #[serde(deserialize_with = "crate::numeric::lenient::deserialize")]
    #[ts(as = "String")]
    Decimal,
);

impl Money {
    /// Zero dollars.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wraps a Decimal dollar amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money::ZERO
    }

    /// Returns the exact dollar amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns this amount, or zero when it is negative.
    #[inline]
    pub fn non_negative(self) -> Self {
        Money(numeric::non_negative(self.0))
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use brewcalc_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let per_can = Money::new(Decimal::new(15, 2)); // $0.15
    /// assert_eq!(per_can.times(Decimal::from(4000)).amount(), Decimal::from(600));
    /// ```
    #[inline]
    pub fn times(&self, quantity: Decimal) -> Self {
        Money(numeric::mul(self.0, quantity))
    }

    /// Splits this amount evenly across `count` units.
    ///
    /// Returns zero when `count` is zero instead of dividing by zero.
    ///
    /// ## Example
    /// ```rust
    /// use brewcalc_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let batch = Money::new(Decimal::from(1000));
    /// assert_eq!(batch.per(4000).amount(), Decimal::new(25, 2));
    /// assert!(batch.per(0).is_zero());
    /// ```
    #[inline]
    pub fn per(&self, count: u32) -> Self {
        Money(numeric::ratio(self.0, Decimal::from(count)))
    }

    /// This amount as a fraction of `total` (0.25 = 25%).
    ///
    /// Returns zero when `total` is zero.
    #[inline]
    pub fn share_of(&self, total: Money) -> Decimal {
        numeric::ratio(self.0, total.0)
    }

    /// Rounds to whole cents, half away from zero.
    pub fn round_cents(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money rounded to cents.
///
/// ## Note
/// This is for logs and the CLI. The exact amount is what gets serialized.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_cents().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

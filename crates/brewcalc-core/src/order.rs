//! # Order Quantity Resolver
//!
//! Compares a requirement against stock and rounds the shortage up to whole
//! MOQ lots ("pails").
//!
//! ## Flow
//! ```text
//! requirement 84.5, on hand 50, MOQ 10
//!      │
//!      ▼
//! shortage       = 84.5 − 50        = 34.5
//! order_quantity = max(0, 34.5)     = 34.5
//!      │
//!      ├── 0? → Surplus (nothing to buy, pricing skipped)
//!      │
//!      ▼
//! pails_needed   = ceil(34.5 / 10)  = 4
//! total_ordered  = 4 × 10           = 40
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::{self, non_negative, ratio};

/// What has to be bought for one ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// Shortfall after stock: `max(0, requirement − current_level)`.
    pub order_quantity: Decimal,

    /// Whole MOQ lots to buy.
    pub pails_needed: u64,

    /// `pails_needed × moq`; never below `order_quantity`.
    pub total_ordered: Decimal,
}

impl Purchase {
    /// Nothing to buy.
    pub const SURPLUS: Purchase = Purchase {
        order_quantity: Decimal::ZERO,
        pails_needed: 0,
        total_ordered: Decimal::ZERO,
    };

    /// Stock already covers the requirement.
    #[inline]
    pub fn is_surplus(&self) -> bool {
        self.order_quantity.is_zero()
    }
}

/// Signed difference between what the batch needs and what is on hand.
///
/// Negative means surplus stock. Negative stock counts as zero.
#[inline]
pub fn shortage(requirement: Decimal, current_level: Decimal) -> Decimal {
    non_negative(requirement).saturating_sub(non_negative(current_level))
}

/// `max(0, requirement − current_level)`.
///
/// ## Example
/// ```rust
/// use brewcalc_core::order::order_quantity;
/// use rust_decimal::Decimal;
///
/// assert_eq!(order_quantity(Decimal::new(845, 1), Decimal::from(50)), Decimal::new(345, 1));
/// assert_eq!(order_quantity(Decimal::from(10), Decimal::from(50)), Decimal::ZERO);
/// ```
#[inline]
pub fn order_quantity(requirement: Decimal, current_level: Decimal) -> Decimal {
    non_negative(shortage(requirement, current_level))
}

/// Rounds a positive order quantity up to whole MOQ lots.
///
/// Returns `(pails_needed, total_ordered)`. A non-positive MOQ is a
/// configuration error: rounding is skipped and the shortage is bought as
/// a single lot.
pub fn round_to_moq(order_quantity: Decimal, moq: Decimal) -> (u64, Decimal) {
    if order_quantity <= Decimal::ZERO {
        return (0, Decimal::ZERO);
    }
    if moq <= Decimal::ZERO {
        return (1, order_quantity);
    }

    let pails = ratio(order_quantity, moq).ceil();
    let total_ordered = numeric::mul(pails, moq);
    (pails.to_u64().unwrap_or(u64::MAX), total_ordered)
}

/// Resolves what to buy for one ingredient.
///
/// ## Example
/// ```rust
/// use brewcalc_core::order::resolve_purchase;
/// use rust_decimal::Decimal;
///
/// let purchase = resolve_purchase(Decimal::new(845, 1), Decimal::from(50), Decimal::from(10));
/// assert_eq!(purchase.pails_needed, 4);
/// assert_eq!(purchase.total_ordered, Decimal::from(40));
/// ```
pub fn resolve_purchase(requirement: Decimal, current_level: Decimal, moq: Decimal) -> Purchase {
    let order_quantity = order_quantity(requirement, current_level);
    if order_quantity.is_zero() {
        return Purchase::SURPLUS;
    }

    let (pails_needed, total_ordered) = round_to_moq(order_quantity, moq);
    Purchase {
        order_quantity,
        pails_needed,
        total_ordered,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_worked_example() {
        let purchase = resolve_purchase(dec!(84.500), dec!(50), dec!(10));
        assert_eq!(purchase.order_quantity, dec!(34.5));
        assert_eq!(purchase.pails_needed, 4);
        assert_eq!(purchase.total_ordered, dec!(40));
        assert!(!purchase.is_surplus());
    }

    #[test]
    fn test_surplus_when_stock_covers_requirement() {
        let purchase = resolve_purchase(dec!(84.5), dec!(84.5), dec!(10));
        assert_eq!(purchase, Purchase::SURPLUS);
        assert!(purchase.is_surplus());

        let purchase = resolve_purchase(dec!(10), dec!(250), dec!(10));
        assert!(purchase.is_surplus());
    }

    #[test]
    fn test_exact_multiple_needs_no_extra_pail() {
        let purchase = resolve_purchase(dec!(100), dec!(60), dec!(20));
        assert_eq!(purchase.pails_needed, 2);
        assert_eq!(purchase.total_ordered, dec!(40));
    }

    #[test]
    fn test_fractional_moq() {
        let purchase = resolve_purchase(dec!(3.2), Decimal::ZERO, dec!(0.5));
        assert_eq!(purchase.pails_needed, 7);
        assert_eq!(purchase.total_ordered, dec!(3.5));
    }

    #[test]
    fn test_shortage_is_signed() {
        assert_eq!(shortage(dec!(84.5), dec!(100)), dec!(-15.5));
        assert_eq!(shortage(dec!(84.5), dec!(-20)), dec!(84.5));
    }

    #[test]
    fn test_non_positive_moq_skips_rounding() {
        let purchase = resolve_purchase(dec!(12.3), Decimal::ZERO, Decimal::ZERO);
        assert_eq!(purchase.pails_needed, 1);
        assert_eq!(purchase.total_ordered, dec!(12.3));

        let purchase = resolve_purchase(dec!(12.3), Decimal::ZERO, dec!(-5));
        assert_eq!(purchase.total_ordered, dec!(12.3));
    }
}

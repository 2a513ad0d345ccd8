//! # Pricing Resolver
//!
//! Resolves the unit price for an ordered quantity.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Price override > 0?          → use it                               │
//! │  2. Tiers with min_quantity ≤ total_ordered?                            │
//! │        → take the HIGHEST such breakpoint                               │
//! │        → its price > 0?          → use it                               │
//! │  3. Otherwise                    → no price set (None)                  │
//! │                                                                         │
//! │  Tiers: 0 → $3.00, 40 → $2.50, 200 → $2.10                              │
//! │    total_ordered  30 → $3.00                                            │
//! │    total_ordered  40 → $2.50                                            │
//! │    total_ordered 400 → $2.10                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is exactly one rule for tier selection. A "base price" tier is just
//! the tier whose breakpoint is 0.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::numeric::non_negative;
use crate::types::PricingTier;

/// Where a resolved unit price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "source", rename_all = "snake_case")]
#[ts(export)]
pub enum PriceSource {
    /// A per-ingredient override entered by the user.
    Override,
    /// A catalog pricing tier.
    Tier {
        #[ts(as = "String")]
        min_quantity: Decimal,
    },
}

/// A unit price together with its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    pub unit_price: Money,
    pub source: PriceSource,
}

/// Picks the tier with the highest breakpoint not above `total_ordered`.
///
/// Negative breakpoints count as zero. If two tiers share a breakpoint the
/// later one in the slice wins.
///
/// ## Example
/// ```rust
/// use brewcalc_core::pricing::select_tier;
/// use brewcalc_core::{Money, PricingTier};
/// use rust_decimal::Decimal;
///
/// let tiers = vec![
///     PricingTier { ingredient_id: "i".into(), min_quantity: Decimal::ZERO, price_per_unit: Money::new(Decimal::from(3)) },
///     PricingTier { ingredient_id: "i".into(), min_quantity: Decimal::from(40), price_per_unit: Money::new(Decimal::new(25, 1)) },
/// ];
/// let tier = select_tier(Decimal::from(40), &tiers).unwrap();
/// assert_eq!(tier.min_quantity, Decimal::from(40));
/// ```
pub fn select_tier(total_ordered: Decimal, tiers: &[PricingTier]) -> Option<&PricingTier> {
    tiers
        .iter()
        .filter(|tier| total_ordered >= non_negative(tier.min_quantity))
        .max_by_key(|tier| non_negative(tier.min_quantity))
}

/// Resolves the unit price for `total_ordered`.
///
/// Returns `None` when neither a positive override nor a qualifying tier
/// with a positive price exists. Callers must treat that as "no price set",
/// not as a free ingredient.
pub fn resolve_unit_price(
    total_ordered: Decimal,
    tiers: &[PricingTier],
    price_override: Option<Money>,
) -> Option<ResolvedPrice> {
    if let Some(price) = price_override.filter(Money::is_positive) {
        return Some(ResolvedPrice {
            unit_price: price,
            source: PriceSource::Override,
        });
    }

    select_tier(total_ordered, tiers)
        .filter(|tier| tier.price_per_unit.is_positive())
        .map(|tier| ResolvedPrice {
            unit_price: tier.price_per_unit,
            source: PriceSource::Tier {
                min_quantity: non_negative(tier.min_quantity),
            },
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tier(min: Decimal, price: Decimal) -> PricingTier {
        PricingTier {
            ingredient_id: "citric".to_string(),
            min_quantity: min,
            price_per_unit: Money::new(price),
        }
    }

    fn ladder() -> Vec<PricingTier> {
        // Deliberately unsorted
        vec![
            tier(dec!(200), dec!(2.10)),
            tier(dec!(0), dec!(3.00)),
            tier(dec!(40), dec!(2.50)),
        ]
    }

    #[test]
    fn test_selects_highest_qualifying_breakpoint() {
        let tiers = ladder();
        assert_eq!(select_tier(dec!(30), &tiers).unwrap().min_quantity, dec!(0));
        assert_eq!(select_tier(dec!(40), &tiers).unwrap().min_quantity, dec!(40));
        assert_eq!(select_tier(dec!(199.9), &tiers).unwrap().min_quantity, dec!(40));
        assert_eq!(select_tier(dec!(400), &tiers).unwrap().min_quantity, dec!(200));
    }

    #[test]
    fn test_no_qualifying_tier() {
        let tiers = vec![tier(dec!(100), dec!(2))];
        assert!(select_tier(dec!(40), &tiers).is_none());
        assert!(resolve_unit_price(dec!(40), &tiers, None).is_none());
        assert!(resolve_unit_price(dec!(40), &[], None).is_none());
    }

    #[test]
    fn test_worked_example_price() {
        let tiers = vec![tier(dec!(40), dec!(2.50))];
        let price = resolve_unit_price(dec!(40), &tiers, None).unwrap();
        assert_eq!(price.unit_price, Money::new(dec!(2.50)));
        assert_eq!(
            price.source,
            PriceSource::Tier {
                min_quantity: dec!(40)
            }
        );
    }

    #[test]
    fn test_override_takes_precedence() {
        let price = resolve_unit_price(dec!(400), &ladder(), Some(Money::new(dec!(1.99)))).unwrap();
        assert_eq!(price.unit_price, Money::new(dec!(1.99)));
        assert_eq!(price.source, PriceSource::Override);
    }

    #[test]
    fn test_zero_override_falls_through_to_tiers() {
        let price = resolve_unit_price(dec!(40), &ladder(), Some(Money::zero())).unwrap();
        assert_eq!(price.unit_price, Money::new(dec!(2.50)));
    }

    #[test]
    fn test_zero_priced_tier_is_unpriced() {
        let tiers = vec![tier(dec!(0), dec!(3)), tier(dec!(40), dec!(0))];
        assert!(resolve_unit_price(dec!(40), &tiers, None).is_none());
    }

    #[test]
    fn test_negative_breakpoint_counts_as_zero() {
        let tiers = vec![tier(dec!(-5), dec!(4))];
        let price = resolve_unit_price(dec!(1), &tiers, None).unwrap();
        assert_eq!(
            price.source,
            PriceSource::Tier {
                min_quantity: Decimal::ZERO
            }
        );
    }
}

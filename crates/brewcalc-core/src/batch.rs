//! # Batch Cost Aggregator
//!
//! Rolls ingredient, packaging, freight and tolling into a batch total and
//! a per-can cost.
//!
//! ## Cost Components
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ingredient  = Σ line.total_cost                                        │
//! │  packaging   = (can + can_end + tray + paktech + storage) × cans        │
//! │  freight     = Σ freight[supplier], once per supplier with a line       │
//! │                whose total_cost > 0                                     │
//! │  tolling     = tolling_per_gallon × batch gallons                       │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  total       = ingredient + packaging + freight + tolling   (exact)     │
//! │  cost/can    = total / cans                 (0 when cans = 0)           │
//! │  share       = component / total            (0 when total = 0)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::costing::{freight_for, OrderLineItem};
use crate::money::Money;
use crate::numeric;
use crate::types::{BatchCostsConfig, BatchSizeConfig, FreightCost};

// =============================================================================
// Summary
// =============================================================================

/// Batch-level cost totals.
///
/// `total_batch_cost` is always exactly the sum of the four components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchCostSummary {
    pub total_ingredient_cost: Money,
    pub total_packaging_cost: Money,
    pub total_freight_cost: Money,
    pub total_tolling_cost: Money,
    pub total_batch_cost: Money,
    pub cost_per_can: Money,

    #[ts(as = "String")]
    pub batch_size_gallons: Decimal,
    pub cans_per_batch: u32,
}

/// Distinct suppliers that owe freight: at least one line with a positive
/// cost.
pub fn qualifying_suppliers(lines: &[OrderLineItem]) -> BTreeSet<&str> {
    lines
        .iter()
        .filter(|line| line.is_costed())
        .map(|line| line.supplier_id.as_str())
        .collect()
}

/// Freight across all qualifying suppliers, each counted once.
pub fn freight_total(lines: &[OrderLineItem], freight: &[FreightCost]) -> Money {
    qualifying_suppliers(lines)
        .into_iter()
        .map(|supplier_id| freight_for(supplier_id, freight))
        .sum()
}

/// Builds the batch summary.
///
/// Negative configured costs count as zero.
pub fn summarize(
    lines: &[OrderLineItem],
    costs: &BatchCostsConfig,
    batch_size: &BatchSizeConfig,
    freight: &[FreightCost],
) -> BatchCostSummary {
    let cans = batch_size.cans_per_batch;
    let gallons = numeric::non_negative(batch_size.size_gallons);

    let total_ingredient_cost: Money = lines.iter().map(OrderLineItem::total_cost).sum();
    let total_packaging_cost = costs.packaging_cost_per_unit().times(Decimal::from(cans));
    let total_freight_cost = freight_total(lines, freight);
    let total_tolling_cost = costs.tolling_cost_per_gallon.non_negative().times(gallons);

    let total_batch_cost =
        total_ingredient_cost + total_packaging_cost + total_freight_cost + total_tolling_cost;

    BatchCostSummary {
        total_ingredient_cost,
        total_packaging_cost,
        total_freight_cost,
        total_tolling_cost,
        total_batch_cost,
        cost_per_can: total_batch_cost.per(cans),
        batch_size_gallons: gallons,
        cans_per_batch: cans,
    }
}

// =============================================================================
// Derived Views
// =============================================================================

/// Each component as a fraction of the batch total (0.25 = 25%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostShares {
    #[ts(as = "String")]
    pub ingredient: Decimal,
    #[ts(as = "String")]
    pub packaging: Decimal,
    #[ts(as = "String")]
    pub freight: Decimal,
    #[ts(as = "String")]
    pub tolling: Decimal,
}

/// Each component spread over the batch's cans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PerCanBreakdown {
    pub ingredient: Money,
    pub packaging: Money,
    pub freight: Money,
    pub tolling: Money,
    pub total: Money,
}

impl BatchCostSummary {
    /// Component shares; all zero when the batch costs nothing.
    pub fn shares(&self) -> CostShares {
        let total = self.total_batch_cost;
        CostShares {
            ingredient: self.total_ingredient_cost.share_of(total),
            packaging: self.total_packaging_cost.share_of(total),
            freight: self.total_freight_cost.share_of(total),
            tolling: self.total_tolling_cost.share_of(total),
        }
    }

    /// Components per can; all zero when the batch yields no cans.
    pub fn per_can(&self) -> PerCanBreakdown {
        let cans = self.cans_per_batch;
        PerCanBreakdown {
            ingredient: self.total_ingredient_cost.per(cans),
            packaging: self.total_packaging_cost.per(cans),
            freight: self.total_freight_cost.per(cans),
            tolling: self.total_tolling_cost.per(cans),
            total: self.cost_per_can,
        }
    }

    /// One line's fraction of the per-can cost.
    pub fn line_share(&self, line: &OrderLineItem) -> Decimal {
        line.cost_per_can().share_of(self.cost_per_can)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::LineCost;
    use crate::pricing::PriceSource;
    use rust_decimal_macros::dec;

    fn line(supplier: &str, total: Decimal, cans: u32) -> OrderLineItem {
        let cost = if total.is_zero() {
            LineCost::Surplus
        } else {
            let total_cost = Money::new(total);
            LineCost::Priced {
                unit_price: Money::new(dec!(1)),
                total_cost,
                cost_per_can: total_cost.per(cans),
                price_source: PriceSource::Override,
            }
        };
        OrderLineItem {
            ingredient_id: format!("{supplier}-{total}"),
            ingredient_name: "Ingredient".to_string(),
            supplier_id: supplier.to_string(),
            supplier_name: supplier.to_string(),
            part_number: None,
            unit: "lb".to_string(),
            moq: dec!(1),
            batch_requirement: total,
            current_level: Decimal::ZERO,
            shortage: total,
            order_quantity: total,
            pails_needed: 1,
            total_ordered: total,
            cost,
        }
    }

    fn freight(supplier: &str, cost: Decimal) -> FreightCost {
        FreightCost {
            supplier_id: supplier.to_string(),
            cost: Money::new(cost),
        }
    }

    fn packaging(per_can_each: Decimal, tolling: Decimal) -> BatchCostsConfig {
        BatchCostsConfig {
            can_cost: Money::new(per_can_each),
            can_end_cost: Money::new(per_can_each),
            tray_cost: Money::new(per_can_each),
            paktech_cost: Money::new(per_can_each),
            storage_cost: Money::new(per_can_each),
            tolling_cost_per_gallon: Money::new(tolling),
        }
    }

    #[test]
    fn test_packaging_worked_example() {
        // 5 × $0.03 = $0.15 per can, 4000 cans
        let summary = summarize(&[], &packaging(dec!(0.03), dec!(0)), &BatchSizeConfig::default(), &[]);
        assert_eq!(summary.total_packaging_cost, Money::new(dec!(600)));
    }

    #[test]
    fn test_freight_counted_once_per_supplier() {
        let lines = vec![line("acme", dec!(100), 4000), line("acme", dec!(50), 4000)];
        let summary = summarize(
            &lines,
            &BatchCostsConfig::default(),
            &BatchSizeConfig::default(),
            &[freight("acme", dec!(75))],
        );
        assert_eq!(summary.total_freight_cost, Money::new(dec!(75)));
        assert_eq!(summary.total_ingredient_cost, Money::new(dec!(150)));
    }

    #[test]
    fn test_freight_skips_suppliers_without_costed_lines() {
        let lines = vec![line("acme", dec!(100), 4000), line("zest", dec!(0), 4000)];
        let table = [freight("acme", dec!(75)), freight("zest", dec!(40))];
        assert_eq!(freight_total(&lines, &table), Money::new(dec!(75)));

        let names: Vec<&str> = qualifying_suppliers(&lines).into_iter().collect();
        assert_eq!(names, vec!["acme"]);
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let lines = vec![line("acme", dec!(100), 4000), line("zest", dec!(33.333), 4000)];
        let summary = summarize(
            &lines,
            &packaging(dec!(0.031), dec!(1.25)),
            &BatchSizeConfig::default(),
            &[freight("acme", dec!(75)), freight("zest", dec!(12.5))],
        );
        assert_eq!(
            summary.total_batch_cost,
            summary.total_ingredient_cost
                + summary.total_packaging_cost
                + summary.total_freight_cost
                + summary.total_tolling_cost
        );
        assert_eq!(summary.total_tolling_cost, Money::new(dec!(625)));
        assert_eq!(summary.cost_per_can, summary.total_batch_cost.per(4000));
    }

    #[test]
    fn test_zero_cans_never_divides() {
        let size = BatchSizeConfig {
            size_gallons: dec!(500),
            cans_per_batch: 0,
            can_size_id: None,
        };
        let summary = summarize(
            &[line("acme", dec!(100), 0)],
            &packaging(dec!(0.03), dec!(1)),
            &size,
            &[],
        );
        assert!(summary.total_packaging_cost.is_zero());
        assert!(summary.cost_per_can.is_zero());
        assert_eq!(summary.per_can().ingredient, Money::ZERO);
        // Component shares divide by the batch total, not by cans
        assert_eq!(summary.shares().ingredient, dec!(100) / dec!(600));
    }

    #[test]
    fn test_line_share_zero_without_cans() {
        let size = BatchSizeConfig {
            size_gallons: dec!(500),
            cans_per_batch: 0,
            can_size_id: None,
        };
        let lines = vec![line("acme", dec!(100), 0), line("zest", dec!(40), 0)];
        let summary = summarize(&lines, &packaging(dec!(0.03), dec!(1)), &size, &[]);

        assert!(summary.total_batch_cost.is_positive());
        for line in &lines {
            assert_eq!(summary.line_share(line), Decimal::ZERO);
        }
        assert_eq!(summary.per_can().total, Money::ZERO);
    }

    #[test]
    fn test_shares_zero_when_total_zero() {
        let summary = summarize(&[], &BatchCostsConfig::default(), &BatchSizeConfig::default(), &[]);
        assert!(summary.total_batch_cost.is_zero());
        let shares = summary.shares();
        assert_eq!(shares.ingredient, Decimal::ZERO);
        assert_eq!(shares.packaging, Decimal::ZERO);
        assert_eq!(shares.freight, Decimal::ZERO);
        assert_eq!(shares.tolling, Decimal::ZERO);
    }

    #[test]
    fn test_shares_and_line_share() {
        let lines = vec![line("acme", dec!(400), 4000)];
        let summary = summarize(
            &lines,
            &packaging(dec!(0.03), dec!(0)),
            &BatchSizeConfig::default(),
            &[],
        );
        // 400 ingredient + 600 packaging
        assert_eq!(summary.shares().ingredient, dec!(0.4));
        assert_eq!(summary.shares().packaging, dec!(0.6));
        assert_eq!(summary.per_can().total, Money::new(dec!(0.25)));
        assert_eq!(summary.line_share(&lines[0]), dec!(0.4));

        let surplus = line("acme", dec!(0), 4000);
        assert_eq!(summary.line_share(&surplus), Decimal::ZERO);
    }

    #[test]
    fn test_negative_config_costs_clamped() {
        let summary = summarize(
            &[],
            &packaging(dec!(-1), dec!(-2)),
            &BatchSizeConfig::default(),
            &[freight("acme", dec!(-5))],
        );
        assert!(summary.total_packaging_cost.is_zero());
        assert!(summary.total_tolling_cost.is_zero());
        assert!(summary.total_batch_cost.is_zero());
    }
}

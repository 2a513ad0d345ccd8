//! # Ingredient Cost Aggregator
//!
//! Prices each order line and rolls line costs up per supplier.
//!
//! ## Line States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every OrderLineItem is in exactly one state:                           │
//! │                                                                         │
//! │   Surplus    stock covers the batch; nothing bought, pricing skipped   │
//! │   Unpriced   something must be bought but no price is set              │
//! │   Priced     unit_price × total_ordered = total_cost                   │
//! │                                                                         │
//! │  Surplus and Unpriced both cost $0 in the totals, but they are never   │
//! │  confused with a free ingredient: the state travels with the line.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::order::Purchase;
use crate::pricing::{PriceSource, ResolvedPrice};
use crate::types::FreightCost;

// =============================================================================
// Line Cost
// =============================================================================

/// Cost state of one order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum LineCost {
    /// On-hand stock covers the requirement.
    Surplus,

    /// A purchase is needed but no price is set for it.
    Unpriced,

    /// A purchase is needed and priced.
    Priced {
        unit_price: Money,
        total_cost: Money,
        /// `total_cost / cans_per_batch`, zero when the batch has no cans.
        cost_per_can: Money,
        price_source: PriceSource,
    },
}

/// Prices a purchase.
///
/// ## Example
/// ```rust
/// use brewcalc_core::costing::{price_line, LineCost};
/// use brewcalc_core::order::resolve_purchase;
/// use brewcalc_core::pricing::{PriceSource, ResolvedPrice};
/// use brewcalc_core::Money;
/// use rust_decimal::Decimal;
///
/// let purchase = resolve_purchase(Decimal::new(845, 1), Decimal::from(50), Decimal::from(10));
/// let price = ResolvedPrice {
///     unit_price: Money::new(Decimal::new(250, 2)),
///     source: PriceSource::Override,
/// };
/// let cost = price_line(&purchase, Some(price), 4000);
/// assert_eq!(cost.total_cost(), Money::new(Decimal::from(100)));
/// ```
pub fn price_line(purchase: &Purchase, price: Option<ResolvedPrice>, cans_per_batch: u32) -> LineCost {
    if purchase.is_surplus() {
        return LineCost::Surplus;
    }

    match price {
        None => LineCost::Unpriced,
        Some(price) => {
            let total_cost = price.unit_price.times(purchase.total_ordered);
            LineCost::Priced {
                unit_price: price.unit_price,
                total_cost,
                cost_per_can: total_cost.per(cans_per_batch),
                price_source: price.source,
            }
        }
    }
}

impl LineCost {
    /// Line total; zero unless priced.
    pub fn total_cost(&self) -> Money {
        match self {
            LineCost::Priced { total_cost, .. } => *total_cost,
            LineCost::Surplus | LineCost::Unpriced => Money::ZERO,
        }
    }

    /// Per-can share of the line total; zero unless priced.
    pub fn cost_per_can(&self) -> Money {
        match self {
            LineCost::Priced { cost_per_can, .. } => *cost_per_can,
            LineCost::Surplus | LineCost::Unpriced => Money::ZERO,
        }
    }

    /// Resolved unit price, if any.
    pub fn unit_price(&self) -> Option<Money> {
        match self {
            LineCost::Priced { unit_price, .. } => Some(*unit_price),
            LineCost::Surplus | LineCost::Unpriced => None,
        }
    }
}

// =============================================================================
// Order Line Item
// =============================================================================

/// One row of the purchase order.
///
/// Derived per run; holds copies of the catalog fields it displays rather
/// than references back into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLineItem {
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub supplier_id: String,
    pub supplier_name: String,
    pub part_number: Option<String>,
    pub unit: String,

    #[ts(as = "String")]
    pub moq: Decimal,

    /// Weight the batch needs, 3 decimal places.
    #[ts(as = "String")]
    pub batch_requirement: Decimal,

    #[ts(as = "String")]
    pub current_level: Decimal,

    /// `batch_requirement − current_level`; negative when stock is left over.
    #[ts(as = "String")]
    pub shortage: Decimal,

    #[ts(as = "String")]
    pub order_quantity: Decimal,

    pub pails_needed: u64,

    #[ts(as = "String")]
    pub total_ordered: Decimal,

    pub cost: LineCost,
}

impl OrderLineItem {
    #[inline]
    pub fn total_cost(&self) -> Money {
        self.cost.total_cost()
    }

    #[inline]
    pub fn cost_per_can(&self) -> Money {
        self.cost.cost_per_can()
    }

    #[inline]
    pub fn unit_price(&self) -> Option<Money> {
        self.cost.unit_price()
    }

    /// Stock already covers this ingredient.
    #[inline]
    pub fn has_surplus(&self) -> bool {
        matches!(self.cost, LineCost::Surplus)
    }

    /// Something must be bought but there is no price for it.
    #[inline]
    pub fn no_price(&self) -> bool {
        matches!(self.cost, LineCost::Unpriced)
    }

    /// The line contributes a positive cost, which is what makes its
    /// supplier owe freight.
    #[inline]
    pub fn is_costed(&self) -> bool {
        self.total_cost().is_positive()
    }
}

// =============================================================================
// Supplier Rollup
// =============================================================================

/// Sum of line costs per supplier id, including suppliers whose lines are
/// all surplus or unpriced (at $0).
pub fn supplier_totals(lines: &[OrderLineItem]) -> BTreeMap<String, Money> {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();
    for line in lines {
        *totals.entry(line.supplier_id.clone()).or_default() += line.total_cost();
    }
    totals
}

/// Flat freight charge for a supplier; zero when the table has no row.
pub fn freight_for(supplier_id: &str, freight: &[FreightCost]) -> Money {
    freight
        .iter()
        .find(|row| row.supplier_id == supplier_id)
        .map(|row| row.cost.non_negative())
        .unwrap_or(Money::ZERO)
}

/// Everything bought from one supplier in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupplierOrder {
    pub supplier_id: String,
    pub supplier_name: String,
    pub line_count: usize,
    pub total_pails: u64,
    pub ingredient_cost: Money,

    /// Charged only when `ingredient_cost` is positive.
    pub freight_cost: Money,

    pub total: Money,
}

/// Groups lines into per-supplier orders, ordered by supplier id.
pub fn supplier_orders(lines: &[OrderLineItem], freight: &[FreightCost]) -> Vec<SupplierOrder> {
    let mut grouped: BTreeMap<&str, SupplierOrder> = BTreeMap::new();

    for line in lines {
        let order = grouped
            .entry(line.supplier_id.as_str())
            .or_insert_with(|| SupplierOrder {
                supplier_id: line.supplier_id.clone(),
                supplier_name: line.supplier_name.clone(),
                line_count: 0,
                total_pails: 0,
                ingredient_cost: Money::ZERO,
                freight_cost: Money::ZERO,
                total: Money::ZERO,
            });
        order.line_count += 1;
        order.total_pails = order.total_pails.saturating_add(line.pails_needed);
        order.ingredient_cost += line.total_cost();
    }

    grouped
        .into_values()
        .map(|mut order| {
            if order.ingredient_cost.is_positive() {
                order.freight_cost = freight_for(&order.supplier_id, freight);
            }
            order.total = order.ingredient_cost + order.freight_cost;
            order
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::resolve_purchase;
    use rust_decimal_macros::dec;

    fn tier_price(price: Decimal) -> Option<ResolvedPrice> {
        Some(ResolvedPrice {
            unit_price: Money::new(price),
            source: PriceSource::Tier {
                min_quantity: Decimal::ZERO,
            },
        })
    }

    fn line(supplier: &str, pails: u64, cost: LineCost) -> OrderLineItem {
        OrderLineItem {
            ingredient_id: format!("ing-{supplier}-{pails}"),
            ingredient_name: "Ingredient".to_string(),
            supplier_id: supplier.to_string(),
            supplier_name: supplier.to_uppercase(),
            part_number: None,
            unit: "lb".to_string(),
            moq: dec!(10),
            batch_requirement: Decimal::ZERO,
            current_level: Decimal::ZERO,
            shortage: Decimal::ZERO,
            order_quantity: Decimal::ZERO,
            pails_needed: pails,
            total_ordered: Decimal::ZERO,
            cost,
        }
    }

    fn priced(total: Decimal) -> LineCost {
        LineCost::Priced {
            unit_price: Money::new(dec!(1)),
            total_cost: Money::new(total),
            cost_per_can: Money::ZERO,
            price_source: PriceSource::Override,
        }
    }

    #[test]
    fn test_price_line_worked_example() {
        let purchase = resolve_purchase(dec!(84.5), dec!(50), dec!(10));
        let cost = price_line(&purchase, tier_price(dec!(2.50)), 4000);
        assert_eq!(cost.total_cost(), Money::new(dec!(100)));
        assert_eq!(cost.cost_per_can(), Money::new(dec!(0.025)));
        assert_eq!(cost.unit_price(), Some(Money::new(dec!(2.50))));
    }

    #[test]
    fn test_price_line_surplus_ignores_price() {
        let purchase = resolve_purchase(dec!(10), dec!(50), dec!(10));
        assert_eq!(price_line(&purchase, tier_price(dec!(2.50)), 4000), LineCost::Surplus);
    }

    #[test]
    fn test_price_line_unpriced() {
        let purchase = resolve_purchase(dec!(84.5), dec!(50), dec!(10));
        let cost = price_line(&purchase, None, 4000);
        assert_eq!(cost, LineCost::Unpriced);
        assert!(cost.total_cost().is_zero());
        assert_eq!(cost.unit_price(), None);
    }

    #[test]
    fn test_cost_per_can_guards_zero_cans() {
        let purchase = resolve_purchase(dec!(84.5), dec!(50), dec!(10));
        let cost = price_line(&purchase, tier_price(dec!(2.50)), 0);
        assert_eq!(cost.total_cost(), Money::new(dec!(100)));
        assert!(cost.cost_per_can().is_zero());
    }

    #[test]
    fn test_line_cost_serializes_with_status_tag() {
        let json = serde_json::to_value(LineCost::Unpriced).unwrap();
        assert_eq!(json["status"], "unpriced");

        let json = serde_json::to_value(priced(dec!(100))).unwrap();
        assert_eq!(json["status"], "priced");
        assert_eq!(json["total_cost"], "100");
        assert_eq!(json["price_source"]["source"], "override");
    }

    #[test]
    fn test_supplier_totals() {
        let lines = vec![
            line("acme", 4, priced(dec!(100))),
            line("acme", 1, priced(dec!(20))),
            line("zest", 0, LineCost::Surplus),
        ];
        let totals = supplier_totals(&lines);
        assert_eq!(totals["acme"], Money::new(dec!(120)));
        assert_eq!(totals["zest"], Money::ZERO);
    }

    #[test]
    fn test_supplier_orders_freight_only_when_costed() {
        let freight = vec![
            FreightCost {
                supplier_id: "acme".to_string(),
                cost: Money::new(dec!(75)),
            },
            FreightCost {
                supplier_id: "zest".to_string(),
                cost: Money::new(dec!(40)),
            },
        ];
        let lines = vec![
            line("zest", 2, LineCost::Unpriced),
            line("acme", 4, priced(dec!(100))),
            line("acme", 1, priced(dec!(20))),
        ];

        let orders = supplier_orders(&lines, &freight);
        assert_eq!(orders.len(), 2);

        assert_eq!(orders[0].supplier_id, "acme");
        assert_eq!(orders[0].line_count, 2);
        assert_eq!(orders[0].total_pails, 5);
        assert_eq!(orders[0].freight_cost, Money::new(dec!(75)));
        assert_eq!(orders[0].total, Money::new(dec!(195)));

        assert_eq!(orders[1].supplier_id, "zest");
        assert!(orders[1].freight_cost.is_zero());
        assert!(orders[1].total.is_zero());
    }

    #[test]
    fn test_freight_for_missing_supplier_is_zero() {
        assert!(freight_for("nobody", &[]).is_zero());
    }
}

//! # Domain Types
//!
//! Catalog, inventory and configuration records the engine reads.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Ingredient    │   │   RecipeLine    │   │ InventoryLevel  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name, unit │   │  flavor_id      │   │  ingredient_id  │       │
//! │  │  moq            │   │  ingredient_id  │   │  owner_id       │       │
//! │  │  supplier       │   │  percentage     │   │  current_level  │       │
//! │  │  default_density│   │  density?       │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  PricingTier    │   │ BatchSizeConfig │   │BatchCostsConfig │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  min_quantity   │   │  size_gallons   │   │  5 × per-can    │       │
//! │  │  price_per_unit │   │  cans_per_batch │   │  tolling / gal  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every numeric field deserializes leniently (see [`crate::numeric`]), so
//! a payload with `"moq": ""` still loads, with a zero the engine reports.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::numeric::lenient;
use crate::{DEFAULT_BATCH_GALLONS, DEFAULT_CANS_PER_BATCH};

// =============================================================================
// Catalog
// =============================================================================

/// A raw-material vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Supplier {
    pub id: String,
    pub name: String,
}

/// A purchasable raw material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ingredient {
    pub id: String,
    pub name: String,

    /// Unit of measure for requirements, inventory and MOQ (e.g. "lb").
    pub unit: String,

    /// Minimum order quantity: purchases are whole multiples of this.
    #[serde(default, deserialize_with = "lenient::deserialize")]
    #[ts(as = "String")]
    pub moq: Decimal,

    /// Supplier part number printed on purchase orders.
    #[serde(default)]
    pub part_number: Option<String>,

    pub supplier: Supplier,

    /// Density used when a recipe line has none.
    ///
    /// Set at data entry; the base liquid carries
    /// [`BASE_LIQUID_DENSITY`](crate::BASE_LIQUID_DENSITY).
    #[serde(default, deserialize_with = "lenient::deserialize_option")]
    #[ts(as = "Option<String>")]
    pub default_density: Option<Decimal>,
}

/// A drink recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Flavor {
    pub id: String,
    pub name: String,

    /// Batch size the recipe was written against.
    #[serde(default, deserialize_with = "lenient::deserialize")]
    #[ts(as = "String")]
    pub base_batch_size_gallons: Decimal,
}

/// One ingredient's share of a flavor.
///
/// Percentages of a recipe need not sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecipeLine {
    pub flavor_id: String,
    pub ingredient_id: String,

    /// Share of the batch weight, 0–100.
    #[serde(default, deserialize_with = "lenient::deserialize")]
    #[ts(as = "String")]
    pub percentage: Decimal,

    /// Weight per gallon. `None` falls back to the ingredient default.
    #[serde(default, deserialize_with = "lenient::deserialize_option")]
    #[ts(as = "Option<String>")]
    pub density: Option<Decimal>,
}

/// A price breakpoint: `price_per_unit` applies once `min_quantity` is ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingTier {
    pub ingredient_id: String,

    #[serde(default, deserialize_with = "lenient::deserialize")]
    #[ts(as = "String")]
    pub min_quantity: Decimal,

    #[serde(default)]
    pub price_per_unit: Money,
}

/// A can format; drives cans per batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CanSize {
    pub id: String,
    pub name: String,

    #[serde(default, deserialize_with = "lenient::deserialize")]
    #[ts(as = "String")]
    pub size_oz: Decimal,
}

// =============================================================================
// Inventory
// =============================================================================

/// On-hand stock of one ingredient for one owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryLevel {
    pub ingredient_id: String,
    pub owner_id: String,

    #[serde(default, deserialize_with = "lenient::deserialize")]
    #[ts(as = "String")]
    pub current_level: Decimal,
}

// =============================================================================
// Configuration
// =============================================================================

/// How big a batch is and how many cans it fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchSizeConfig {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    #[ts(as = "String")]
    pub size_gallons: Decimal,

    #[serde(default)]
    pub cans_per_batch: u32,

    /// Can format used to derive `cans_per_batch`, if one was chosen.
    #[serde(default)]
    pub can_size_id: Option<String>,
}

impl Default for BatchSizeConfig {
    /// 500 gallons filling 4000 cans, no can size selected.
    fn default() -> Self {
        BatchSizeConfig {
            size_gallons: DEFAULT_BATCH_GALLONS,
            cans_per_batch: DEFAULT_CANS_PER_BATCH,
            can_size_id: None,
        }
    }
}

/// Per-can packaging costs and the co-packer's tolling fee.
///
/// Defaults to all zeros, which is what an unconfigured install starts with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchCostsConfig {
    #[serde(default)]
    pub can_cost: Money,
    #[serde(default)]
    pub can_end_cost: Money,
    #[serde(default)]
    pub tray_cost: Money,
    #[serde(default)]
    pub paktech_cost: Money,
    #[serde(default)]
    pub storage_cost: Money,
    #[serde(default)]
    pub tolling_cost_per_gallon: Money,
}

impl BatchCostsConfig {
    /// Sum of the five per-can packaging costs. Negative entries count as zero.
    pub fn packaging_cost_per_unit(&self) -> Money {
        [
            self.can_cost,
            self.can_end_cost,
            self.tray_cost,
            self.paktech_cost,
            self.storage_cost,
        ]
        .into_iter()
        .map(Money::non_negative)
        .sum()
    }
}

/// Flat freight charge per supplier, independent of order size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FreightCost {
    pub supplier_id: String,

    #[serde(default)]
    pub cost: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_batch_size_default() {
        let size = BatchSizeConfig::default();
        assert_eq!(size.size_gallons, dec!(500));
        assert_eq!(size.cans_per_batch, 4000);
        assert!(size.can_size_id.is_none());
    }

    #[test]
    fn test_packaging_cost_per_unit() {
        let costs = BatchCostsConfig {
            can_cost: Money::new(dec!(0.08)),
            can_end_cost: Money::new(dec!(0.03)),
            tray_cost: Money::new(dec!(0.02)),
            paktech_cost: Money::new(dec!(0.015)),
            storage_cost: Money::new(dec!(0.005)),
            tolling_cost_per_gallon: Money::new(dec!(1.25)),
        };
        assert_eq!(costs.packaging_cost_per_unit(), Money::new(dec!(0.15)));
    }

    #[test]
    fn test_batch_costs_deserialize_with_blank_fields() {
        let json = r#"{
            "can_cost": "0.08",
            "can_end_cost": "",
            "tray_cost": null,
            "storage_cost": 0.5
        }"#;
        let costs: BatchCostsConfig = serde_json::from_str(json).unwrap();
        assert_eq!(costs.can_cost, Money::new(dec!(0.08)));
        assert!(costs.can_end_cost.is_zero());
        assert!(costs.tray_cost.is_zero());
        assert!(costs.paktech_cost.is_zero());
        assert_eq!(costs.storage_cost, Money::new(dec!(0.5)));
    }

    #[test]
    fn test_ingredient_deserialize_lenient_moq() {
        let json = r#"{
            "id": "ing-1",
            "name": "Citric Acid",
            "unit": "lb",
            "moq": "abc",
            "supplier": {"id": "sup-1", "name": "Acme"}
        }"#;
        let ingredient: Ingredient = serde_json::from_str(json).unwrap();
        assert_eq!(ingredient.moq, Decimal::ZERO);
        assert_eq!(ingredient.part_number, None);
        assert_eq!(ingredient.default_density, None);
    }
}

//! # Snapshot Loader
//!
//! Reads everything one calculation run needs in a single transaction.
//!
//! ## Consistency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    flavors             → flavor exists?        (else NotFound)         │
//! │    flavor_ingredients  → recipe + ingredients  (else EmptyRecipe)      │
//! │    pricing_tiers       → tiers per ingredient                          │
//! │    price_overrides     → override per ingredient                       │
//! │    inventory_levels    → stock for the owner                           │
//! │    batch_sizes         → size, cans   (default when unset)             │
//! │    batch_costs         → costs        (zeros when unset)               │
//! │    freight_costs       → freight table                                 │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  A concurrent edit lands either wholly before or wholly after the      │
//! │  read, so a run never mixes pre- and post-edit state.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::debug;

use brewcalc_core::{CalculationInput, CoreError, IngredientInput, Money, PricingTier};

use crate::error::{DbError, DbResult};
use crate::repository::catalog::{
    fetch_flavor, fetch_overrides_for_flavor, fetch_recipe, fetch_tiers_for_flavor,
};
use crate::repository::inventory::fetch_levels_for_owner;
use crate::repository::settings::{fetch_batch_costs, fetch_batch_size, fetch_freight};

/// Loads a [`CalculationInput`] for `flavor_id` using `owner_id`'s stock.
///
/// ## Returns
/// * `Err(DbError::NotFound)` - unknown flavor
/// * `Err(DbError::Core(CoreError::EmptyRecipe))` - flavor has no recipe lines
pub async fn load_snapshot(
    pool: &SqlitePool,
    flavor_id: &str,
    owner_id: &str,
) -> DbResult<CalculationInput> {
    let mut tx = pool.begin().await?;

    if fetch_flavor(&mut *tx, flavor_id).await?.is_none() {
        return Err(DbError::not_found("Flavor", flavor_id));
    }

    let recipe = fetch_recipe(&mut *tx, flavor_id).await?;
    if recipe.is_empty() {
        return Err(CoreError::EmptyRecipe {
            flavor_id: flavor_id.to_string(),
        }
        .into());
    }

    let tiers = fetch_tiers_for_flavor(&mut *tx, flavor_id).await?;
    let overrides = fetch_overrides_for_flavor(&mut *tx, flavor_id).await?;
    let levels = fetch_levels_for_owner(&mut *tx, owner_id).await?;
    let batch_size = fetch_batch_size(&mut *tx).await?;
    let batch_costs = fetch_batch_costs(&mut *tx).await?;
    let freight = fetch_freight(&mut *tx).await?;

    tx.commit().await?;

    let mut tiers_by_ingredient: BTreeMap<String, Vec<PricingTier>> = BTreeMap::new();
    for tier in tiers {
        tiers_by_ingredient
            .entry(tier.ingredient_id.clone())
            .or_default()
            .push(tier);
    }
    let overrides: HashMap<String, Money> = overrides.into_iter().collect();
    let levels: HashMap<String, Decimal> = levels
        .into_iter()
        .map(|level| (level.ingredient_id, level.current_level))
        .collect();

    let ingredients: Vec<IngredientInput> = recipe
        .into_iter()
        .map(|entry| {
            let id = entry.ingredient.id.as_str();
            IngredientInput {
                current_level: levels.get(id).copied().unwrap_or(Decimal::ZERO),
                tiers: tiers_by_ingredient.remove(id).unwrap_or_default(),
                price_override: overrides.get(id).copied(),
                ingredient: entry.ingredient,
                recipe: entry.line,
            }
        })
        .collect();

    debug!(
        flavor_id = %flavor_id,
        owner_id = %owner_id,
        ingredients = ingredients.len(),
        freight_rows = freight.len(),
        "Snapshot loaded"
    );

    Ok(CalculationInput {
        flavor_id: flavor_id.to_string(),
        batch_size,
        batch_costs,
        freight,
        ingredients,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::order::{LineStatus, OrderStatus};
    use brewcalc_core::{
        calculate, BatchCostsConfig, Flavor, FreightCost, Ingredient, InventoryLevel, LineCost,
        RecipeLine, Supplier, ValidationError,
    };
    use rust_decimal_macros::dec;

    /// Citric acid at 2% of a 500 gal batch (84.5 lb), 10 lb on hand,
    /// 50 lb MOQ, $2.50/lb, $75 freight. Sugar is fully stocked.
    async fn seeded() -> Database {
        seed(Database::new(DbConfig::in_memory()).await.unwrap()).await
    }

    async fn seed(db: Database) -> Database {
        let catalog = db.catalog();
        let acme = Supplier {
            id: "sup-acme".to_string(),
            name: "Acme Chemical".to_string(),
        };
        catalog.insert_supplier(&acme).await.unwrap();
        catalog
            .insert_flavor(&Flavor {
                id: "flv-lime".to_string(),
                name: "Lime Seltzer".to_string(),
                base_batch_size_gallons: dec!(500),
            })
            .await
            .unwrap();

        for (id, name, moq, pct) in [
            ("ing-citric", "Citric Acid", dec!(50), dec!(2)),
            ("ing-sugar", "Cane Sugar", dec!(100), dec!(1)),
        ] {
            catalog
                .insert_ingredient(&Ingredient {
                    id: id.to_string(),
                    name: name.to_string(),
                    unit: "lb".to_string(),
                    moq,
                    part_number: None,
                    supplier: acme.clone(),
                    default_density: None,
                })
                .await
                .unwrap();
            catalog
                .upsert_recipe_line(&RecipeLine {
                    flavor_id: "flv-lime".to_string(),
                    ingredient_id: id.to_string(),
                    percentage: pct,
                    density: Some(dec!(8.450)),
                })
                .await
                .unwrap();
        }

        catalog
            .insert_tier(&PricingTier {
                ingredient_id: "ing-citric".to_string(),
                min_quantity: dec!(0),
                price_per_unit: Money::new(dec!(2.50)),
            })
            .await
            .unwrap();

        let inventory = db.inventory();
        for (id, level) in [("ing-citric", dec!(10)), ("ing-sugar", dec!(500))] {
            inventory
                .upsert_level(&InventoryLevel {
                    ingredient_id: id.to_string(),
                    owner_id: "alice".to_string(),
                    current_level: level,
                })
                .await
                .unwrap();
        }

        let settings = db.settings();
        settings
            .upsert_freight_cost(&FreightCost {
                supplier_id: "sup-acme".to_string(),
                cost: Money::new(dec!(75)),
            })
            .await
            .unwrap();
        settings
            .save_batch_costs(&BatchCostsConfig {
                can_cost: Money::new(dec!(0.10)),
                tolling_cost_per_gallon: Money::new(dec!(1.00)),
                ..Default::default()
            })
            .await
            .unwrap();

        db
    }

    #[tokio::test]
    async fn test_snapshot_assembles_inputs() {
        let db = seeded().await;
        let input = db.load_snapshot("flv-lime", "alice").await.unwrap();

        assert_eq!(input.ingredients.len(), 2);
        // Ordered by ingredient name
        assert_eq!(input.ingredients[0].ingredient.id, "ing-sugar");
        let citric = &input.ingredients[1];
        assert_eq!(citric.current_level, dec!(10));
        assert_eq!(citric.tiers.len(), 1);
        assert_eq!(citric.price_override, None);
        assert_eq!(input.batch_size.size_gallons, dec!(500));
        assert_eq!(input.freight.len(), 1);
    }

    #[tokio::test]
    async fn test_other_owner_has_no_stock() {
        let db = seeded().await;
        let input = db.load_snapshot("flv-lime", "bob").await.unwrap();
        assert!(input
            .ingredients
            .iter()
            .all(|item| item.current_level == Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_unknown_flavor_and_empty_recipe() {
        let db = seeded().await;
        let err = db.load_snapshot("flv-missing", "alice").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        db.catalog()
            .insert_flavor(&Flavor {
                id: "flv-empty".to_string(),
                name: "Empty".to_string(),
                base_batch_size_gallons: dec!(500),
            })
            .await
            .unwrap();
        let err = db.load_snapshot("flv-empty", "alice").await.unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::EmptyRecipe { .. })));
    }

    #[tokio::test]
    async fn test_snapshot_calculate_save_round_trip() {
        let db = seeded().await;
        let input = db.load_snapshot("flv-lime", "alice").await.unwrap();
        let plan = calculate(&input);

        let citric = plan.line("ing-citric").unwrap();
        assert_eq!(citric.batch_requirement, dec!(84.500));
        assert_eq!(citric.pails_needed, 2);
        assert_eq!(citric.total_cost(), Money::new(dec!(250)));
        assert!(plan.line("ing-sugar").unwrap().has_surplus());

        // 250 ingredients + 400 packaging + 75 freight + 500 tolling
        assert_eq!(plan.summary.total_batch_cost, Money::new(dec!(1225)));

        let orders = db.orders();
        let order_id = orders.save_order(&plan).await.unwrap();
        let saved = orders.get_order(&order_id).await.unwrap().unwrap();
        assert_eq!(saved.status, OrderStatus::Pending);
        assert_eq!(saved.items.len(), 2);
        assert_eq!(saved.total_cost(), plan.summary.total_ingredient_cost);

        let sugar = saved
            .items
            .iter()
            .find(|item| item.ingredient_id == "ing-sugar")
            .unwrap();
        assert_eq!(sugar.status, LineStatus::Surplus);
        assert_eq!(sugar.unit_price, None);

        orders.set_status(&order_id, OrderStatus::Placed).await.unwrap();
        assert!(orders.set_status(&order_id, OrderStatus::Cancelled).await.is_err());

        orders.save_cost_summary(&plan).await.unwrap();
        let latest = orders.latest_cost_summary("flv-lime").await.unwrap().unwrap();
        assert_eq!(latest.summary, plan.summary);
    }

    #[tokio::test]
    async fn test_issues_survive_persistence() {
        let db = seeded().await;
        db.catalog()
            .set_price_override("ing-citric", None)
            .await
            .unwrap();
        let input = db
            .load_snapshot("flv-lime", "alice")
            .await
            .unwrap()
            .with_batch_size(dec!(500), None);
        let mut input = input.with_current_level("ing-sugar", dec!(-5));
        input.batch_size.cans_per_batch = 0;

        let plan = calculate(&input);
        assert!(plan
            .issues
            .iter()
            .any(|i| matches!(i.issue, ValidationError::NoCansForPackaging { .. })));

        let order_id = db.orders().save_order(&plan).await.unwrap();
        let saved = db.orders().get_order(&order_id).await.unwrap().unwrap();
        assert_eq!(saved.issues, plan.issues);

        let citric = plan.line("ing-citric").unwrap();
        assert!(matches!(citric.cost, LineCost::Priced { .. }));
    }

    #[tokio::test]
    async fn test_saved_order_read_ignores_uncommitted_changes() {
        let path = std::env::temp_dir().join(format!("brewcalc-{}.db", uuid::Uuid::new_v4()));
        let db = seed(Database::new(DbConfig::new(path.clone())).await.unwrap()).await;

        let plan = calculate(&db.load_snapshot("flv-lime", "alice").await.unwrap());
        let orders = db.orders();
        let order_id = orders.save_order(&plan).await.unwrap();

        // A writer mid-way through cancelling the order and dropping a line
        let mut writer = db.pool().begin().await.unwrap();
        sqlx::query("UPDATE orders SET status = 'cancelled' WHERE id = ?1")
            .bind(&order_id)
            .execute(&mut *writer)
            .await
            .unwrap();
        sqlx::query("DELETE FROM order_items WHERE order_id = ?1 AND ingredient_id = 'ing-sugar'")
            .bind(&order_id)
            .execute(&mut *writer)
            .await
            .unwrap();

        let saved = orders.get_order(&order_id).await.unwrap().unwrap();
        assert_eq!(saved.status, OrderStatus::Pending);
        assert_eq!(saved.items.len(), 2);

        writer.commit().await.unwrap();
        let saved = orders.get_order(&order_id).await.unwrap().unwrap();
        assert_eq!(saved.status, OrderStatus::Cancelled);
        assert_eq!(saved.items.len(), 1);

        assert!(orders.get_order("missing").await.unwrap().is_none());

        db.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }
}

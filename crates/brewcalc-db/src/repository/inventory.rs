//! # Inventory Repository
//!
//! On-hand stock per (ingredient, owner).
//!
//! Each owner keeps their own count, so two planners working the same
//! catalog get different order quantities. A missing row reads as 0 on hand.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use brewcalc_core::validation::{validate_current_level, validate_name};
use brewcalc_core::InventoryLevel;

use super::{decimal_from_text, decimal_to_text, generate_id};
use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct LevelRow {
    ingredient_id: String,
    owner_id: String,
    current_level: String,
}

impl From<LevelRow> for InventoryLevel {
    fn from(row: LevelRow) -> Self {
        InventoryLevel {
            ingredient_id: row.ingredient_id,
            owner_id: row.owner_id,
            current_level: decimal_from_text(&row.current_level),
        }
    }
}

pub(crate) async fn fetch_levels_for_owner<'e, E>(
    executor: E,
    owner_id: &str,
) -> DbResult<Vec<InventoryLevel>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, LevelRow>(
        r#"
        SELECT ingredient_id, owner_id, current_level
        FROM inventory_levels
        WHERE owner_id = ?1
        ORDER BY ingredient_id
        "#,
    )
    .bind(owner_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(InventoryLevel::from).collect())
}

async fn write_level<'e, E>(executor: E, level: &InventoryLevel) -> DbResult<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO inventory_levels (id, ingredient_id, owner_id, current_level, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT (ingredient_id, owner_id) DO UPDATE SET
            current_level = excluded.current_level,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(generate_id())
    .bind(&level.ingredient_id)
    .bind(&level.owner_id)
    .bind(decimal_to_text(level.current_level))
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(())
}

fn validate_level(level: &InventoryLevel) -> DbResult<()> {
    validate_name("ingredient_id", &level.ingredient_id)?;
    validate_name("owner_id", &level.owner_id)?;
    validate_current_level(level.current_level)?;
    Ok(())
}

/// Repository for inventory levels.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// All levels recorded for one owner.
    pub async fn levels_for_owner(&self, owner_id: &str) -> DbResult<Vec<InventoryLevel>> {
        fetch_levels_for_owner(&self.pool, owner_id).await
    }

    /// One owner's level of one ingredient; 0 when never recorded.
    pub async fn level(&self, ingredient_id: &str, owner_id: &str) -> DbResult<Decimal> {
        let text: Option<String> = sqlx::query_scalar(
            "SELECT current_level FROM inventory_levels WHERE ingredient_id = ?1 AND owner_id = ?2",
        )
        .bind(ingredient_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(text.map(|t| decimal_from_text(&t)).unwrap_or(Decimal::ZERO))
    }

    /// Records a stock count, replacing any previous count for the pair.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - negative level or blank ids
    /// * `Err(DbError::ForeignKeyViolation)` - unknown ingredient
    pub async fn upsert_level(&self, level: &InventoryLevel) -> DbResult<()> {
        validate_level(level)?;
        debug!(
            ingredient_id = %level.ingredient_id,
            owner_id = %level.owner_id,
            current_level = %level.current_level,
            "Upserting inventory level"
        );

        write_level(&self.pool, level).await
    }

    /// Records several counts atomically: either all are written or none.
    pub async fn upsert_levels(&self, levels: &[InventoryLevel]) -> DbResult<()> {
        for level in levels {
            validate_level(level)?;
        }

        let mut tx = self.pool.begin().await?;
        for level in levels {
            write_level(&mut *tx, level).await?;
        }
        tx.commit().await?;

        debug!(count = levels.len(), "Inventory levels saved");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use brewcalc_core::{Ingredient, Supplier};
    use rust_decimal_macros::dec;

    async fn setup() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let supplier = Supplier {
            id: "sup-1".to_string(),
            name: "Acme".to_string(),
        };
        db.catalog().insert_supplier(&supplier).await.unwrap();
        for id in ["ing-a", "ing-b"] {
            db.catalog()
                .insert_ingredient(&Ingredient {
                    id: id.to_string(),
                    name: id.to_string(),
                    unit: "lb".to_string(),
                    moq: dec!(25),
                    part_number: None,
                    supplier: supplier.clone(),
                    default_density: None,
                })
                .await
                .unwrap();
        }
        db
    }

    fn level(ingredient_id: &str, owner_id: &str, current_level: Decimal) -> InventoryLevel {
        InventoryLevel {
            ingredient_id: ingredient_id.to_string(),
            owner_id: owner_id.to_string(),
            current_level,
        }
    }

    #[tokio::test]
    async fn test_levels_are_per_owner() {
        let db = setup().await;
        let inventory = db.inventory();

        inventory.upsert_level(&level("ing-a", "alice", dec!(10))).await.unwrap();
        inventory.upsert_level(&level("ing-a", "bob", dec!(3))).await.unwrap();
        inventory.upsert_level(&level("ing-a", "alice", dec!(12.5))).await.unwrap();

        assert_eq!(inventory.level("ing-a", "alice").await.unwrap(), dec!(12.5));
        assert_eq!(inventory.level("ing-a", "bob").await.unwrap(), dec!(3));
        assert_eq!(inventory.level("ing-b", "alice").await.unwrap(), Decimal::ZERO);
        assert_eq!(inventory.levels_for_owner("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_negative_level_rejected() {
        let db = setup().await;
        let err = db
            .inventory()
            .upsert_level(&level("ing-a", "alice", dec!(-1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_batch_upsert_is_atomic() {
        let db = setup().await;
        let inventory = db.inventory();

        let result = inventory
            .upsert_levels(&[
                level("ing-a", "alice", dec!(5)),
                level("ing-missing", "alice", dec!(1)),
            ])
            .await;
        assert!(result.is_err());
        assert!(inventory.levels_for_owner("alice").await.unwrap().is_empty());

        inventory
            .upsert_levels(&[
                level("ing-a", "alice", dec!(5)),
                level("ing-b", "alice", dec!(7)),
            ])
            .await
            .unwrap();
        assert_eq!(inventory.levels_for_owner("alice").await.unwrap().len(), 2);
    }
}

//! # Settings Repository
//!
//! Batch size, batch costs and per-supplier freight.
//!
//! ## Storage
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  batch_sizes   (id = 1)   size_gallons, cans_per_batch, can_size_id    │
//! │  batch_costs   (id = 1)   5 × per-can cost, tolling per gallon         │
//! │  freight_costs (per supplier)  flat cost                               │
//! │                                                                         │
//! │  Missing singleton rows are inserted with the defaults on first read:  │
//! │    batch size  → 500 gal, 4000 cans                                    │
//! │    batch costs → all zero                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::{debug, info};

use brewcalc_core::validation::{validate_batch_costs, validate_batch_gallons, validate_price};
use brewcalc_core::{BatchCostsConfig, BatchSizeConfig, FreightCost};

use super::catalog::fetch_can_size;
use super::{count_from_i64, decimal_from_text, decimal_to_text, money_from_text, money_to_text};
use crate::error::{DbError, DbResult};

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct BatchSizeRow {
    size_gallons: String,
    cans_per_batch: i64,
    can_size_id: Option<String>,
}

impl From<BatchSizeRow> for BatchSizeConfig {
    fn from(row: BatchSizeRow) -> Self {
        BatchSizeConfig {
            size_gallons: decimal_from_text(&row.size_gallons),
            cans_per_batch: count_from_i64(row.cans_per_batch),
            can_size_id: row.can_size_id,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BatchCostsRow {
    can_cost: String,
    can_end_cost: String,
    tray_cost: String,
    paktech_cost: String,
    storage_cost: String,
    tolling_cost_per_gallon: String,
}

impl From<BatchCostsRow> for BatchCostsConfig {
    fn from(row: BatchCostsRow) -> Self {
        BatchCostsConfig {
            can_cost: money_from_text(&row.can_cost),
            can_end_cost: money_from_text(&row.can_end_cost),
            tray_cost: money_from_text(&row.tray_cost),
            paktech_cost: money_from_text(&row.paktech_cost),
            storage_cost: money_from_text(&row.storage_cost),
            tolling_cost_per_gallon: money_from_text(&row.tolling_cost_per_gallon),
        }
    }
}

// =============================================================================
// Shared Reads
// =============================================================================

pub(crate) async fn fetch_batch_size<'e, E>(executor: E) -> DbResult<BatchSizeConfig>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, BatchSizeRow>(
        "SELECT size_gallons, cans_per_batch, can_size_id FROM batch_sizes WHERE id = 1",
    )
    .fetch_optional(executor)
    .await?;

    Ok(row.map(BatchSizeConfig::from).unwrap_or_default())
}

pub(crate) async fn fetch_batch_costs<'e, E>(executor: E) -> DbResult<BatchCostsConfig>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, BatchCostsRow>(
        r#"
        SELECT can_cost, can_end_cost, tray_cost, paktech_cost, storage_cost,
               tolling_cost_per_gallon
        FROM batch_costs
        WHERE id = 1
        "#,
    )
    .fetch_optional(executor)
    .await?;

    Ok(row.map(BatchCostsConfig::from).unwrap_or_default())
}

pub(crate) async fn fetch_freight<'e, E>(executor: E) -> DbResult<Vec<FreightCost>>
where
    E: SqliteExecutor<'e>,
{
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT supplier_id, cost FROM freight_costs ORDER BY supplier_id")
            .fetch_all(executor)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(supplier_id, cost)| FreightCost {
            supplier_id,
            cost: money_from_text(&cost),
        })
        .collect())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for batch and freight settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Inserts the default batch size and batch costs rows if absent.
    pub async fn ensure_defaults(&self) -> DbResult<()> {
        let size = BatchSizeConfig::default();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;
        let inserted = sqlx::query(
            r#"
            INSERT OR IGNORE INTO batch_sizes (id, size_gallons, cans_per_batch, can_size_id, updated_at)
            VALUES (1, ?1, ?2, NULL, ?3)
            "#,
        )
        .bind(decimal_to_text(size.size_gallons))
        .bind(i64::from(size.cans_per_batch))
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("INSERT OR IGNORE INTO batch_costs (id, updated_at) VALUES (1, ?1)")
            .bind(now)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        if inserted > 0 {
            info!("Default batch settings created");
        }
        Ok(())
    }

    /// Current batch size; the default is stored first when never saved.
    pub async fn batch_size(&self) -> DbResult<BatchSizeConfig> {
        self.ensure_defaults().await?;
        fetch_batch_size(&self.pool).await
    }

    /// Saves the batch size.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - size_gallons ≤ 0
    /// * `Err(DbError::ForeignKeyViolation)` - unknown can_size_id
    pub async fn save_batch_size(&self, size: &BatchSizeConfig) -> DbResult<()> {
        validate_batch_gallons(size.size_gallons)?;
        info!(
            size_gallons = %size.size_gallons,
            cans_per_batch = size.cans_per_batch,
            "Saving batch size"
        );

        sqlx::query(
            r#"
            INSERT INTO batch_sizes (id, size_gallons, cans_per_batch, can_size_id, updated_at)
            VALUES (1, ?1, ?2, ?3, ?4)
            ON CONFLICT (id) DO UPDATE SET
                size_gallons = excluded.size_gallons,
                cans_per_batch = excluded.cans_per_batch,
                can_size_id = excluded.can_size_id,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(decimal_to_text(size.size_gallons))
        .bind(i64::from(size.cans_per_batch))
        .bind(size.can_size_id.as_deref())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Changes the batch size and saves it.
    ///
    /// With a can size, cans per batch is re-derived from it; without one
    /// the current can count is kept.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - `can_size_id` names no can size
    pub async fn resize_batch(
        &self,
        gallons: Decimal,
        can_size_id: Option<&str>,
    ) -> DbResult<BatchSizeConfig> {
        let can_size = match can_size_id {
            Some(id) => Some(
                fetch_can_size(&self.pool, id)
                    .await?
                    .ok_or_else(|| DbError::not_found("Can size", id))?,
            ),
            None => None,
        };

        let resized = self.batch_size().await?.resized(gallons, can_size.as_ref());
        self.save_batch_size(&resized).await?;
        Ok(resized)
    }

    /// Current batch costs; all zero when never saved.
    pub async fn batch_costs(&self) -> DbResult<BatchCostsConfig> {
        self.ensure_defaults().await?;
        fetch_batch_costs(&self.pool).await
    }

    /// Saves the batch costs. Every amount must be ≥ 0.
    pub async fn save_batch_costs(&self, costs: &BatchCostsConfig) -> DbResult<()> {
        validate_batch_costs(costs)?;
        info!(
            packaging_per_can = %costs.packaging_cost_per_unit(),
            tolling_per_gallon = %costs.tolling_cost_per_gallon,
            "Saving batch costs"
        );

        sqlx::query(
            r#"
            INSERT INTO batch_costs (
                id, can_cost, can_end_cost, tray_cost, paktech_cost, storage_cost,
                tolling_cost_per_gallon, updated_at
            ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (id) DO UPDATE SET
                can_cost = excluded.can_cost,
                can_end_cost = excluded.can_end_cost,
                tray_cost = excluded.tray_cost,
                paktech_cost = excluded.paktech_cost,
                storage_cost = excluded.storage_cost,
                tolling_cost_per_gallon = excluded.tolling_cost_per_gallon,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(money_to_text(costs.can_cost))
        .bind(money_to_text(costs.can_end_cost))
        .bind(money_to_text(costs.tray_cost))
        .bind(money_to_text(costs.paktech_cost))
        .bind(money_to_text(costs.storage_cost))
        .bind(money_to_text(costs.tolling_cost_per_gallon))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Freight for every supplier that has one.
    pub async fn freight_costs(&self) -> DbResult<Vec<FreightCost>> {
        fetch_freight(&self.pool).await
    }

    /// Sets a supplier's flat freight cost.
    pub async fn upsert_freight_cost(&self, freight: &FreightCost) -> DbResult<()> {
        validate_price("cost", freight.cost)?;
        debug!(supplier_id = %freight.supplier_id, cost = %freight.cost, "Upserting freight cost");

        sqlx::query(
            r#"
            INSERT INTO freight_costs (supplier_id, cost, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (supplier_id) DO UPDATE SET
                cost = excluded.cost,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&freight.supplier_id)
        .bind(money_to_text(freight.cost))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use brewcalc_core::{CanSize, Money, Supplier};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_defaults_when_unset() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let settings = db.settings();

        assert_eq!(settings.batch_size().await.unwrap(), BatchSizeConfig::default());
        assert_eq!(settings.batch_costs().await.unwrap(), BatchCostsConfig::default());
        assert!(settings.freight_costs().await.unwrap().is_empty());

        let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM batch_sizes")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(stored, 1);
    }

    #[tokio::test]
    async fn test_batch_costs_save_and_reject_negative() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let settings = db.settings();

        let costs = BatchCostsConfig {
            can_cost: Money::new(dec!(0.08)),
            tolling_cost_per_gallon: Money::new(dec!(1.25)),
            ..Default::default()
        };
        settings.save_batch_costs(&costs).await.unwrap();
        assert_eq!(settings.batch_costs().await.unwrap(), costs);

        let bad = BatchCostsConfig {
            tray_cost: Money::new(dec!(-0.01)),
            ..costs.clone()
        };
        assert!(matches!(
            settings.save_batch_costs(&bad).await.unwrap_err(),
            DbError::Validation(_)
        ));
        assert_eq!(settings.batch_costs().await.unwrap(), costs);
    }

    #[tokio::test]
    async fn test_resize_batch_with_can_size() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.catalog()
            .insert_can_size(&CanSize {
                id: "can-16".to_string(),
                name: "16oz".to_string(),
                size_oz: dec!(16),
            })
            .await
            .unwrap();
        let settings = db.settings();

        let resized = settings.resize_batch(dec!(250), Some("can-16")).await.unwrap();
        assert_eq!(resized.cans_per_batch, 2000);
        assert_eq!(settings.batch_size().await.unwrap(), resized);

        // Without a can size the count is kept
        let resized = settings.resize_batch(dec!(300), None).await.unwrap();
        assert_eq!(resized.size_gallons, dec!(300));
        assert_eq!(resized.cans_per_batch, 2000);

        assert!(matches!(
            settings.resize_batch(dec!(300), Some("can-99")).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
        assert!(settings.resize_batch(dec!(0), None).await.is_err());
    }

    #[tokio::test]
    async fn test_freight_upsert() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.catalog()
            .insert_supplier(&Supplier {
                id: "sup-1".to_string(),
                name: "Acme".to_string(),
            })
            .await
            .unwrap();
        let settings = db.settings();

        let mut freight = FreightCost {
            supplier_id: "sup-1".to_string(),
            cost: Money::new(dec!(75)),
        };
        settings.upsert_freight_cost(&freight).await.unwrap();
        freight.cost = Money::new(dec!(90));
        settings.upsert_freight_cost(&freight).await.unwrap();

        assert_eq!(settings.freight_costs().await.unwrap(), vec![freight]);
    }
}

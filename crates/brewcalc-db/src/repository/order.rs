//! # Order Repository
//!
//! Persists computed plans: purchase orders and batch cost summaries.
//!
//! ## What Gets Saved
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderPlan                                                              │
//! │     │                                                                   │
//! │     ├── save_order()         ──► orders (status 'pending', issues)     │
//! │     │                            order_items (one per line)            │
//! │     │                              unit_price NULL unless priced       │
//! │     │                                                                   │
//! │     └── save_cost_summary()  ──► batch_cost_summaries                  │
//! │                                                                         │
//! │  Both writes are single transactions. Saved rows are immutable         │
//! │  records of the run; re-running the engine saves a new order.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};

use brewcalc_core::{BatchCostSummary, DataQualityIssue, LineCost, Money, OrderPlan};

use super::{
    count_from_i64, decimal_from_text, decimal_to_text, generate_id, money_from_text,
    money_to_text,
};
use crate::error::{DbError, DbResult};

// =============================================================================
// Saved Records
// =============================================================================

/// Lifecycle of a saved purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Placed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Placed => "placed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    fn from_db(text: &str) -> Self {
        match text {
            "placed" => OrderStatus::Placed,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Pending,
        }
    }
}

/// Stored state of an order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    Surplus,
    Unpriced,
    Priced,
}

impl LineStatus {
    fn of(cost: &LineCost) -> Self {
        match cost {
            LineCost::Surplus => LineStatus::Surplus,
            LineCost::Unpriced => LineStatus::Unpriced,
            LineCost::Priced { .. } => LineStatus::Priced,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            LineStatus::Surplus => "surplus",
            LineStatus::Unpriced => "unpriced",
            LineStatus::Priced => "priced",
        }
    }

    fn from_db(text: &str) -> Self {
        match text {
            "surplus" => LineStatus::Surplus,
            "priced" => LineStatus::Priced,
            _ => LineStatus::Unpriced,
        }
    }
}

/// A persisted purchase order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedOrderItem {
    pub id: String,
    pub ingredient_id: String,
    pub status: LineStatus,
    pub batch_requirement: Decimal,
    pub current_level: Decimal,
    pub order_quantity: Decimal,
    pub pails_needed: u64,
    pub total_ordered: Decimal,
    pub unit_price: Option<Money>,
    pub total_cost: Money,
    pub unit: String,
}

/// A persisted purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedOrder {
    pub id: String,
    pub flavor_id: String,
    pub batch_size_gallons: Decimal,
    pub status: OrderStatus,
    pub issues: Vec<DataQualityIssue>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<SavedOrderItem>,
}

impl SavedOrder {
    /// Sum of the saved line totals.
    pub fn total_cost(&self) -> Money {
        self.items.iter().map(|item| item.total_cost).sum()
    }
}

/// A persisted batch cost summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCostSummary {
    pub id: String,
    pub flavor_id: String,
    pub created_at: DateTime<Utc>,
    pub summary: BatchCostSummary,
}

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    flavor_id: String,
    batch_size_gallons: String,
    status: String,
    issues: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: String,
    ingredient_id: String,
    line_status: String,
    batch_requirement: String,
    current_level: String,
    order_quantity: String,
    pails_needed: i64,
    total_ordered: String,
    unit_price: Option<String>,
    total_cost: String,
    unit: String,
}

impl From<OrderItemRow> for SavedOrderItem {
    fn from(row: OrderItemRow) -> Self {
        SavedOrderItem {
            id: row.id,
            ingredient_id: row.ingredient_id,
            status: LineStatus::from_db(&row.line_status),
            batch_requirement: decimal_from_text(&row.batch_requirement),
            current_level: decimal_from_text(&row.current_level),
            order_quantity: decimal_from_text(&row.order_quantity),
            pails_needed: u64::try_from(row.pails_needed).unwrap_or(0),
            total_ordered: decimal_from_text(&row.total_ordered),
            unit_price: row.unit_price.as_deref().map(money_from_text),
            total_cost: money_from_text(&row.total_cost),
            unit: row.unit,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CostSummaryRow {
    id: String,
    flavor_id: String,
    batch_size_gallons: String,
    cans_per_batch: i64,
    total_ingredient_cost: String,
    total_packaging_cost: String,
    total_freight_cost: String,
    total_tolling_cost: String,
    total_batch_cost: String,
    cost_per_can: String,
    created_at: DateTime<Utc>,
}

impl From<CostSummaryRow> for SavedCostSummary {
    fn from(row: CostSummaryRow) -> Self {
        SavedCostSummary {
            id: row.id,
            flavor_id: row.flavor_id,
            created_at: row.created_at,
            summary: BatchCostSummary {
                total_ingredient_cost: money_from_text(&row.total_ingredient_cost),
                total_packaging_cost: money_from_text(&row.total_packaging_cost),
                total_freight_cost: money_from_text(&row.total_freight_cost),
                total_tolling_cost: money_from_text(&row.total_tolling_cost),
                total_batch_cost: money_from_text(&row.total_batch_cost),
                cost_per_can: money_from_text(&row.cost_per_can),
                batch_size_gallons: decimal_from_text(&row.batch_size_gallons),
                cans_per_batch: count_from_i64(row.cans_per_batch),
            },
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for saved orders and cost summaries.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Saves a plan as a pending purchase order.
    ///
    /// ## What This Does
    /// 1. Inserts the `orders` row with the run's issues as JSON
    /// 2. Inserts one `order_items` row per line, surplus lines included
    /// 3. Commits both, or neither
    ///
    /// ## Returns
    /// The new order's id.
    pub async fn save_order(&self, plan: &OrderPlan) -> DbResult<String> {
        let order_id = generate_id();
        let issues = serde_json::to_string(&plan.issues)?;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, flavor_id, batch_size_gallons, status, issues, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&order_id)
        .bind(&plan.flavor_id)
        .bind(decimal_to_text(plan.summary.batch_size_gallons))
        .bind(OrderStatus::Pending.as_str())
        .bind(&issues)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for line in &plan.lines {
            let pails = i64::try_from(line.pails_needed)
                .map_err(|_| DbError::Internal(format!("pail count overflow: {}", line.pails_needed)))?;

            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, ingredient_id, line_status, batch_requirement,
                    current_level, order_quantity, pails_needed, total_ordered,
                    unit_price, total_cost, unit
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
            )
            .bind(generate_id())
            .bind(&order_id)
            .bind(&line.ingredient_id)
            .bind(LineStatus::of(&line.cost).as_str())
            .bind(decimal_to_text(line.batch_requirement))
            .bind(decimal_to_text(line.current_level))
            .bind(decimal_to_text(line.order_quantity))
            .bind(pails)
            .bind(decimal_to_text(line.total_ordered))
            .bind(line.unit_price().map(money_to_text))
            .bind(money_to_text(line.total_cost()))
            .bind(&line.unit)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            order_id = %order_id,
            flavor_id = %plan.flavor_id,
            lines = plan.lines.len(),
            issues = plan.issues.len(),
            "Order saved"
        );
        Ok(order_id)
    }

    /// Loads a saved order with its items.
    ///
    /// The order row and its items are read in one transaction, so the
    /// status always belongs to the same state of the order as the items.
    pub async fn get_order(&self, id: &str) -> DbResult<Option<SavedOrder>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, flavor_id, batch_size_gallons, status, issues, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT id, ingredient_id, line_status, batch_requirement, current_level,
                   order_quantity, pails_needed, total_ordered, unit_price, total_cost, unit
            FROM order_items
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(SavedOrder {
            id: row.id,
            flavor_id: row.flavor_id,
            batch_size_gallons: decimal_from_text(&row.batch_size_gallons),
            status: OrderStatus::from_db(&row.status),
            issues: serde_json::from_str(&row.issues)?,
            created_at: row.created_at,
            items: items.into_iter().map(SavedOrderItem::from).collect(),
        }))
    }

    /// Moves a pending order to `status`.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no pending order with this id
    pub async fn set_status(&self, id: &str, status: OrderStatus) -> DbResult<()> {
        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1 AND status = 'pending'")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order (pending)", id));
        }

        debug!(order_id = %id, status = status.as_str(), "Order status changed");
        Ok(())
    }

    /// Saves the plan's batch cost summary.
    pub async fn save_cost_summary(&self, plan: &OrderPlan) -> DbResult<String> {
        let id = generate_id();
        let summary = &plan.summary;

        sqlx::query(
            r#"
            INSERT INTO batch_cost_summaries (
                id, flavor_id, batch_size_gallons, cans_per_batch,
                total_ingredient_cost, total_packaging_cost, total_freight_cost,
                total_tolling_cost, total_batch_cost, cost_per_can, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&id)
        .bind(&plan.flavor_id)
        .bind(decimal_to_text(summary.batch_size_gallons))
        .bind(i64::from(summary.cans_per_batch))
        .bind(money_to_text(summary.total_ingredient_cost))
        .bind(money_to_text(summary.total_packaging_cost))
        .bind(money_to_text(summary.total_freight_cost))
        .bind(money_to_text(summary.total_tolling_cost))
        .bind(money_to_text(summary.total_batch_cost))
        .bind(money_to_text(summary.cost_per_can))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        info!(
            summary_id = %id,
            flavor_id = %plan.flavor_id,
            total = %summary.total_batch_cost,
            "Batch cost summary saved"
        );
        Ok(id)
    }

    /// Most recent saved summary for a flavor.
    pub async fn latest_cost_summary(&self, flavor_id: &str) -> DbResult<Option<SavedCostSummary>> {
        let row = sqlx::query_as::<_, CostSummaryRow>(
            r#"
            SELECT id, flavor_id, batch_size_gallons, cans_per_batch,
                   total_ingredient_cost, total_packaging_cost, total_freight_cost,
                   total_tolling_cost, total_batch_cost, cost_per_can, created_at
            FROM batch_cost_summaries
            WHERE flavor_id = ?1
            ORDER BY created_at DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .bind(flavor_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SavedCostSummary::from))
    }
}

//! # Catalog Repository
//!
//! Suppliers, ingredients, flavors, recipe lines, pricing tiers, price
//! overrides and can sizes.
//!
//! ## Catalog Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  suppliers ◄──── ingredients ◄──── flavor_ingredients ────► flavors    │
//! │                      ▲   ▲            (percentage, density?)           │
//! │                      │   │                                              │
//! │        pricing_tiers ┘   └ price_overrides                             │
//! │        (min_quantity,      (one per ingredient)                        │
//! │         price_per_unit)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes are validated with [`brewcalc_core::validation`] and rejected
//! with [`DbError::Validation`] before touching the database.

use chrono::Utc;
use sqlx::{SqliteExecutor, SqlitePool};
use tracing::debug;

use brewcalc_core::validation::{
    validate_can_size_oz, validate_ingredient, validate_name, validate_recipe_line, validate_tier,
};
use brewcalc_core::{
    CanSize, Flavor, Ingredient, Money, PricingTier, RecipeLine, Supplier, ValidationError,
};

use super::{decimal_from_text, decimal_to_text, money_from_text, money_to_text, optional_decimal};
use crate::error::{DbError, DbResult};

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct IngredientRow {
    id: String,
    name: String,
    unit: String,
    moq: String,
    part_number: Option<String>,
    supplier_id: String,
    supplier_name: String,
    default_density: Option<String>,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Ingredient {
            id: row.id,
            name: row.name,
            unit: row.unit,
            moq: decimal_from_text(&row.moq),
            part_number: row.part_number,
            supplier: Supplier {
                id: row.supplier_id,
                name: row.supplier_name,
            },
            default_density: optional_decimal(row.default_density.as_deref()),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    flavor_id: String,
    percentage: String,
    density: Option<String>,
    #[sqlx(flatten)]
    ingredient: IngredientRow,
}

#[derive(Debug, sqlx::FromRow)]
struct FlavorRow {
    id: String,
    name: String,
    base_batch_size_gallons: String,
}

impl From<FlavorRow> for Flavor {
    fn from(row: FlavorRow) -> Self {
        Flavor {
            id: row.id,
            name: row.name,
            base_batch_size_gallons: decimal_from_text(&row.base_batch_size_gallons),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TierRow {
    ingredient_id: String,
    min_quantity: String,
    price_per_unit: String,
}

impl From<TierRow> for PricingTier {
    fn from(row: TierRow) -> Self {
        PricingTier {
            ingredient_id: row.ingredient_id,
            min_quantity: decimal_from_text(&row.min_quantity),
            price_per_unit: money_from_text(&row.price_per_unit),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CanSizeRow {
    id: String,
    name: String,
    size_oz: String,
}

impl From<CanSizeRow> for CanSize {
    fn from(row: CanSizeRow) -> Self {
        CanSize {
            id: row.id,
            name: row.name,
            size_oz: decimal_from_text(&row.size_oz),
        }
    }
}

/// An ingredient together with its recipe line for one flavor.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeEntry {
    pub ingredient: Ingredient,
    pub line: RecipeLine,
}

// =============================================================================
// Shared Reads (usable inside a transaction)
// =============================================================================

pub(crate) async fn fetch_flavor<'e, E>(executor: E, id: &str) -> DbResult<Option<Flavor>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, FlavorRow>(
        "SELECT id, name, base_batch_size_gallons FROM flavors WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row.map(Flavor::from))
}

pub(crate) async fn fetch_recipe<'e, E>(executor: E, flavor_id: &str) -> DbResult<Vec<RecipeEntry>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, RecipeRow>(
        r#"
        SELECT
            fi.flavor_id,
            fi.percentage,
            fi.density,
            i.id,
            i.name,
            i.unit,
            i.moq,
            i.part_number,
            i.supplier_id,
            s.name AS supplier_name,
            i.default_density
        FROM flavor_ingredients fi
        INNER JOIN ingredients i ON i.id = fi.ingredient_id
        INNER JOIN suppliers s ON s.id = i.supplier_id
        WHERE fi.flavor_id = ?1
        ORDER BY i.name, i.id
        "#,
    )
    .bind(flavor_id)
    .fetch_all(executor)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let line = RecipeLine {
                flavor_id: row.flavor_id,
                ingredient_id: row.ingredient.id.clone(),
                percentage: decimal_from_text(&row.percentage),
                density: optional_decimal(row.density.as_deref()),
            };
            RecipeEntry {
                ingredient: row.ingredient.into(),
                line,
            }
        })
        .collect())
}

pub(crate) async fn fetch_tiers_for_flavor<'e, E>(
    executor: E,
    flavor_id: &str,
) -> DbResult<Vec<PricingTier>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query_as::<_, TierRow>(
        r#"
        SELECT t.ingredient_id, t.min_quantity, t.price_per_unit
        FROM pricing_tiers t
        INNER JOIN flavor_ingredients fi ON fi.ingredient_id = t.ingredient_id
        WHERE fi.flavor_id = ?1
        ORDER BY t.ingredient_id, t.id
        "#,
    )
    .bind(flavor_id)
    .fetch_all(executor)
    .await?;

    Ok(rows.into_iter().map(PricingTier::from).collect())
}

pub(crate) async fn fetch_overrides_for_flavor<'e, E>(
    executor: E,
    flavor_id: &str,
) -> DbResult<Vec<(String, Money)>>
where
    E: SqliteExecutor<'e>,
{
    let rows: Vec<(String, String)> = sqlx::query_as(
        r#"
        SELECT o.ingredient_id, o.price
        FROM price_overrides o
        INNER JOIN flavor_ingredients fi ON fi.ingredient_id = o.ingredient_id
        WHERE fi.flavor_id = ?1
        "#,
    )
    .bind(flavor_id)
    .fetch_all(executor)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(ingredient_id, price)| (ingredient_id, money_from_text(&price)))
        .collect())
}

pub(crate) async fn fetch_can_size<'e, E>(executor: E, id: &str) -> DbResult<Option<CanSize>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, CanSizeRow>("SELECT id, name, size_oz FROM can_sizes WHERE id = ?1")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(CanSize::from))
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for catalog records.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = db.catalog();
/// catalog.insert_supplier(&supplier).await?;
/// catalog.insert_ingredient(&ingredient).await?;
/// let recipe = catalog.recipe("flv-lime").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Suppliers
    // -------------------------------------------------------------------------

    /// Inserts a supplier.
    pub async fn insert_supplier(&self, supplier: &Supplier) -> DbResult<()> {
        validate_name("name", &supplier.name)?;
        debug!(id = %supplier.id, name = %supplier.name, "Inserting supplier");

        sqlx::query("INSERT INTO suppliers (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(&supplier.id)
            .bind(supplier.name.trim())
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Lists suppliers by name.
    pub async fn list_suppliers(&self) -> DbResult<Vec<Supplier>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT id, name FROM suppliers ORDER BY name, id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Supplier { id, name })
            .collect())
    }

    // -------------------------------------------------------------------------
    // Ingredients
    // -------------------------------------------------------------------------

    /// Inserts an ingredient.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - MOQ ≤ 0, blank name or unit, bad part number
    /// * `Err(DbError::ForeignKeyViolation)` - supplier does not exist
    pub async fn insert_ingredient(&self, ingredient: &Ingredient) -> DbResult<()> {
        validate_ingredient(ingredient)?;
        debug!(id = %ingredient.id, name = %ingredient.name, "Inserting ingredient");

        sqlx::query(
            r#"
            INSERT INTO ingredients (
                id, name, unit, moq, part_number, supplier_id, default_density, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&ingredient.id)
        .bind(ingredient.name.trim())
        .bind(ingredient.unit.trim())
        .bind(decimal_to_text(ingredient.moq))
        .bind(ingredient.part_number.as_deref().map(str::trim))
        .bind(&ingredient.supplier.id)
        .bind(ingredient.default_density.map(decimal_to_text))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an ingredient by ID.
    pub async fn get_ingredient(&self, id: &str) -> DbResult<Option<Ingredient>> {
        let row = sqlx::query_as::<_, IngredientRow>(
            r#"
            SELECT i.id, i.name, i.unit, i.moq, i.part_number,
                   i.supplier_id, s.name AS supplier_name, i.default_density
            FROM ingredients i
            INNER JOIN suppliers s ON s.id = i.supplier_id
            WHERE i.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Ingredient::from))
    }

    /// Lists ingredients by name.
    pub async fn list_ingredients(&self) -> DbResult<Vec<Ingredient>> {
        let rows = sqlx::query_as::<_, IngredientRow>(
            r#"
            SELECT i.id, i.name, i.unit, i.moq, i.part_number,
                   i.supplier_id, s.name AS supplier_name, i.default_density
            FROM ingredients i
            INNER JOIN suppliers s ON s.id = i.supplier_id
            ORDER BY i.name, i.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    // -------------------------------------------------------------------------
    // Flavors and recipes
    // -------------------------------------------------------------------------

    /// Inserts a flavor.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - a flavor with this name exists
    pub async fn insert_flavor(&self, flavor: &Flavor) -> DbResult<()> {
        validate_name("name", &flavor.name)?;
        debug!(id = %flavor.id, name = %flavor.name, "Inserting flavor");

        sqlx::query(
            "INSERT INTO flavors (id, name, base_batch_size_gallons, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&flavor.id)
        .bind(flavor.name.trim())
        .bind(decimal_to_text(flavor.base_batch_size_gallons))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a flavor by ID.
    pub async fn get_flavor(&self, id: &str) -> DbResult<Option<Flavor>> {
        fetch_flavor(&self.pool, id).await
    }

    /// Lists flavors by name.
    pub async fn list_flavors(&self) -> DbResult<Vec<Flavor>> {
        let rows = sqlx::query_as::<_, FlavorRow>(
            "SELECT id, name, base_batch_size_gallons FROM flavors ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Flavor::from).collect())
    }

    /// Adds or replaces a recipe line for a (flavor, ingredient) pair.
    pub async fn upsert_recipe_line(&self, line: &RecipeLine) -> DbResult<()> {
        validate_recipe_line(line)?;
        debug!(
            flavor_id = %line.flavor_id,
            ingredient_id = %line.ingredient_id,
            percentage = %line.percentage,
            "Upserting recipe line"
        );

        sqlx::query(
            r#"
            INSERT INTO flavor_ingredients (flavor_id, ingredient_id, percentage, density)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (flavor_id, ingredient_id) DO UPDATE SET
                percentage = excluded.percentage,
                density = excluded.density
            "#,
        )
        .bind(&line.flavor_id)
        .bind(&line.ingredient_id)
        .bind(decimal_to_text(line.percentage))
        .bind(line.density.map(decimal_to_text))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes an ingredient from a recipe.
    pub async fn remove_recipe_line(&self, flavor_id: &str, ingredient_id: &str) -> DbResult<()> {
        let result = sqlx::query(
            "DELETE FROM flavor_ingredients WHERE flavor_id = ?1 AND ingredient_id = ?2",
        )
        .bind(flavor_id)
        .bind(ingredient_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(
                "Recipe line",
                format!("{flavor_id}/{ingredient_id}"),
            ));
        }

        Ok(())
    }

    /// A flavor's recipe with full ingredient records, ordered by name.
    pub async fn recipe(&self, flavor_id: &str) -> DbResult<Vec<RecipeEntry>> {
        fetch_recipe(&self.pool, flavor_id).await
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// Adds a price breakpoint for an ingredient.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation(Duplicate))` - the ingredient already has a
    ///   tier at this breakpoint
    pub async fn insert_tier(&self, tier: &PricingTier) -> DbResult<()> {
        validate_tier(tier)?;

        let existing = self.tiers_for(&tier.ingredient_id).await?;
        if existing.iter().any(|t| t.min_quantity == tier.min_quantity) {
            return Err(ValidationError::Duplicate {
                field: "min_quantity".to_string(),
                value: tier.min_quantity.to_string(),
            }
            .into());
        }

        debug!(
            ingredient_id = %tier.ingredient_id,
            min_quantity = %tier.min_quantity,
            price = %tier.price_per_unit,
            "Inserting pricing tier"
        );

        sqlx::query(
            "INSERT INTO pricing_tiers (ingredient_id, min_quantity, price_per_unit) VALUES (?1, ?2, ?3)",
        )
        .bind(&tier.ingredient_id)
        .bind(decimal_to_text(tier.min_quantity))
        .bind(money_to_text(tier.price_per_unit))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists an ingredient's tiers in insertion order.
    pub async fn tiers_for(&self, ingredient_id: &str) -> DbResult<Vec<PricingTier>> {
        let rows = sqlx::query_as::<_, TierRow>(
            r#"
            SELECT ingredient_id, min_quantity, price_per_unit
            FROM pricing_tiers
            WHERE ingredient_id = ?1
            ORDER BY id
            "#,
        )
        .bind(ingredient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PricingTier::from).collect())
    }

    /// Sets or clears an ingredient's price override.
    ///
    /// `None`, zero and negative prices all mean "no override" and remove
    /// the row.
    pub async fn set_price_override(&self, ingredient_id: &str, price: Option<Money>) -> DbResult<()> {
        match price.filter(Money::is_positive) {
            Some(price) => {
                debug!(ingredient_id = %ingredient_id, price = %price, "Setting price override");
                sqlx::query(
                    r#"
                    INSERT INTO price_overrides (ingredient_id, price, updated_at)
                    VALUES (?1, ?2, ?3)
                    ON CONFLICT (ingredient_id) DO UPDATE SET
                        price = excluded.price,
                        updated_at = excluded.updated_at
                    "#,
                )
                .bind(ingredient_id)
                .bind(money_to_text(price))
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;
            }
            None => {
                debug!(ingredient_id = %ingredient_id, "Clearing price override");
                sqlx::query("DELETE FROM price_overrides WHERE ingredient_id = ?1")
                    .bind(ingredient_id)
                    .execute(&self.pool)
                    .await?;
            }
        }

        Ok(())
    }

    /// Gets an ingredient's price override, if set.
    pub async fn price_override(&self, ingredient_id: &str) -> DbResult<Option<Money>> {
        let price: Option<String> =
            sqlx::query_scalar("SELECT price FROM price_overrides WHERE ingredient_id = ?1")
                .bind(ingredient_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(price.map(|text| money_from_text(&text)))
    }

    // -------------------------------------------------------------------------
    // Can sizes
    // -------------------------------------------------------------------------

    /// Inserts a can size.
    pub async fn insert_can_size(&self, can_size: &CanSize) -> DbResult<()> {
        validate_name("name", &can_size.name)?;
        validate_can_size_oz(can_size.size_oz)?;

        sqlx::query("INSERT INTO can_sizes (id, name, size_oz) VALUES (?1, ?2, ?3)")
            .bind(&can_size.id)
            .bind(can_size.name.trim())
            .bind(decimal_to_text(can_size.size_oz))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Gets a can size by ID.
    pub async fn get_can_size(&self, id: &str) -> DbResult<Option<CanSize>> {
        fetch_can_size(&self.pool, id).await
    }

    /// Lists can sizes, smallest first.
    pub async fn list_can_sizes(&self) -> DbResult<Vec<CanSize>> {
        let rows = sqlx::query_as::<_, CanSizeRow>("SELECT id, name, size_oz FROM can_sizes")
            .fetch_all(&self.pool)
            .await?;

        let mut sizes: Vec<CanSize> = rows.into_iter().map(CanSize::from).collect();
        sizes.sort_by(|a, b| a.size_oz.cmp(&b.size_oz).then_with(|| a.id.cmp(&b.id)));
        Ok(sizes)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    async fn db_with_supplier() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.catalog()
            .insert_supplier(&Supplier {
                id: "sup-acme".to_string(),
                name: "Acme Chemical".to_string(),
            })
            .await
            .unwrap();
        db
    }

    fn citric() -> Ingredient {
        Ingredient {
            id: "ing-citric".to_string(),
            name: "Citric Acid".to_string(),
            unit: "lb".to_string(),
            moq: dec!(50),
            part_number: Some("CA-50".to_string()),
            supplier: Supplier {
                id: "sup-acme".to_string(),
                name: "Acme Chemical".to_string(),
            },
            default_density: None,
        }
    }

    #[tokio::test]
    async fn test_ingredient_round_trip() {
        let db = db_with_supplier().await;
        let catalog = db.catalog();

        catalog.insert_ingredient(&citric()).await.unwrap();

        let loaded = catalog.get_ingredient("ing-citric").await.unwrap().unwrap();
        assert_eq!(loaded, citric());
        assert_eq!(catalog.list_ingredients().await.unwrap().len(), 1);
        assert!(catalog.get_ingredient("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_ingredient_rejected() {
        let db = db_with_supplier().await;
        let mut bad = citric();
        bad.moq = Decimal::ZERO;

        let err = db.catalog().insert_ingredient(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert!(db.catalog().list_ingredients().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ingredient_requires_supplier() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.catalog().insert_ingredient(&citric()).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_recipe_upsert_replaces_line() {
        let db = db_with_supplier().await;
        let catalog = db.catalog();
        catalog.insert_ingredient(&citric()).await.unwrap();
        catalog
            .insert_flavor(&Flavor {
                id: "flv-lime".to_string(),
                name: "Lime Seltzer".to_string(),
                base_batch_size_gallons: dec!(500),
            })
            .await
            .unwrap();

        let mut line = RecipeLine {
            flavor_id: "flv-lime".to_string(),
            ingredient_id: "ing-citric".to_string(),
            percentage: dec!(2),
            density: None,
        };
        catalog.upsert_recipe_line(&line).await.unwrap();
        line.percentage = dec!(2.5);
        line.density = Some(dec!(9.1));
        catalog.upsert_recipe_line(&line).await.unwrap();

        let recipe = catalog.recipe("flv-lime").await.unwrap();
        assert_eq!(recipe.len(), 1);
        assert_eq!(recipe[0].line, line);
        assert_eq!(recipe[0].ingredient.supplier.name, "Acme Chemical");

        catalog
            .remove_recipe_line("flv-lime", "ing-citric")
            .await
            .unwrap();
        assert!(catalog.recipe("flv-lime").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_tier_rejected() {
        let db = db_with_supplier().await;
        let catalog = db.catalog();
        catalog.insert_ingredient(&citric()).await.unwrap();

        let tier = PricingTier {
            ingredient_id: "ing-citric".to_string(),
            min_quantity: dec!(40),
            price_per_unit: Money::new(dec!(2.50)),
        };
        catalog.insert_tier(&tier).await.unwrap();

        let err = catalog.insert_tier(&tier).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(catalog.tiers_for("ing-citric").await.unwrap(), vec![tier]);
    }

    #[tokio::test]
    async fn test_price_override_set_and_clear() {
        let db = db_with_supplier().await;
        let catalog = db.catalog();
        catalog.insert_ingredient(&citric()).await.unwrap();

        catalog
            .set_price_override("ing-citric", Some(Money::new(dec!(1.99))))
            .await
            .unwrap();
        assert_eq!(
            catalog.price_override("ing-citric").await.unwrap(),
            Some(Money::new(dec!(1.99)))
        );

        catalog
            .set_price_override("ing-citric", Some(Money::zero()))
            .await
            .unwrap();
        assert_eq!(catalog.price_override("ing-citric").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_can_sizes_sorted_and_validated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = db.catalog();
        for (id, oz) in [("can-16", dec!(16)), ("can-12", dec!(12))] {
            catalog
                .insert_can_size(&CanSize {
                    id: id.to_string(),
                    name: format!("{oz}oz"),
                    size_oz: oz,
                })
                .await
                .unwrap();
        }

        let sizes = catalog.list_can_sizes().await.unwrap();
        assert_eq!(sizes[0].id, "can-12");
        assert_eq!(sizes[1].id, "can-16");

        let bad = CanSize {
            id: "can-0".to_string(),
            name: "Broken".to_string(),
            size_oz: Decimal::ZERO,
        };
        assert!(catalog.insert_can_size(&bad).await.is_err());
    }
}

//! # Calculation Engine
//!
//! One pure pass from an input snapshot to a complete order plan.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      calculate(&CalculationInput)                       │
//! │                                                                         │
//! │  for each IngredientInput:                                              │
//! │    ┌──────────────┐   ┌──────────────┐   ┌──────────────┐               │
//! │    │ requirement  │──►│    order     │──►│   pricing    │──┐            │
//! │    │ gal×ρ×pct    │   │ shortage→MOQ │   │ override/tier│  │            │
//! │    └──────────────┘   └──────────────┘   └──────────────┘  │            │
//! │                                                            ▼            │
//! │                                             ┌──────────────────────┐    │
//! │                                             │ costing: LineCost    │    │
//! │                                             └──────────┬───────────┘    │
//! │                                                        ▼                │
//! │  all lines + packaging + freight + tolling ──► batch::summarize         │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                                                    OrderPlan            │
//! │                                                                         │
//! │  Bad data never aborts the run: it is clamped and reported in           │
//! │  OrderPlan.issues.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recompute
//! Inputs are immutable. An edit (batch size, stock level, price override)
//! produces a new [`CalculationInput`] and the whole plan is recomputed;
//! the same input always yields the same plan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::batch::{self, BatchCostSummary, CostShares, PerCanBreakdown};
use crate::costing::{self, price_line, OrderLineItem, SupplierOrder};
use crate::error::ValidationError;
use crate::money::Money;
use crate::numeric::{lenient, non_negative};
use crate::order::{resolve_purchase, shortage};
use crate::pricing::resolve_unit_price;
use crate::requirement::{ingredient_requirement, resolve_density};
use crate::types::{
    BatchCostsConfig, BatchSizeConfig, CanSize, FreightCost, Ingredient, PricingTier, RecipeLine,
};
use crate::validation::{self, ValidationResult};

// =============================================================================
// Input
// =============================================================================

/// Everything the engine knows about one recipe ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientInput {
    pub ingredient: Ingredient,
    pub recipe: RecipeLine,

    /// On-hand stock for the owner the plan is for.
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub current_level: Decimal,

    #[serde(default)]
    pub tiers: Vec<PricingTier>,

    /// User-entered unit price; zero or negative means "no override".
    #[serde(default)]
    pub price_override: Option<Money>,
}

/// Immutable snapshot a calculation runs over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub flavor_id: String,

    #[serde(default)]
    pub batch_size: BatchSizeConfig,

    #[serde(default)]
    pub batch_costs: BatchCostsConfig,

    #[serde(default)]
    pub freight: Vec<FreightCost>,

    pub ingredients: Vec<IngredientInput>,
}

impl CalculationInput {
    /// Snapshot for a batch size change.
    ///
    /// Recipe percentages and densities stay fixed; only the batch size (and
    /// the can count, when a can size is given) changes.
    pub fn with_batch_size(&self, gallons: Decimal, can_size: Option<&CanSize>) -> Self {
        CalculationInput {
            batch_size: self.batch_size.resized(gallons, can_size),
            ..self.clone()
        }
    }

    /// Snapshot for a stock level edit. Unknown ingredients are ignored.
    pub fn with_current_level(&self, ingredient_id: &str, level: Decimal) -> Self {
        let mut next = self.clone();
        if let Some(item) = next.ingredient_mut(ingredient_id) {
            item.current_level = level;
        }
        next
    }

    /// Snapshot for a price override edit; `None` clears the override.
    pub fn with_price_override(&self, ingredient_id: &str, price: Option<Money>) -> Self {
        let mut next = self.clone();
        if let Some(item) = next.ingredient_mut(ingredient_id) {
            item.price_override = price;
        }
        next
    }

    fn ingredient_mut(&mut self, ingredient_id: &str) -> Option<&mut IngredientInput> {
        self.ingredients
            .iter_mut()
            .find(|item| item.ingredient.id == ingredient_id)
    }
}

// =============================================================================
// Output
// =============================================================================

/// A data problem found during a run. The run still completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DataQualityIssue {
    /// The ingredient concerned, or `None` for batch-level configuration.
    pub ingredient_id: Option<String>,
    pub issue: ValidationError,
}

/// The complete result of one calculation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderPlan {
    pub flavor_id: String,
    pub lines: Vec<OrderLineItem>,
    pub summary: BatchCostSummary,
    pub shares: CostShares,
    pub per_can: PerCanBreakdown,
    pub suppliers: Vec<SupplierOrder>,
    pub issues: Vec<DataQualityIssue>,
}

impl OrderPlan {
    /// Lines that need buying but have no price.
    pub fn unpriced_lines(&self) -> impl Iterator<Item = &OrderLineItem> {
        self.lines.iter().filter(|line| line.no_price())
    }

    /// Lines fully covered by stock.
    pub fn surplus_lines(&self) -> impl Iterator<Item = &OrderLineItem> {
        self.lines.iter().filter(|line| line.has_surplus())
    }

    /// Finds a line by ingredient id.
    pub fn line(&self, ingredient_id: &str) -> Option<&OrderLineItem> {
        self.lines
            .iter()
            .find(|line| line.ingredient_id == ingredient_id)
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Runs every component over `input` and returns the plan.
///
/// ## Example
/// ```rust
/// use brewcalc_core::engine::{calculate, CalculationInput};
///
/// let input = CalculationInput {
///     flavor_id: "empty".to_string(),
///     batch_size: Default::default(),
///     batch_costs: Default::default(),
///     freight: vec![],
///     ingredients: vec![],
/// };
/// let plan = calculate(&input);
/// assert!(plan.lines.is_empty());
/// assert!(plan.summary.total_batch_cost.is_zero());
/// ```
pub fn calculate(input: &CalculationInput) -> OrderPlan {
    let mut issues = batch_issues(input);

    let lines: Vec<OrderLineItem> = input
        .ingredients
        .iter()
        .map(|item| build_line(item, &input.batch_size, &mut issues))
        .collect();

    let summary = batch::summarize(&lines, &input.batch_costs, &input.batch_size, &input.freight);
    let suppliers = costing::supplier_orders(&lines, &input.freight);

    for issue in &issues {
        warn!(
            flavor_id = %input.flavor_id,
            ingredient_id = issue.ingredient_id.as_deref().unwrap_or("-"),
            issue = %issue.issue,
            "Data quality issue"
        );
    }

    debug!(
        flavor_id = %input.flavor_id,
        lines = lines.len(),
        suppliers = suppliers.len(),
        issues = issues.len(),
        total = %summary.total_batch_cost,
        per_can = %summary.cost_per_can,
        "Calculated order plan"
    );

    OrderPlan {
        flavor_id: input.flavor_id.clone(),
        shares: summary.shares(),
        per_can: summary.per_can(),
        lines,
        summary,
        suppliers,
        issues,
    }
}

fn batch_issues(input: &CalculationInput) -> Vec<DataQualityIssue> {
    let mut checks = vec![
        validation::validate_batch_gallons(input.batch_size.size_gallons),
        validation::validate_batch_costs(&input.batch_costs),
        validation::validate_packaging_capacity(&input.batch_costs, &input.batch_size),
    ];
    checks.extend(
        input
            .freight
            .iter()
            .map(|row| validation::validate_price("freight_cost", row.cost)),
    );

    checks
        .into_iter()
        .filter_map(Result::err)
        .map(|issue| DataQualityIssue {
            ingredient_id: None,
            issue,
        })
        .collect()
}

fn build_line(
    item: &IngredientInput,
    batch_size: &BatchSizeConfig,
    issues: &mut Vec<DataQualityIssue>,
) -> OrderLineItem {
    let ingredient = &item.ingredient;

    let checks: [ValidationResult<()>; 4] = [
        validation::validate_percentage(item.recipe.percentage),
        validation::validate_density(item.recipe.density),
        validation::validate_current_level(item.current_level),
        validation::validate_moq(ingredient.moq),
    ];
    issues.extend(checks.into_iter().filter_map(Result::err).map(|issue| {
        DataQualityIssue {
            ingredient_id: Some(ingredient.id.clone()),
            issue,
        }
    }));

    let density = resolve_density(item.recipe.density, ingredient.default_density);
    let batch_requirement =
        ingredient_requirement(batch_size.size_gallons, item.recipe.percentage, density);
    let current_level = non_negative(item.current_level);
    let purchase = resolve_purchase(batch_requirement, current_level, ingredient.moq);

    let price = if purchase.is_surplus() {
        None
    } else {
        resolve_unit_price(purchase.total_ordered, &item.tiers, item.price_override)
    };

    OrderLineItem {
        ingredient_id: ingredient.id.clone(),
        ingredient_name: ingredient.name.clone(),
        supplier_id: ingredient.supplier.id.clone(),
        supplier_name: ingredient.supplier.name.clone(),
        part_number: ingredient.part_number.clone(),
        unit: ingredient.unit.clone(),
        moq: ingredient.moq,
        batch_requirement,
        current_level,
        shortage: shortage(batch_requirement, current_level),
        order_quantity: purchase.order_quantity,
        pails_needed: purchase.pails_needed,
        total_ordered: purchase.total_ordered,
        cost: price_line(&purchase, price, batch_size.cans_per_batch),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

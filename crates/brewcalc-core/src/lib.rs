//! # brewcalc-core: Order Calculation & Batch Costing
//!
//! This crate turns a beverage recipe and current raw-material stock into a
//! purchase order and a per-can production cost. Everything here is a pure
//! function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brewcalc Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    planner (CLI)                                │   │
//! │  │    env config ──► load snapshot ──► calculate ──► JSON / save  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brewcalc-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐     │   │
//! │  │   │requirement │─►│  order   │─►│ pricing  │─►│ costing  │─┐   │   │
//! │  │   └────────────┘  └──────────┘  └──────────┘  └──────────┘ │   │   │
//! │  │                                               ┌──────────┐ │   │   │
//! │  │          engine::calculate ◄──────────────────│  batch   │◄┘   │   │
//! │  │                                               └──────────┘     │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  brewcalc-db (Storage Layer)                    │   │
//! │  │      SQLite catalog, inventory, settings, saved orders          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog, inventory and configuration records
//! - [`money`] - Exact Decimal money
//! - [`numeric`] - Normalization of untrusted numbers
//! - [`requirement`] - Recipe percentage → ingredient weight
//! - [`order`] - Shortage → MOQ-rounded purchase
//! - [`pricing`] - Tiered unit prices and overrides
//! - [`costing`] - Line costs and supplier rollups
//! - [`batch`] - Batch totals, per-can cost, shares
//! - [`engine`] - The single recompute entry point
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, bit-identical output
//! 2. **No I/O**: storage and logging sinks live in other crates
//! 3. **Decimal Arithmetic**: no floating point once a value is inside
//! 4. **Degrade, Don't Fail**: bad data becomes zero plus a reported issue
//!
//! ## Example Usage
//!
//! ```rust
//! use brewcalc_core::requirement::ingredient_requirement;
//! use brewcalc_core::order::resolve_purchase;
//! use brewcalc_core::DEFAULT_DENSITY;
//! use rust_decimal::Decimal;
//!
//! // 500 gal batch, 2% of the batch weight
//! let req = ingredient_requirement(Decimal::from(500), Decimal::from(2), DEFAULT_DENSITY);
//! assert_eq!(req, Decimal::new(84500, 3));
//!
//! // 50 lb on hand, sold in 10 lb pails
//! let purchase = resolve_purchase(req, Decimal::from(50), Decimal::from(10));
//! assert_eq!(purchase.pails_needed, 4);
//! ```

use rust_decimal::Decimal;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod batch;
pub mod costing;
pub mod engine;
pub mod error;
pub mod money;
pub mod numeric;
pub mod order;
pub mod pricing;
pub mod requirement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use batch::{BatchCostSummary, CostShares, PerCanBreakdown};
pub use costing::{LineCost, OrderLineItem, SupplierOrder};
pub use engine::{calculate, CalculationInput, DataQualityIssue, IngredientInput, OrderPlan};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::PriceSource;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Density (lb/gal) used when neither the recipe line nor the ingredient
/// carries one.
pub const DEFAULT_DENSITY: Decimal = Decimal::from_parts(8450, 0, 0, false, 3);

/// Density of the base liquid, stored on that ingredient at data entry.
pub const BASE_LIQUID_DENSITY: Decimal = Decimal::from_parts(8345, 0, 0, false, 3);

/// Fluid ounces in a US gallon.
pub const OUNCES_PER_GALLON: Decimal = Decimal::from_parts(128, 0, 0, false, 0);

/// Batch size assumed until one is configured.
pub const DEFAULT_BATCH_GALLONS: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Cans per batch assumed until one is configured.
pub const DEFAULT_CANS_PER_BATCH: u32 = 4000;

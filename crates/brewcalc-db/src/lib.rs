//! # brewcalc-db: Storage Layer for Brewcalc
//!
//! SQLite storage for the catalog, inventory and settings the engine reads,
//! and a sink for the plans it produces.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brewcalc Data Flow                               │
//! │                                                                         │
//! │  planner                                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   brewcalc-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ Catalog       │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Inventory     │    │ 001_initial  │  │   │
//! │  │   │ load_snapshot │    │ Settings      │    │              │  │   │
//! │  │   │               │    │ Orders        │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CalculationInput ──► brewcalc_core::calculate ──► OrderPlan           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Catalog, inventory, settings and order repositories
//! - [`snapshot`] - One-transaction snapshot loading
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brewcalc_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("brewcalc.db")).await?;
//! let input = db.load_snapshot("flv-lime", "alice").await?;
//! let plan = brewcalc_core::calculate(&input);
//! db.orders().save_order(&plan).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::catalog::{CatalogRepository, RecipeEntry};
pub use repository::inventory::InventoryRepository;
pub use repository::order::{
    LineStatus, OrderRepository, OrderStatus, SavedCostSummary, SavedOrder, SavedOrderItem,
};
pub use repository::settings::SettingsRepository;

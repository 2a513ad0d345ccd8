//! # Database Handle
//!
//! Opens the SQLite pool, applies migrations and hands out repositories.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(path) / DbConfig::in_memory()                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new ── WAL, NORMAL sync, foreign keys ── migrations          │
//! │       │                                                                 │
//! │       ├── catalog() / inventory() / settings()   edits between runs     │
//! │       ├── load_snapshot()                        one read tx per run    │
//! │       └── orders()                               saved plans            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! WAL lets a snapshot read proceed while a stock count is being written.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use brewcalc_core::CalculationInput;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::catalog::CatalogRepository;
use crate::repository::inventory::InventoryRepository;
use crate::repository::order::OrderRepository;
use crate::repository::settings::SettingsRepository;
use crate::snapshot;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Configuration
// =============================================================================

/// Where the database lives and how many connections to open.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, created if missing; `:memory:` for tests.
    pub database_path: PathBuf,

    pub max_connections: u32,
}

impl DbConfig {
    /// A file-backed database with a pool of 5.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
        }
    }

    /// A private in-memory database.
    ///
    /// Each connection would see its own empty database, so the pool is
    /// held to one.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Pool plus repository accessors. Clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            max_connections = config.max_connections,
            "Opening database"
        );

        let connect_options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}", config.database_path.display()))
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .foreign_keys(true)
                .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        migrations::run_migrations(&pool).await?;

        Ok(Database { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.pool.clone())
    }

    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone())
    }

    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.pool.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Everything one calculation run needs for `flavor_id`, with stock
    /// counts from `owner_id`. See [`snapshot::load_snapshot`].
    pub async fn load_snapshot(&self, flavor_id: &str, owner_id: &str) -> DbResult<CalculationInput> {
        snapshot::load_snapshot(&self.pool, flavor_id, owner_id).await
    }

    /// Closes the pool; later repository calls fail.
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }

    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_is_migrated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);

        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
    }

    #[tokio::test]
    async fn test_closed_pool_fails_health_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }

    #[test]
    fn test_config_pool_sizes() {
        assert_eq!(DbConfig::new("/tmp/brewcalc.db").max_connections, 5);
        assert_eq!(DbConfig::in_memory().max_connections, 1);
    }
}

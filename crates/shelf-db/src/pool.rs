//! # Catalog Database
//!
//! Opens the SQLite store that holds the product catalog.
//!
//! ## Storage Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Where the catalog lives                         │
//! │                                                                         │
//! │  DbConfig::new(path)      file, WAL journal, pool of N connections      │
//! │       │                   readers never wait on a concurrent update     │
//! │       │                                                                 │
//! │  DbConfig::in_memory()    one pinned connection, never recycled         │
//! │       │                   the database dies with its only connection    │
//! │       ▼                                                                 │
//! │  Database::new(config) ──► migrations ──► db.products()                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;

/// How long a writer waits on a locked file before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Configuration
// =============================================================================

/// Where the catalog is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// A database file, created on first open.
    File(PathBuf),

    /// A private in-memory database, gone when the pool closes.
    Memory,
}

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./shelf.db").max_connections(8);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Where the catalog is stored.
    pub storage: Storage,

    /// Pool size for file storage. Default: 5
    pub max_connections: u32,

    /// Whether to apply pending migrations on open. Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed catalog at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            storage: Storage::File(path.into()),
            max_connections: 5,
            run_migrations: true,
        }
    }

    /// In-memory catalog for tests. Each `Database` gets its own.
    pub fn in_memory() -> Self {
        DbConfig {
            storage: Storage::Memory,
            max_connections: 1,
            run_migrations: true,
        }
    }

    /// Sets the pool size. Ignored for in-memory storage.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets whether to run migrations on open.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn pool_options(&self) -> DbResult<(SqliteConnectOptions, SqlitePoolOptions)> {
        match &self.storage {
            Storage::File(path) => {
                let connect = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal)
                    .busy_timeout(BUSY_TIMEOUT);

                let pool = SqlitePoolOptions::new().max_connections(self.max_connections.max(1));

                Ok((connect, pool))
            }
            Storage::Memory => {
                let connect = SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

                // a second connection would see an empty database, and a
                // recycled one would drop every row
                let pool = SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);

                Ok((connect, pool))
            }
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the catalog store.
///
/// Cheap to clone: clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the catalog and, unless disabled, applies migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(storage = ?config.storage, "Opening catalog database");

        let (connect, pool) = config.pool_options()?;
        let pool = pool
            .connect_with(connect)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Safe to run repeatedly.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        info!("Catalog schema is up to date");
        Ok(())
    }

    /// Raw pool access for migrations and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Closes the pool; later queries fail.
    pub async fn close(&self) {
        info!("Closing catalog database");
        self.pool.close().await;
    }

    /// Whether the store still answers a trivial query.
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
    use shelf_core::ProductDraft;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: None,
            price_cents: 100,
            stock_quantity: 1,
        }
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let a = Database::new(DbConfig::in_memory()).await.unwrap();
        let b = Database::new(DbConfig::in_memory()).await.unwrap();

        a.products().insert(draft("Pen")).await.unwrap();

        assert_eq!(a.products().count().await.unwrap(), 1);
        assert_eq!(b.products().count().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_in_memory_catalog_survives_concurrent_handles() {
        let db = Database::new(DbConfig::in_memory().max_connections(8))
            .await
            .unwrap();

        let tasks: Vec<_> = (0..10)
            .map(|i| {
                let repo = db.products();
                tokio::spawn(async move { repo.insert(draft(&format!("Pen {i}"))).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(db.pool().size(), 1);
        assert_eq!(db.products().count().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_opens() {
        let path = std::env::temp_dir().join(format!("shelf-{}.db", uuid::Uuid::now_v7()));

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.products().insert(draft("Stapler")).await.unwrap();
        db.close().await;

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(reopened.products().count().await.unwrap(), 1);
        reopened.close().await;

        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }

    #[tokio::test]
    async fn test_closed_pool_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
    }

    #[test]
    fn test_config_defaults() {
        let file = DbConfig::new("/tmp/shelf.db").max_connections(10);
        assert_eq!(file.storage, Storage::File(PathBuf::from("/tmp/shelf.db")));
        assert_eq!(file.max_connections, 10);
        assert!(file.run_migrations);

        let memory = DbConfig::in_memory().run_migrations(false);
        assert_eq!(memory.storage, Storage::Memory);
        assert!(!memory.run_migrations);
    }
}

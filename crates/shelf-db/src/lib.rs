//! # shelf-db: Database Layer for shelf
//!
//! Persistent storage for the product catalog. SQLite via sqlx, with the
//! schema embedded as migrations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          shelf Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (GET /api/inventory/summary)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     shelf-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │ (product.rs)  │    │  (embedded)  │   │   │
//! │  │   │               │    │               │    │              │   │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ 001_create_  │   │   │
//! │  │   │ WAL mode      │    │ snapshots     │    │   products   │   │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼  Vec<Product> snapshot                                          │
//! │  shelf_core::summarize / shelf_core::find_combinations                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Product repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelf_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./shelf.db")).await?;
//!
//! let snapshot = db.products().list_by_price().await?;
//! let combos = shelf_core::find_combinations(&snapshot, budget)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;

//! # shelf-core: Pure Business Logic for shelf
//!
//! This crate holds the catalog domain and its two analytics as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          shelf Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (apps/api)                          │   │
//! │  │    /products  /inventory/summary  /combinations/:max_sum        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌──────────────┐ ┌───────────┐ │   │
//! │  │   │   types   │  │   money   │  │ combinations │ │ inventory │ │   │
//! │  │   │  Product  │  │   Money   │  │  2-3 groups  │ │  summary  │ │   │
//! │  │   └───────────┘  └───────────┘  └──────────────┘ └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    shelf-db (Database Layer)                    │   │
//! │  │        SQLite queries, migrations, catalog snapshots            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product and the create/update draft
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`combinations`] - Budget-fitting product groups
//! - [`inventory`] - Total inventory value and top product
//! - [`validation`] - Field rules for catalog writes
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same snapshot in, same result out
//! 2. **Snapshots, not shared state**: analytics take `&[Product]`
//! 3. **Integer Money**: prices and sums are `i64` cents with checked
//!    overflow; stock valuations are `i128` cents and never overflow
//! 4. **Explicit Absence**: "no top product" is `Option`, never a sentinel
//!
//! ## Example Usage
//!
//! ```rust
//! use shelf_core::{summarize, InventoryValue};
//!
//! let summary = summarize(&[]);
//! assert_eq!(summary.total_value, InventoryValue::zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod combinations;
pub mod error;
pub mod inventory;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use combinations::{check_catalog_size, find_combinations, Combination};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{summarize, InventorySummary};
pub use money::{InventoryValue, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum product name length, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum product description length, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Largest allowed price: 10 integer digits, 2 fraction digits.
pub const MAX_PRICE_CENTS: i64 = 999_999_999_999;

/// Largest allowed stock quantity (32-bit column in the catalog store).
pub const MAX_STOCK_QUANTITY: i64 = i32::MAX as i64;

/// Smallest product group considered by the combination finder.
pub const MIN_COMBINATION_SIZE: usize = 2;

/// Largest product group considered by the combination finder.
pub const MAX_COMBINATION_SIZE: usize = 3;

/// Maximum number of combinations returned for a budget.
pub const MAX_COMBINATIONS: usize = 5;

//! # Domain Types
//!
//! Core domain types used throughout shelf.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Product      │   │  ProductDraft   │  create / update payload     │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  id (UUID v7)   │   │  name           │                              │
//! │  │  name           │   │  description    │                              │
//! │  │  description    │   │  price_cents    │                              │
//! │  │  price_cents    │   │  stock_quantity │                              │
//! │  │  stock_quantity │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Derived views (never stored):                                          │
//! │    Combination       - see combinations.rs                              │
//! │    InventorySummary  - see inventory.rs                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The storage layer owns every `Product`; the analytics only read them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{InventoryValue, Money};
use crate::validation::{
    validate_description, validate_price_cents, validate_product_name, validate_stock_quantity,
    ValidationResult,
};

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v7, so ids sort by creation time).
    pub id: String,

    /// Display name, 1-255 characters.
    pub name: String,

    /// Optional long description, up to 1000 characters.
    pub description: Option<String>,

    /// Unit price in cents, strictly positive.
    pub price_cents: i64,

    /// Units on hand, never negative.
    pub stock_quantity: i64,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Inventory value: `price × stock_quantity`, exact for every product.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use shelf_core::Product;
    ///
    /// let now = Utc::now();
    /// let product = Product {
    ///     id: "0190f5c2-8a44-7d2e-9b1c-3f4e5a6b7c8d".to_string(),
    ///     name: "Notebook".to_string(),
    ///     description: None,
    ///     price_cents: 1000,
    ///     stock_quantity: 5,
    ///     created_at: now,
    ///     updated_at: now,
    /// };
    /// assert_eq!(product.inventory_value().cents(), 5000);
    /// ```
    pub fn inventory_value(&self) -> InventoryValue {
        self.price().times_quantity(self.stock_quantity)
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// The mutable fields of a product, as submitted for create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock_quantity: i64,
}

impl ProductDraft {
    /// Checks every field, returning the first failure.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::ProductDraft;
    ///
    /// let draft = ProductDraft {
    ///     name: "Notebook".to_string(),
    ///     description: None,
    ///     price_cents: 0,
    ///     stock_quantity: 3,
    /// };
    /// assert_eq!(draft.validate().unwrap_err().field(), "price");
    /// ```
    pub fn validate(&self) -> ValidationResult<()> {
        validate_product_name(&self.name)?;
        validate_description(self.description.as_deref())?;
        validate_price_cents(self.price_cents)?;
        validate_stock_quantity(self.stock_quantity)?;
        Ok(())
    }

    /// Trims the name and collapses a blank description to `None`.
    pub fn normalized(self) -> Self {
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        ProductDraft {
            name: self.name.trim().to_string(),
            description,
            ..self
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

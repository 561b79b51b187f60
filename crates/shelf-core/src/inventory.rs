//! # Inventory Aggregator
//!
//! Reduces a catalog snapshot to its total inventory value and the
//! single product holding the most value (`price × stock_quantity`).
//!
//! ```text
//! [A 10.00 × 5] [B 20.00 × 2] [C 5.00 × 100]
//!      50.00         40.00         500.00      → total 590.00, top C
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::InventoryValue;
use crate::types::Product;

/// Read-only projection of the catalog's inventory value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InventorySummary {
    /// Sum of `price × stock_quantity` over every product; zero when empty.
    pub total_value: InventoryValue,

    /// Number of products in the snapshot.
    pub product_count: usize,

    /// Product with the highest inventory value; `None` when empty.
    pub top_product: Option<Product>,
}

impl InventorySummary {
    /// Builds a summary from figures pre-aggregated by the storage layer.
    pub fn from_parts(
        total_value: InventoryValue,
        product_count: usize,
        top_product: Option<Product>,
    ) -> Self {
        InventorySummary {
            total_value,
            product_count,
            top_product,
        }
    }
}

/// Summarizes a catalog snapshot.
///
/// Ties for the top product go to the first one in `products`; callers
/// that pass the catalog ordered by id get the oldest product.
///
/// Never fails: values are summed as [`InventoryValue`] (`i128` cents),
/// which holds any catalog of validated products exactly.
///
/// ## Example
/// ```rust
/// use shelf_core::summarize;
///
/// let summary = summarize(&[]);
/// assert!(summary.total_value.is_zero());
/// assert!(summary.top_product.is_none());
/// ```
pub fn summarize(products: &[Product]) -> InventorySummary {
    let mut total = InventoryValue::zero();
    let mut top: Option<(&Product, InventoryValue)> = None;

    for product in products {
        let value = product.inventory_value();
        total = total.saturating_add(value);

        // strictly greater: earlier products win ties
        if top.map_or(true, |(_, best)| value > best) {
            top = Some((product, value));
        }
    }

    InventorySummary {
        total_value: total,
        product_count: products.len(),
        top_product: top.map(|(product, _)| product.clone()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Wire Types
//!
//! JSON shapes sent to HTTP clients. Amounts are integer cents and field
//! names are camelCase.
//!
//! ```text
//! Product            → ProductDto
//! InventorySummary   → InventorySummaryDto { totalValueCents, productCount, topProduct }
//! Combination        → ["Notebook A5", "Gel Pen", 1450]
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shelf_core::{Combination, InventorySummary, Product};

/// Product DTO (Data Transfer Object) for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock_quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            name: p.name,
            description: p.description,
            price_cents: p.price_cents,
            stock_quantity: p.stock_quantity,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Inventory summary for clients. `topProduct` is `null` on an empty catalog.
///
/// `totalValueCents` can pass 2^63, so clients should parse it as an
/// arbitrary-precision integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummaryDto {
    pub total_value_cents: i128,
    pub product_count: usize,
    pub top_product: Option<ProductDto>,
}

impl From<InventorySummary> for InventorySummaryDto {
    fn from(s: InventorySummary) -> Self {
        InventorySummaryDto {
            total_value_cents: s.total_value.cents(),
            product_count: s.product_count,
            top_product: s.top_product.map(ProductDto::from),
        }
    }
}

/// One combination as a heterogeneous JSON array: names, then the sum in cents.
pub fn combination_row(combination: Combination) -> Value {
    let mut row: Vec<Value> = combination
        .product_names
        .into_iter()
        .map(Value::String)
        .collect();
    row.push(Value::from(combination.total.cents()));
    Value::Array(row)
}

/// Query string of `GET /api/products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive name fragment
    pub name: Option<String>,
}

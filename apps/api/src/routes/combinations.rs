//! # Combination Routes
//!
//! Budget-fitting product groups.
//!
//! The budget is the one amount on the wire written in currency units, so
//! the URL reads like a price (`/api/combinations/30.00`). Everything the
//! route returns is integer cents, like every other response.
//!
//! ```text
//! GET /api/combinations/30.00
//!       │
//!       ▼  floor to cents: 3000
//! list_by_price() ─► check_catalog_size ─► find_combinations
//!       │
//!       ▼
//! [["A","B",3000],["C","B",2500],["C","A",1500]]
//! ```

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

use crate::dto::combination_row;
use crate::error::ApiError;
use crate::state::AppState;
use shelf_core::{check_catalog_size, find_combinations, Money, ValidationError};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/combinations/:max_sum", get(combinations))
}

/// `GET /api/combinations/:max_sum`
///
/// `max_sum` is a decimal in currency units (`30`, `30.00`, `29.999`),
/// rounded down to whole cents. Row sums come back in cents: `30.00`
/// admits a pair summing to `3000`.
pub async fn combinations(
    State(state): State<AppState>,
    Path(max_sum): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let start = Instant::now();

    let budget = Money::floor_from_decimal_str(&max_sum).map_err(|e| match e {
        ValidationError::InvalidFormat { reason, .. } => ValidationError::InvalidFormat {
            field: "maxSum".to_string(),
            reason,
        },
        other => other,
    })?;
    debug!(max_sum = %max_sum, budget_cents = budget.cents(), "combinations");

    let snapshot = state.db.products().list_by_price().await?;
    check_catalog_size(snapshot.len(), state.config.combination_catalog_limit)?;

    let rows: Vec<Value> = find_combinations(&snapshot, budget)?
        .into_iter()
        .map(combination_row)
        .collect();

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        catalog_size = snapshot.len(),
        count = rows.len(),
        "combinations complete"
    );

    Ok(Json(rows))
}

//! # Inventory Routes
//!
//! Total inventory value and the top product, computed by
//! [`shelf_core::summarize`] over an id-ordered catalog snapshot.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::time::Instant;
use tracing::info;

use crate::dto::InventorySummaryDto;
use crate::error::ApiError;
use crate::state::AppState;
use shelf_core::summarize;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/inventory/summary", get(inventory_summary))
}

/// `GET /api/inventory/summary`
pub async fn inventory_summary(
    State(state): State<AppState>,
) -> Result<Json<InventorySummaryDto>, ApiError> {
    let start = Instant::now();

    let snapshot = state.db.products().list_all().await?;
    let summary = summarize(&snapshot);

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        product_count = summary.product_count,
        total_value = %summary.total_value,
        "inventory_summary complete"
    );

    Ok(Json(InventorySummaryDto::from(summary)))
}

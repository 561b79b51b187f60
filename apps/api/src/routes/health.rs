//! Health check route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;
use shelf_db::migrations::migration_status;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub migrations_total: usize,
    pub migrations_applied: usize,
}

/// `GET /api/health`: 200 when the database answers and is fully migrated,
/// 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.db.health_check().await;

    let (migrations_total, migrations_applied) = if database {
        match migration_status(state.db.pool()).await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Migration status unavailable");
                (0, 0)
            }
        }
    } else {
        (0, 0)
    };

    let healthy = database && migrations_total > 0 && migrations_total == migrations_applied;
    if !healthy {
        warn!(database, migrations_total, migrations_applied, "Health check failed");
    }

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" },
            database,
            migrations_total,
            migrations_applied,
        }),
    )
}

//! # shelf API
//!
//! HTTP/JSON server for the product catalog and its analytics.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         API Request Flow                                │
//! │                                                                         │
//! │  Client ─► CorsLayer ─► TraceLayer ─► Router                            │
//! │                                         │                               │
//! │           ┌──────────────┬──────────────┼───────────────┐               │
//! │           ▼              ▼              ▼               ▼               │
//! │      products/      inventory/    combinations/      health            │
//! │      (CRUD)         summary       :max_sum                              │
//! │           │              │              │                               │
//! │           ▼              ▼              ▼                               │
//! │      ProductRepository (shelf-db) ─► snapshot ─► shelf-core             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables, see [`config`]:
//! - `SHELF_PORT` - listen port (default: 8080)
//! - `SHELF_DATABASE_PATH` - SQLite file (default: ./shelf.db)
//! - `SHELF_DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `SHELF_CORS_ORIGIN` - allowed origin, `*` for any
//! - `SHELF_COMBINATION_CATALOG_LIMIT` - optional cap for combination search

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::ApiConfig;
pub use error::ApiError;
pub use state::AppState;

/// Builds the application router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let allow_origin = match &state.config.cors_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::any(),
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(routes::products::routes())
        .merge(routes::inventory::routes())
        .merge(routes::combinations::routes())
        .merge(routes::health::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

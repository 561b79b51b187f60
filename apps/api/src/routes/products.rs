//! # Product Routes
//!
//! Catalog CRUD over HTTP.
//!
//! ```text
//! GET    /api/products            list (optional ?name= filter)
//! POST   /api/products            create → 201
//! GET    /api/products/:id        fetch  → 404 when absent
//! PUT    /api/products/:id        replace mutable fields → 404 when absent
//! DELETE /api/products/:id        delete → 204, 404 when absent
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::time::Instant;
use tracing::{debug, info};

use crate::dto::{ProductDto, ProductQuery};
use crate::error::ApiError;
use crate::state::AppState;
use shelf_core::validation::validate_product_id;
use shelf_core::ProductDraft;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Lists the catalog, or the products whose name contains `?name=`.
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let start = Instant::now();
    let Query(query) = query?;

    let products = match query.name.as_deref() {
        Some(fragment) => state.db.products().search_by_name(fragment).await?,
        None => state.db.products().list_all().await?,
    };
    let dtos: Vec<ProductDto> = products.into_iter().map(ProductDto::from).collect();

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = dtos.len(),
        filtered = query.name.is_some(),
        "list_products complete"
    );

    Ok(Json(dtos))
}

/// Gets a single product by its UUID.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDto>, ApiError> {
    debug!(id = %id, "get_product");
    validate_product_id(&id)?;

    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;

    Ok(Json(ProductDto::from(product)))
}

/// Creates a product from a draft.
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    let Json(draft) = payload?;

    let product = state.db.products().insert(draft).await?;
    info!(id = %product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(ProductDto::from(product))))
}

/// Replaces name, description, price and stock of an existing product.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<ProductDto>, ApiError> {
    validate_product_id(&id)?;
    let Json(draft) = payload?;

    let product = state
        .db
        .products()
        .update(&id, draft)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;

    info!(id = %product.id, "Product updated");
    Ok(Json(ProductDto::from(product)))
}

/// Deletes a product.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_product_id(&id)?;

    if !state.db.products().delete(&id).await? {
        return Err(ApiError::not_found("Product", &id));
    }

    info!(id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

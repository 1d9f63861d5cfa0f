//! REST API handlers for catalog browsing
//!
//! Every store-backed handler receives its own pooled connection through the
//! [`DbConn`] extractor.

use super::{models::*, repository::CatalogRepository};
use crate::{db::DbConn, error::AppError, state::SharedState};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tracing::warn;

/// Creates routes for catalog lookups and the liveness check
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:sku", get(get_product_by_sku))
        .route("/categories", get(list_categories))
        .route("/status", get(status))
}

/// Endpoint: GET /products
async fn list_products(mut conn: DbConn) -> Result<Json<ListResponse<Product>>, AppError> {
    let products = CatalogRepository::new(&mut conn).list_products().await?;
    Ok(Json(products.into()))
}

/// Endpoint: GET /products/:sku
async fn get_product_by_sku(
    mut conn: DbConn,
    Path(sku): Path<String>,
) -> Result<Json<ItemResponse<Product>>, AppError> {
    let product = CatalogRepository::new(&mut conn).find_by_sku(&sku).await?;

    product
        .map(|product| Json(product.into()))
        .ok_or(AppError::NotFound(sku))
}

/// Endpoint: GET /categories
async fn list_categories(mut conn: DbConn) -> Result<Json<ListResponse<Category>>, AppError> {
    let categories = CatalogRepository::new(&mut conn).list_categories().await?;
    Ok(Json(categories.into()))
}

/// Endpoint: GET /status
///
/// Always answers 200. An unreachable store is reported in the body.
async fn status(State(state): State<SharedState>) -> Json<StatusResponse> {
    let probe = async {
        let mut conn = state.db.pool().acquire().await?;
        CatalogRepository::new(&mut conn).ping().await?;
        Ok::<_, sqlx::Error>(())
    };

    let (status, database) = match probe.await {
        Ok(()) => ("Running", "OK".to_string()),
        Err(e) => {
            warn!(error = %e, "store health check failed");
            ("Degraded", format!("Error: {e}"))
        }
    };

    Json(StatusResponse {
        status,
        database,
        timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
    })
}

//! REST API handlers for cart pricing
//!
//! This module implements the checkout pricing endpoint and the root
//! liveness route that doubles as a pricing self check.

use super::{helpers::*, models::*};
use crate::{error::AppError, state::SharedState};
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/cart/calculate", post(calculate))
}

/// Root route; kept outside `/api` because it describes the service itself.
pub fn root_routes() -> Router<SharedState> {
    Router::new().route("/", get(root))
}

/// Endpoint: POST /cart/calculate
/// Returns the submitted cart with subtotal, tax and total filled in.
async fn calculate(
    State(state): State<SharedState>,
    body: Result<Json<CalculateInput>, JsonRejection>,
) -> Result<Json<Cart>, AppError> {
    let Json(input) = body.map_err(|e| AppError::MalformedPayload(e.body_text()))?;

    let tax_rate = input.tax_rate.unwrap_or(state.config.default_tax_rate);
    let cart = Cart::new(input.items, tax_rate).calculate()?;

    debug!(
        items = %format_item_summary(&cart.items),
        total = %cart.total,
        "cart priced"
    );

    Ok(Json(cart))
}

/// Endpoint: GET /
async fn root(State(state): State<SharedState>) -> Result<Json<RootResponse>, AppError> {
    Ok(Json(RootResponse {
        status: "ok",
        message: "POS API is running!",
        initial_total_check: sample_total(state.config.default_tax_rate)?,
    }))
}

//! Routing module for the point-of-sale service

use crate::state::SharedState;
use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .merge(crate::cart::root_routes())
        .merge(api_routes())
        .nest("/api", api_routes())
        .layer(axum::middleware::from_fn(log_requests))
        .layer(cors_layer)
        .with_state(state)
}

fn api_routes() -> Router<SharedState> {
    Router::new()
        .merge(crate::catalog::routes())
        .merge(crate::cart::routes())
}

/// Middleware: runs each request inside a span tagged with a fresh request id
async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().simple().to_string();
    let span = info_span!(
        "request",
        id = %request_id,
        method = %req.method(),
        uri = %req.uri()
    );

    async move {
        debug!("REQ");
        let mut res = next.run(req).await;
        if !res.status().is_success() {
            warn!(status = %res.status(), "RES (Error)");
        }
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        res
    }
    .instrument(span)
    .await
}

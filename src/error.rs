//! Application error type shared by the catalog and cart handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Product with SKU '{0}' not found.")]
    NotFound(String),

    #[error("{field} {reason}")]
    Validation { field: String, reason: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

impl AppError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::Unavailable(e) = &self {
            tracing::error!(error = %e, "store request failed");
        }

        let body = match &self {
            AppError::Validation { field, .. } => json!({
                "success": false,
                "message": self.to_string(),
                "field": field,
            }),
            _ => json!({
                "success": false,
                "message": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_renders_404_with_message() {
        let (status, body) = body_json(AppError::NotFound("zzz999".into())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Product with SKU 'zzz999' not found.");
    }

    #[tokio::test]
    async fn validation_names_the_field() {
        let err = AppError::validation("items[0].price", "must be greater than zero");
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "items[0].price");
        assert_eq!(body["message"], "items[0].price must be greater than zero");
    }

    #[tokio::test]
    async fn store_failure_is_service_unavailable() {
        let (status, body) = body_json(AppError::Unavailable(sqlx::Error::PoolClosed)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
    }
}

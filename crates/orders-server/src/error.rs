//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all endpoints. It implements
//! `axum::response::IntoResponse` to produce a structured JSON error body
//! with the matching status code, so every failing request still gets a
//! response.
//!
//! A write that matches no row is not an error; see
//! [`crate::service::WriteOutcome`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use orders_storage::StorageError;

use crate::schema::validation::FieldError;

/// Structured error detail in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "VALIDATION_FAILED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details (the rejected fields).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// One or more request fields were rejected (400).
    #[error("validation failed")]
    ValidationFailed(Vec<FieldError>),

    /// The request body could not be read as JSON (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The store failed or timed out (500). The raw error is logged, never
    /// returned.
    #[error("store error: {0}")]
    Store(#[from] StorageError),

    /// The keyword service failed or was unreachable (502).
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ValidationFailed(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self {
            ApiError::ValidationFailed(errors) => {
                tracing::debug!(?errors, "request rejected by validation");
                ApiErrorDetail {
                    code: "VALIDATION_FAILED".to_string(),
                    message: format!("{} validation error(s)", errors.len()),
                    details: serde_json::to_value(errors).ok(),
                }
            }
            ApiError::BadRequest(msg) => ApiErrorDetail {
                code: "BAD_REQUEST".to_string(),
                message: msg.clone(),
                details: None,
            },
            ApiError::Store(err) => {
                if err.is_constraint_violation() {
                    tracing::warn!(error = %err, "store rejected write on a constraint");
                } else {
                    tracing::error!(error = %err, "store call failed");
                }
                ApiErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "internal storage error".to_string(),
                    details: None,
                }
            }
            ApiError::Upstream(msg) => {
                tracing::warn!(error = %msg, "keyword service call failed");
                ApiErrorDetail {
                    code: "UPSTREAM_ERROR".to_string(),
                    message: "keyword service unavailable".to_string(),
                    details: None,
                }
            }
        };

        let body = serde_json::json!({
            "success": false,
            "error": detail,
        });

        (self.status(), axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_lists_failing_fields() {
        let err = ApiError::ValidationFailed(vec![FieldError::new(
            "COMMISSION",
            "must be a decimal number",
        )]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(json["error"]["details"][0]["field"], "COMMISSION");
    }

    #[tokio::test]
    async fn store_errors_do_not_leak_store_text() {
        let err = ApiError::from(StorageError::Migration("table agents is corrupt".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
        assert!(!json.to_string().contains("corrupt"));
    }

    #[test]
    fn timeouts_fail_closed() {
        let err = ApiError::from(StorageError::Timeout(Duration::from_secs(5)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_maps_to_bad_gateway() {
        assert_eq!(
            ApiError::Upstream("connection refused".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}

//! Application error type mapping to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use gurume_infra::line::WebhookError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Webhook authentication or parsing failure.
    Webhook(WebhookError),
}

impl From<WebhookError> for AppError {
    fn from(e: WebhookError) -> Self {
        AppError::Webhook(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Webhook(e @ (WebhookError::MissingSignature | WebhookError::InvalidSignature)) => {
                (StatusCode::BAD_REQUEST, "INVALID_SIGNATURE", e.to_string())
            }
            AppError::Webhook(e @ WebhookError::Malformed(_)) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_BODY", e.to_string())
            }
            AppError::Webhook(e @ WebhookError::InvalidKey(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", e.to_string())
            }
        };

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        } else {
            tracing::warn!(code, %message, "request rejected");
        }

        let body = json!({
            "meta": {
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

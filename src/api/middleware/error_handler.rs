//! Error handler for converting AppError to HTTP responses.
//!
//! Every error leaving the router is rendered as an [`ErrorResponse`]:
//! `AppError`s through `IntoResponse`, and anything else (axum rejections,
//! unmatched routes) by [`error_response_middleware`], which also stamps the
//! request ID onto the body.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Largest non-JSON error body that is carried into the error message
const MAX_ERROR_BODY: usize = 64 * 1024;

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::PeerNotFound { .. } => StatusCode::BAD_GATEWAY,
        AppError::PeerUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::PeerNotFound { .. } => "PEER_NOT_FOUND",
        AppError::PeerUnavailable { .. } => "PEER_UNAVAILABLE",
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

fn error_body(error: &AppError) -> ErrorResponse {
    let code = error_to_code(error);
    match error {
        AppError::NotFound { entity, id } => {
            ErrorResponse::new(code, error.to_string())
                .with_details(json!({ "entity": entity, "id": id }))
        }
        AppError::PeerNotFound { peer, id } => {
            ErrorResponse::new(code, error.to_string())
                .with_details(json!({ "peer": peer, "id": id }))
        }
        AppError::PeerUnavailable { peer, .. } => {
            ErrorResponse::new(code, error.to_string()).with_details(json!({ "peer": peer }))
        }
        AppError::Validation { field, reason } => {
            ErrorResponse::new(code, error.to_string())
                .with_details(json!({ "field": field, "reason": reason }))
        }
        AppError::BadRequest { message } => ErrorResponse::new(code, message.as_str()),
        AppError::Database { operation, .. } => ErrorResponse::new(
            code,
            format!("Database operation failed: {}", operation),
        )
        .with_details(json!({ "operation": operation })),
        AppError::Configuration { key, .. } => {
            ErrorResponse::new(code, format!("Configuration error: {}", key))
                .with_details(json!({ "key": key }))
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new(code, "Database connection unavailable")
        }
        AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
    }
}

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - PeerNotFound → 502 BAD_GATEWAY
    /// - PeerUnavailable → 503 SERVICE_UNAVAILABLE
    /// - Validation, BadRequest → 400 BAD_REQUEST
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    /// - Database, Configuration, Internal → 500 INTERNAL_SERVER_ERROR
    ///
    /// Sources are logged, never sent to the client.
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let body = error_body(&self);

        if self.is_peer_failure() {
            tracing::warn!(error = ?self, status = status.as_u16(), "Peer service failure");
        } else if status.is_server_error() {
            tracing::error!(error = ?self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Turns "Method Not Allowed" into `METHOD_NOT_ALLOWED`.
fn status_code_label(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown Error")
        .to_uppercase()
        .replace([' ', '-'], "_")
}

/// Renders every error response as an `ErrorResponse` carrying the request ID.
///
/// Must run inside [`super::request_id_middleware`].
pub async fn error_response_middleware(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let body = match response.extensions().get::<ErrorResponse>() {
        Some(body) => body.clone(),
        None => {
            let is_json = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.contains("application/json"));
            if is_json {
                return response;
            }

            let (_parts, body) = response.into_parts();
            let text = axum::body::to_bytes(body, MAX_ERROR_BODY)
                .await
                .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
                .unwrap_or_default();
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                text
            };
            ErrorResponse::new(&status_code_label(status), message)
        }
    };

    let body = match &request_id {
        Some(id) => body.with_request_id(id),
        None => body,
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            error_to_status_code(&AppError::not_found("Cart", 7)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_to_status_code(&AppError::PeerNotFound {
                peer: "user-service".to_string(),
                id: "1".to_string(),
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            error_to_status_code(&AppError::PeerUnavailable {
                peer: "user-service".to_string(),
                message: "timed out".to_string(),
                source: None,
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            error_to_status_code(&AppError::Validation {
                field: "userId".to_string(),
                reason: "range".to_string(),
            }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_body_names_entity_and_key() {
        let body = error_body(&AppError::not_found("Order", 999));
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.message, "Order with id: 999 not found");
        assert_eq!(body.details, Some(json!({"entity": "Order", "id": "999"})));
    }

    #[test]
    fn test_internal_errors_are_sanitized() {
        let body = error_body(&AppError::Internal {
            source: anyhow::anyhow!("secret connection string"),
        });
        assert_eq!(body.message, "An internal error occurred");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_into_response_stashes_body() {
        let response = AppError::not_found("Payment", 4).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.extensions().get::<ErrorResponse>().unwrap();
        assert_eq!(body.code, "NOT_FOUND");
    }

    #[test]
    fn test_status_code_label() {
        assert_eq!(
            status_code_label(StatusCode::METHOD_NOT_ALLOWED),
            "METHOD_NOT_ALLOWED"
        );
        assert_eq!(
            status_code_label(StatusCode::UNSUPPORTED_MEDIA_TYPE),
            "UNSUPPORTED_MEDIA_TYPE"
        );
    }
}

//! Error handler for converting AppError to HTTP responses.
//!
//! `AppError` renders a sanitized body: the code and the error's display
//! message only. For server errors the source chain rides along as an
//! [`ErrorDetail`] response extension, and [`global_error_handler`] decides
//! whether it is disclosed. The same middleware stamps the request ID and
//! rewrites framework errors (unknown route, wrong method, timeout) into the
//! JSON shape.

use axum::{
    Json,
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::config::Environment;
use crate::error::AppError;

/// Largest error body the global handler will buffer for rewriting.
const MAX_ERROR_BODY_BYTES: usize = 64 * 1024;

/// Diagnostic text for a server error, attached to the response extensions.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let body = ErrorResponse::new(error_to_code(&self), &self.to_string());

        let mut response = (status, Json(body)).into_response();
        if status.is_server_error() {
            if let Some(detail) = self.diagnostic() {
                response.extensions_mut().insert(ErrorDetail(detail));
            }
        }
        response
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Machine-readable code carried in the `code` field.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::Unauthorized { .. } => "UNAUTHORIZED",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Global error handling middleware.
///
/// Every 4xx/5xx leaving the router goes through here:
/// - `AppError` bodies are kept, framework bodies are rewritten as JSON
/// - `details` is filled from [`ErrorDetail`] unless running in production
/// - `request_id` is copied from the request extensions
pub async fn global_error_handler(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = request.extensions().get::<RequestId>().cloned();
    let mut response = next.run(request).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let detail = response.extensions_mut().remove::<ErrorDetail>();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));

    let (mut parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_ERROR_BODY_BYTES)
        .await
        .unwrap_or_default();

    let mut error_response = if is_json {
        match serde_json::from_slice::<ErrorResponse>(&bytes) {
            Ok(parsed) => parsed,
            // JSON that is not an error envelope, e.g. an unhealthy health report
            Err(_) => return Response::from_parts(parts, Body::from(bytes)),
        }
    } else {
        fallback_error(status, &bytes)
    };

    if status.is_server_error() && !environment.is_production() {
        error_response.details = detail.map(|ErrorDetail(d)| d);
    }
    if let Some(RequestId(id)) = request_id {
        error_response.request_id = Some(id);
    }

    let body = match serde_json::to_vec(&error_response) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize error response");
            return Response::from_parts(parts, Body::empty());
        }
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from(body))
}

/// Error envelope for a non-JSON framework response.
fn fallback_error(status: StatusCode, body: &Bytes) -> ErrorResponse {
    let original = String::from_utf8_lossy(body).trim().to_string();

    let (code, default_message) = match status {
        StatusCode::BAD_REQUEST => ("BAD_REQUEST", "Bad request"),
        StatusCode::UNAUTHORIZED => ("UNAUTHORIZED", "Unauthorized"),
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => {
            ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timeout"),
        StatusCode::SERVICE_UNAVAILABLE => ("SERVICE_UNAVAILABLE", "Service temporarily unavailable"),
        s if s.is_server_error() => ("INTERNAL_SERVER_ERROR", "An internal server error occurred"),
        _ => ("UNKNOWN_ERROR", "An unknown error occurred"),
    };

    // Raw server-error bodies are never echoed.
    let message = if original.is_empty() || status.is_server_error() {
        default_message
    } else {
        original.as_str()
    };
    ErrorResponse::new(code, message)
}

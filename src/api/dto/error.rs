//! Error response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard error response format.
///
/// `details` only ever carries diagnostic text outside production, and only
/// for server errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "Course not found",
    "request_id": "6b1f8c2e-2d4a-4f0e-9a51-0c7f5d3b9e10"
}))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_omitted() {
        let json = serde_json::to_value(ErrorResponse::new("UNAUTHORIZED", "Unauthorized")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "UNAUTHORIZED", "message": "Unauthorized"})
        );
    }

    #[test]
    fn test_builders_fill_optional_fields() {
        let response = ErrorResponse::new("DATABASE_ERROR", "Failed to fetch categories")
            .with_details("connection refused")
            .with_request_id("req-1");

        assert_eq!(response.details.as_deref(), Some("connection refused"));
        assert_eq!(response.request_id.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let response: ErrorResponse =
            serde_json::from_str(r#"{"code":"NOT_FOUND","message":"Course not found"}"#).unwrap();
        assert_eq!(response, ErrorResponse::new("NOT_FOUND", "Course not found"));
    }
}

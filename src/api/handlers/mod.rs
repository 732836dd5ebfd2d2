//! HTTP request handlers for API endpoints.
//!
//! Handlers are organized by resource type.

pub mod categories;
pub mod certificates;
pub mod courses;
pub mod health;

use crate::api::middleware::error_to_status_code;
use crate::error::AppError;

/// Logs a failed read. Client errors are routine and stay at debug.
fn log_failure(err: &AppError) {
    if error_to_status_code(err).is_server_error() {
        tracing::error!(error = %err, details = ?err.diagnostic(), "Request failed");
    } else {
        tracing::debug!(error = %err, "Request rejected");
    }
}

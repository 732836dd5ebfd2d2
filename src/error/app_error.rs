use thiserror::Error;

/// Application-wide error type for the read endpoints and their ambient stack.
///
/// Variants carry enough structure for the HTTP layer to pick a status code
/// and a sanitized message without inspecting the source chain.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found, or present but hidden by a visibility predicate
    #[error("{entity} not found")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Missing or unusable session
    #[error("{message}")]
    Unauthorized { message: String },

    /// Store read failed; `operation` reads as "fetch categories"
    #[error("Failed to {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Builds a `NotFound` for `entity` looked up by `field = value`.
    pub fn not_found(entity: &str, field: &str, value: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Builds the generic 401 used by every session-gated route.
    pub fn unauthorized() -> Self {
        AppError::Unauthorized {
            message: "Unauthorized".to_string(),
        }
    }

    /// Wraps a store failure with the operation that was being attempted.
    pub fn database(operation: &str, source: impl Into<anyhow::Error>) -> Self {
        AppError::Database {
            operation: operation.to_string(),
            source: source.into(),
        }
    }

    /// Full source chain, for logs and non-production diagnostics.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            AppError::Database { source, .. }
            | AppError::Configuration { source, .. }
            | AppError::Internal { source } => Some(format!("{:#}", source)),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        match error {
            crate::config::error::ConfigError::ValidationError { field, message } => {
                AppError::Validation {
                    field,
                    reason: message,
                }
            }
            other => AppError::Configuration {
                key: "settings".to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::ConfigError;

    #[test]
    fn test_not_found_message_hides_lookup_value() {
        let error = AppError::not_found("Course", "id", "c2");
        assert_eq!(error.to_string(), "Course not found");
    }

    #[test]
    fn test_unauthorized_message() {
        assert_eq!(AppError::unauthorized().to_string(), "Unauthorized");
    }

    #[test]
    fn test_database_message_names_operation() {
        let error = AppError::database("fetch categories", anyhow::anyhow!("connection refused"));
        assert_eq!(error.to_string(), "Failed to fetch categories");
        assert_eq!(error.diagnostic().as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_diagnostic_absent_for_client_errors() {
        assert!(AppError::unauthorized().diagnostic().is_none());
        assert!(AppError::not_found("Course", "id", "x").diagnostic().is_none());
    }

    #[test]
    fn test_config_validation_error_becomes_validation() {
        let error: AppError = ConfigError::validation("server.port", "bad port").into();
        match error {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "server.port");
                assert_eq!(reason, "bad port");
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }
}

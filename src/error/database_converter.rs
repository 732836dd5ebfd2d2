use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::pooled_connection::PoolError;

/// Utility for converting store errors to structured AppError variants.
///
/// Every conversion keeps the operation name so the HTTP layer can report
/// which read failed, while the database message stays in the source chain.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error raised while running `operation`.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                AppError::database(
                    operation,
                    anyhow::anyhow!("{}: {}", Self::describe_kind(&kind), message),
                )
            }
            DieselError::NotFound => AppError::not_found("resource", "id", "unknown"),
            other => AppError::database(operation, other),
        }
    }

    /// Converts a failure to check a connection out of the pool.
    pub fn convert_pool_error(error: bb8::RunError<PoolError>, operation: &str) -> AppError {
        let source = match error {
            bb8::RunError::User(inner) => anyhow::anyhow!("Connection error: {}", inner),
            bb8::RunError::TimedOut => {
                anyhow::anyhow!("Timed out waiting for a pooled connection")
            }
        };
        AppError::database(operation, source)
    }

    fn describe_kind(kind: &DatabaseErrorKind) -> &'static str {
        match kind {
            DatabaseErrorKind::ClosedConnection => "Connection closed",
            DatabaseErrorKind::SerializationFailure => "Serialization failure",
            DatabaseErrorKind::ReadOnlyTransaction => "Read-only transaction",
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::RestrictViolation
            | DatabaseErrorKind::ExclusionViolation => "Constraint violation",
            _ => "Database error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            None
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_convert_closed_connection() {
        let info = MockDatabaseErrorInfo {
            message: "server closed the connection unexpectedly".to_string(),
        };
        let error = DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, Box::new(info));

        let result = DatabaseErrorConverter::convert_diesel_error(error, "fetch categories");

        match result {
            AppError::Database { operation, source } => {
                assert_eq!(operation, "fetch categories");
                let text = source.to_string();
                assert!(text.starts_with("Connection closed"));
                assert!(text.contains("closed the connection unexpectedly"));
            }
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_not_found() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "fetch course");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_convert_other_diesel_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(
            DieselError::RollbackTransaction,
            "fetch certificates",
        );
        match result {
            AppError::Database { operation, .. } => assert_eq!(operation, "fetch certificates"),
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_pool_timeout() {
        let result = DatabaseErrorConverter::convert_pool_error(bb8::RunError::TimedOut, "fetch course");
        match result {
            AppError::Database { operation, source } => {
                assert_eq!(operation, "fetch course");
                assert!(source.to_string().contains("Timed out"));
            }
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }
}

//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, parsing or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file does not exist
    #[error("Required configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Sources were found but could not be turned into `Settings`
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A value is present but out of range or malformed
    #[error("Validation error: {field} - {message}")]
    ValidationError {
        /// Dotted path of the offending key, e.g. `server.port`
        field: String,
        message: String,
    },

    /// `ACADEMY_APP_ENV` (or `--env`) names no known environment
    #[error("Unknown environment '{0}'. Valid values are: development, test, staging, production")]
    UnknownEnvironment(String),

    /// Two source selectors were set at once
    #[error("{first} and {second} cannot both be set")]
    ConflictingSources {
        first: &'static str,
        second: &'static str,
    },

    #[error("Configuration error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    /// Create a new validation error
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::FileNotFound(path.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ConfigError::validation("server.port", "must be positive");
        assert_eq!(
            err.to_string(),
            "Validation error: server.port - must be positive"
        );
    }

    #[test]
    fn test_conflicting_sources_display() {
        let err = ConfigError::ConflictingSources {
            first: "ACADEMY_CONFIG_DIR",
            second: "ACADEMY_CONFIG_FILE",
        };
        assert_eq!(
            err.to_string(),
            "ACADEMY_CONFIG_DIR and ACADEMY_CONFIG_FILE cannot both be set"
        );
    }

    #[test]
    fn test_file_not_found_display() {
        let err = ConfigError::file_not_found("config/default.toml");
        assert!(err.to_string().contains("config/default.toml"));
    }
}

//! Error handling module for rpmreqs
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Translation errors are fatal: an unrepresentable constraint must abort
//! generation instead of producing a too-permissive dependency.

use thiserror::Error;

/// Main error type for rpmreqs
#[derive(Error, Debug)]
pub enum RpmReqsError {
    /// Operator has no RPM rendering for this variable category
    #[error("Unsupported operator '{operator}' for marker variable '{variable}'")]
    UnsupportedOperator { variable: String, operator: String },

    /// Marker variable has no RPM equivalent
    #[error("Unsupported marker variable '{variable}'")]
    UnsupportedMarkerVariable { variable: String },

    /// Comparison cannot be evaluated against a known environment value
    #[error("Undefined comparison: {variable} {operator} \"{value}\"")]
    UndefinedComparison {
        variable: String,
        operator: String,
        value: String,
    },

    /// Marker tree violates the group alternation invariant
    #[error("Malformed marker: {0}")]
    MalformedMarker(String),

    /// Template rejected while building the template set
    #[error("Template error: {0}")]
    Template(String),

    /// Specifier clause could not be split into operator and version
    #[error("Invalid specifier: {0}")]
    InvalidSpecifier(String),

    /// Configuration errors (loading, flavour selection, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors (reading configuration or marker files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for rpmreqs operations
pub type Result<T> = std::result::Result<T, RpmReqsError>;

// Convenient error constructors
impl RpmReqsError {
    /// Create an unsupported-operator error
    pub fn unsupported_operator(variable: impl Into<String>, operator: impl ToString) -> Self {
        Self::UnsupportedOperator {
            variable: variable.into(),
            operator: operator.to_string(),
        }
    }

    /// Create an unsupported-variable error
    pub fn unsupported_variable(variable: impl Into<String>) -> Self {
        Self::UnsupportedMarkerVariable {
            variable: variable.into(),
        }
    }

    /// Create a malformed-marker error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedMarker(msg.into())
    }

    /// Create a template error
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RpmReqsError::unsupported_operator("platform_machine", "<");
        assert_eq!(
            err.to_string(),
            "Unsupported operator '<' for marker variable 'platform_machine'"
        );

        let err = RpmReqsError::unsupported_variable("sys_platform");
        assert_eq!(err.to_string(), "Unsupported marker variable 'sys_platform'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RpmReqsError = io_err.into();
        assert!(matches!(err, RpmReqsError::Io(_)));
    }

    #[test]
    fn test_error_constructors() {
        let err = RpmReqsError::template("unknown placeholder");
        assert!(matches!(err, RpmReqsError::Template(_)));

        let err = RpmReqsError::config("no such flavour");
        assert!(matches!(err, RpmReqsError::Config(_)));
    }
}

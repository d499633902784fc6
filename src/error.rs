//! Custom error types for overhead-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for overhead-cli operations
#[derive(Error, Debug)]
pub enum CostError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed or out-of-range input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Overhead was requested before any allocation settings exist
    #[error("Allocation settings are not configured. Run 'overhead alloc set' first.")]
    ConfigurationMissing,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl CostError {
    /// Create a "not found" error for cost records
    pub fn cost_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Cost",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for cost records
    pub fn duplicate_cost(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Cost",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if allocation settings were missing
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, Self::ConfigurationMissing)
    }
}

impl From<std::io::Error> for CostError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CostError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for overhead-cli operations
pub type CostResult<T> = Result<T, CostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CostError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = CostError::cost_not_found("Sewa Dapur");
        assert_eq!(err.to_string(), "Cost not found: Sewa Dapur");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_configuration_missing_is_distinct_from_validation() {
        let err = CostError::ConfigurationMissing;
        assert!(err.is_configuration_missing());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CostError = io_err.into();
        assert!(matches!(err, CostError::Io(_)));
    }
}

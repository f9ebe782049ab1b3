//! # Error Types
//!
//! Structured error types for estimate_core. Every failure the estimator,
//! the request validator, or the catalog loader can produce is one variant of
//! [`EstimateError`], so callers can map errors to responses without parsing
//! message strings.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_size(size: i64) -> EstimateResult<u64> {
//!     if size <= 0 {
//!         return Err(EstimateError::invalid_input(
//!             "size",
//!             size.to_string(),
//!             "Size must be positive",
//!         ));
//!     }
//!     Ok(size as u64)
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Fixed message for an unknown design style.
pub const INVALID_STYLE_MESSAGE: &str =
    "Invalid design style. Choose from Modern, Classic, or Rustic.";

/// Fixed message for an estimate whose total cost is above the budget.
pub const BUDGET_EXCEEDED_MESSAGE: &str =
    "Budget is not enough to cover the estimated total cost.";

/// Structured error type for estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// Design style is not one of the catalog styles
    #[error("Invalid design style. Choose from Modern, Classic, or Rustic.")]
    InvalidStyle { style: String },

    /// An input value could not be coerced or is out of range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required request field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The computed total cost is above the supplied budget
    #[error("Budget is not enough to cover the estimated total cost.")]
    BudgetExceeded,

    /// The style catalog is internally inconsistent
    #[error("Catalog defect in '{style}': {reason}")]
    CatalogDefect { style: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Catalog schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (report rendering and the like)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl EstimateError {
    /// Create an InvalidStyle error
    pub fn invalid_style(style: impl Into<String>) -> Self {
        EstimateError::InvalidStyle {
            style: style.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField {
            field: field.into(),
        }
    }

    /// Create a CatalogDefect error
    pub fn catalog_defect(style: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::CatalogDefect {
            style: style.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error comes from the caller's request rather than from
    /// configuration or I/O.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EstimateError::InvalidStyle { .. }
                | EstimateError::InvalidInput { .. }
                | EstimateError::MissingField { .. }
                | EstimateError::BudgetExceeded
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidStyle { .. } => "INVALID_STYLE",
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::BudgetExceeded => "BUDGET_EXCEEDED",
            EstimateError::CatalogDefect { .. } => "CATALOG_DEFECT",
            EstimateError::FileError { .. } => "FILE_ERROR",
            EstimateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            EstimateError::VersionMismatch { .. } => "VERSION_MISMATCH",
            EstimateError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for EstimateError {
    fn from(e: serde_json::Error) -> Self {
        EstimateError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            EstimateError::invalid_style("Gothic").to_string(),
            INVALID_STYLE_MESSAGE
        );
        assert_eq!(EstimateError::BudgetExceeded.to_string(), BUDGET_EXCEEDED_MESSAGE);
    }

    #[test]
    fn test_error_serialization() {
        let error = EstimateError::invalid_input("size", "abc", "Not an integer");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: EstimateError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EstimateError::missing_field("budget").error_code(), "MISSING_FIELD");
        assert_eq!(EstimateError::BudgetExceeded.error_code(), "BUDGET_EXCEEDED");
        assert_eq!(EstimateError::catalog_defect("Modern", "x").error_code(), "CATALOG_DEFECT");
    }

    #[test]
    fn test_client_errors() {
        assert!(EstimateError::BudgetExceeded.is_client_error());
        assert!(EstimateError::invalid_style("x").is_client_error());
        assert!(!EstimateError::catalog_defect("Modern", "x").is_client_error());
        assert!(!EstimateError::Internal { message: "x".into() }.is_client_error());
    }
}

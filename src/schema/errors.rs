//! Schema error types
//!
//! Error codes:
//! - SCHEMA_VALIDATION_FAILED (REJECT)
//! - SCHEMA_DOCUMENT_OUT_OF_RANGE (REJECT)
//!
//! Validation runs before any tree mutation, so a schema error always
//! leaves the store unchanged.

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Client request rejected
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// A field is missing, empty or outside its allowed range
    ValidationFailed,
    /// Document id is zero, negative or above the variant's bound
    DocumentOutOfRange,
}

impl SchemaErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::ValidationFailed => "SCHEMA_VALIDATION_FAILED",
            SchemaErrorCode::DocumentOutOfRange => "SCHEMA_DOCUMENT_OUT_OF_RANGE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field name (e.g., "age")
    pub field: String,
    /// Expected condition
    pub expected: String,
    /// Actual value found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn empty_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "non-empty value".into(),
            actual: "empty".into(),
        }
    }

    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        Self {
            field: field.into(),
            expected: format!("at most {} characters", max),
            actual: format!("{} characters", actual),
        }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        Self {
            field: field.into(),
            expected: format!("value between {} and {}", min, max),
            actual: actual.to_string(),
        }
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Schema error with the failing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    code: SchemaErrorCode,
    details: ValidationDetails,
}

impl SchemaError {
    /// Create a validation failed error
    pub fn validation_failed(details: ValidationDetails) -> Self {
        Self {
            code: SchemaErrorCode::ValidationFailed,
            details,
        }
    }

    /// Create a document out of range error
    pub fn document_out_of_range(min: i64, max: i64, actual: i64) -> Self {
        Self {
            code: SchemaErrorCode::DocumentOutOfRange,
            details: ValidationDetails::out_of_range("document", min, max, actual),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns validation details
    pub fn details(&self) -> &ValidationDetails {
        &self.details
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        &self.details.field
    }

    /// Schema errors are never fatal
    pub fn is_fatal(&self) -> bool {
        false
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.details
        )
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SchemaErrorCode::ValidationFailed.code(),
            "SCHEMA_VALIDATION_FAILED"
        );
        assert_eq!(
            SchemaErrorCode::DocumentOutOfRange.code(),
            "SCHEMA_DOCUMENT_OUT_OF_RANGE"
        );
    }

    #[test]
    fn test_validation_details_display() {
        let details = ValidationDetails::out_of_range("age", 0, 18, 40);
        let display = format!("{}", details);
        assert!(display.contains("age"));
        assert!(display.contains("between 0 and 18"));
        assert!(display.contains("40"));
    }

    #[test]
    fn test_document_out_of_range() {
        let err = SchemaError::document_out_of_range(1, 999_999, 1_000_000);
        assert_eq!(err.code(), SchemaErrorCode::DocumentOutOfRange);
        assert_eq!(err.field(), "document");
        assert!(!err.is_fatal());
        assert!(format!("{}", err).contains("REJECT"));
    }
}

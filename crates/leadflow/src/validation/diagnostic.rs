//! Errors and warnings produced by the validator.

use serde::{Deserialize, Serialize};

/// Row reference used by errors that concern the mapping itself.
pub const MAPPING_LEVEL: usize = 0;

/// A validation error. Mapping-level errors block the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// `0` for mapping-level errors, otherwise a 1-based data row.
    pub row_ref: usize,
    /// Label of the affected field.
    pub field_label: String,
    /// Offending value, empty for mapping-level errors.
    pub value: String,
    /// Actionable message.
    pub message: String,
}

impl ValidationError {
    /// Create a mapping-level error.
    pub fn mapping(field_label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row_ref: MAPPING_LEVEL,
            field_label: field_label.into(),
            value: String::new(),
            message: message.into(),
        }
    }

    /// Create an error for a specific data row.
    pub fn row(
        row_ref: usize,
        field_label: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row_ref,
            field_label: field_label.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Whether this error prevents the import from being committed.
    pub fn is_blocking(&self) -> bool {
        self.row_ref == MAPPING_LEVEL
    }
}

/// An advisory finding; never blocks the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Label of the affected field.
    pub field_label: String,
    /// Human-readable description.
    pub message: String,
    /// Number of sampled values affected.
    pub affected_count: usize,
}

impl ValidationWarning {
    /// Create a warning.
    pub fn new(
        field_label: impl Into<String>,
        message: impl Into<String>,
        affected_count: usize,
    ) -> Self {
        Self {
            field_label: field_label.into(),
            message: message.into(),
            affected_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_errors_block() {
        let err = ValidationError::mapping("Full Name", "Full Name is required");
        assert_eq!(err.row_ref, 0);
        assert!(err.is_blocking());
        assert!(err.value.is_empty());
    }

    #[test]
    fn test_row_errors_do_not_block() {
        let err = ValidationError::row(3, "Phone Number", "abc", "Invalid phone number");
        assert!(!err.is_blocking());
    }
}

//! Mapping validator.

use crate::config::ValidatorConfig;
use crate::mapping::FieldMapping;
use crate::schema::{CANONICAL_FIELDS, Column};

use super::checks::{EmailFormatCheck, FieldCheck, NameCompletenessCheck, PhoneFormatCheck};
use super::diagnostic::{ValidationError, ValidationWarning};
use super::report::{RowEstimate, ValidationReport};

/// Validates a mapping against the sampled columns.
///
/// Never fails: every finding is reported in the returned
/// [`ValidationReport`]. Callers treat mapping-level errors as blocking.
pub struct MappingValidator {
    config: ValidatorConfig,
    checks: Vec<Box<dyn FieldCheck>>,
}

impl MappingValidator {
    /// Create a validator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create a validator with custom configuration.
    pub fn with_config(config: ValidatorConfig) -> Self {
        // Order here is the order warnings appear in the report.
        let checks: Vec<Box<dyn FieldCheck>> = vec![
            Box::new(PhoneFormatCheck::new(config.min_phone_length)),
            Box::new(EmailFormatCheck),
            Box::new(NameCompletenessCheck),
        ];
        Self { config, checks }
    }

    /// Validate `mapping` for a file with `row_count` data rows.
    pub fn validate(
        &self,
        columns: &[Column],
        mapping: &FieldMapping,
        row_count: usize,
    ) -> ValidationReport {
        let errors = self.check_required(mapping);
        let warnings = self.check_formats(columns, mapping);

        let has_blocking = errors.iter().any(ValidationError::is_blocking);
        let estimate = RowEstimate::compute(row_count, errors.len(), has_blocking, &self.config);

        tracing::debug!(
            rows = row_count,
            errors = errors.len(),
            warnings = warnings.len(),
            "validated mapping"
        );

        ValidationReport::new(estimate, errors, warnings)
    }

    fn check_required(&self, mapping: &FieldMapping) -> Vec<ValidationError> {
        CANONICAL_FIELDS
            .iter()
            .filter(|field| field.required && !mapping.is_mapped(field.key))
            .map(|field| {
                ValidationError::mapping(
                    field.label,
                    format!(
                        "{} is required but is not mapped to any column; choose the column that contains it",
                        field.label
                    ),
                )
            })
            .collect()
    }

    fn check_formats(&self, columns: &[Column], mapping: &FieldMapping) -> Vec<ValidationWarning> {
        self.checks
            .iter()
            .filter_map(|check| {
                let header = mapping.source_for(check.field())?;
                let column = columns.iter().find(|c| c.header == header)?;
                check.check(&column.sample_values)
            })
            .collect()
    }
}

impl Default for MappingValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate with the default configuration.
pub fn validate(columns: &[Column], mapping: &FieldMapping, row_count: usize) -> ValidationReport {
    MappingValidator::new().validate(columns, mapping, row_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_preview;
    use crate::mapping::auto_map;
    use crate::schema::FieldKey;

    fn run(raw: &str) -> ValidationReport {
        let table = parse_preview(raw);
        let mapping = auto_map(&table.columns);
        validate(&table.columns, &mapping, table.row_count)
    }

    #[test]
    fn test_phone_warning_scenario() {
        let report = run("Name,Phone\nAlice,555-1234\nBob,notaphone");

        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field_label, "Phone Number");
        assert_eq!(report.warnings[0].affected_count, 1);
        assert!(report.can_commit());
        assert_eq!(report.total_rows, 2);
    }

    #[test]
    fn test_unrecognized_headers_block() {
        let report = run("X,Y\nfoo,bar");

        assert_eq!(report.errors.len(), 2);
        assert!(report.errors.iter().all(|e| e.row_ref == 0));
        assert_eq!(report.errors[0].field_label, "Full Name");
        assert_eq!(report.errors[1].field_label, "Phone Number");
        assert!(report.warnings.is_empty());
        assert!(!report.can_commit());
        assert_eq!(report.invalid_rows, 1);
    }

    #[test]
    fn test_clean_file() {
        let report = run("Full Name,Mobile,Email\nAlice,555-1234,alice@example.com\nBob,(555) 987-6543,bob@example.org");
        assert!(report.is_clean());
        assert_eq!(report.valid_rows, 2);
    }

    #[test]
    fn test_warning_order() {
        let report = run("name,phone,email\n\" \",12,bad-email");

        let labels: Vec<_> = report.warnings.iter().map(|w| w.field_label.as_str()).collect();
        assert_eq!(labels, vec!["Phone Number", "Email Address", "Full Name"]);
    }

    #[test]
    fn test_unmapped_optional_fields_are_not_checked() {
        let table = parse_preview("name,phone,contact\nAlice,5551234,not-an-email");
        let mut mapping = auto_map(&table.columns);
        let report = validate(&table.columns, &mapping, table.row_count);
        assert!(report.warnings.is_empty());

        mapping.assign(FieldKey::Email, Some("contact")).unwrap();
        let report = validate(&table.columns, &mapping, table.row_count);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field_label, "Email Address");
    }

    #[test]
    fn test_missing_phone_only() {
        let table = parse_preview("name,email\nAlice,a@b.co");
        let mapping = auto_map(&table.columns);
        let report = validate(&table.columns, &mapping, table.row_count);

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field_label, "Phone Number");
        assert!(report.errors[0].message.contains("Phone Number is required"));
    }

    #[test]
    fn test_custom_config() {
        let config = ValidatorConfig {
            invalid_row_percent: 50,
            duplicate_row_percent: 10,
            min_phone_length: 3,
        };
        let table = parse_preview("a,b\n1,2\n3,4\n5,6\n7,8\n9,10\n11,12\n13,14\n15,16\n17,18\n19,20");
        let mapping = auto_map(&table.columns);
        let report = MappingValidator::with_config(config).validate(&table.columns, &mapping, table.row_count);

        assert_eq!(report.total_rows, 10);
        assert_eq!(report.duplicate_rows, 1);
        assert_eq!(report.invalid_rows, 5);
        assert_eq!(report.valid_rows, 4);
    }
}

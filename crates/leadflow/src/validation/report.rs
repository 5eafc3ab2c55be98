//! Validation report and the row-count preview estimate.

use serde::{Deserialize, Serialize};

use crate::config::ValidatorConfig;

use super::diagnostic::{ValidationError, ValidationWarning};

/// Approximate outcome of importing `total` rows.
///
/// These numbers are a preview, not a derivation from the data: the commit
/// step determines the real counts. The three buckets never sum past `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowEstimate {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub duplicate: usize,
}

impl RowEstimate {
    /// Estimate from the row count, the number of errors and whether any of
    /// them block the import.
    pub fn compute(
        total: usize,
        error_count: usize,
        has_blocking: bool,
        config: &ValidatorConfig,
    ) -> Self {
        let duplicate = percent_floor(total, config.duplicate_row_percent).min(total);

        let invalid = if has_blocking {
            percent_ceil(total, config.invalid_row_percent).min(total - duplicate)
        } else {
            0
        };

        let valid = total
            .saturating_sub(error_count)
            .saturating_sub(duplicate)
            .min(total - duplicate - invalid);

        Self {
            total,
            valid,
            invalid,
            duplicate,
        }
    }
}

fn percent_floor(value: usize, percent: u32) -> usize {
    value.saturating_mul(percent as usize) / 100
}

fn percent_ceil(value: usize, percent: u32) -> usize {
    value.saturating_mul(percent as usize).div_ceil(100)
}

/// Diagnostics and row estimate for a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub duplicate_rows: usize,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Assemble a report from diagnostics and an estimate.
    pub fn new(
        estimate: RowEstimate,
        errors: Vec<ValidationError>,
        warnings: Vec<ValidationWarning>,
    ) -> Self {
        Self {
            total_rows: estimate.total,
            valid_rows: estimate.valid,
            invalid_rows: estimate.invalid,
            duplicate_rows: estimate.duplicate,
            errors,
            warnings,
        }
    }

    /// Errors that prevent the import.
    pub fn blocking_errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(|e| e.is_blocking())
    }

    /// Whether any mapping-level error is present.
    pub fn has_blocking_errors(&self) -> bool {
        self.blocking_errors().next().is_some()
    }

    /// Whether the import may proceed to commit.
    pub fn can_commit(&self) -> bool {
        !self.has_blocking_errors()
    }

    /// Whether the report has no errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// The row estimate carried by this report.
    pub fn estimate(&self) -> RowEstimate {
        RowEstimate {
            total: self.total_rows,
            valid: self.valid_rows,
            invalid: self.invalid_rows,
            duplicate: self.duplicate_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(total: usize, errors: usize, blocking: bool) -> RowEstimate {
        RowEstimate::compute(total, errors, blocking, &ValidatorConfig::default())
    }

    #[test]
    fn test_clean_estimate() {
        let e = estimate(100, 0, false);
        assert_eq!(e.duplicate, 2);
        assert_eq!(e.invalid, 0);
        assert_eq!(e.valid, 98);
    }

    #[test]
    fn test_small_files_have_no_duplicates() {
        let e = estimate(2, 0, false);
        assert_eq!(e.duplicate, 0);
        assert_eq!(e.valid, 2);
    }

    #[test]
    fn test_blocking_estimate_rounds_invalid_up() {
        let e = estimate(10, 2, true);
        assert_eq!(e.duplicate, 0);
        assert_eq!(e.invalid, 1);
        assert_eq!(e.valid, 8);
    }

    #[test]
    fn test_estimate_is_clamped_to_total() {
        // Without clamping: valid 97 + invalid 5 + duplicate 2 = 104.
        let e = estimate(100, 1, true);
        assert_eq!(e.duplicate, 2);
        assert_eq!(e.invalid, 5);
        assert_eq!(e.valid, 93);
        assert!(e.valid + e.invalid + e.duplicate <= e.total);
    }

    #[test]
    fn test_zero_rows() {
        assert_eq!(estimate(0, 2, true), RowEstimate::default());
    }

    #[test]
    fn test_more_errors_than_rows() {
        let e = estimate(1, 2, true);
        assert_eq!(e.valid, 0);
        assert_eq!(e.invalid, 1);
        assert_eq!(e.duplicate, 0);
    }

    #[test]
    fn test_report_blocking() {
        let report = ValidationReport::new(
            estimate(5, 1, true),
            vec![ValidationError::mapping("Full Name", "missing")],
            Vec::new(),
        );
        assert!(report.has_blocking_errors());
        assert!(!report.can_commit());
        assert_eq!(report.estimate().total, 5);
    }
}

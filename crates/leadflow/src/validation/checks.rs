//! Format checks applied to the sample values of a mapped field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::FieldKey;

use super::diagnostic::ValidationWarning;

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]+$").unwrap());

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A per-field check over sampled values.
pub trait FieldCheck {
    /// Field whose mapped column is checked.
    fn field(&self) -> FieldKey;

    /// Whether a single sample value fails the check.
    fn is_flagged(&self, value: &str) -> bool;

    /// Warning message for `count` flagged values.
    fn message(&self, count: usize) -> String;

    /// Run over `values`, returning a warning if anything was flagged.
    fn check(&self, values: &[String]) -> Option<ValidationWarning> {
        let count = values.iter().filter(|v| self.is_flagged(v)).count();
        if count == 0 {
            return None;
        }
        Some(ValidationWarning::new(
            self.field().label(),
            self.message(count),
            count,
        ))
    }
}

/// Flags values that do not look like dialable phone numbers.
pub struct PhoneFormatCheck {
    min_length: usize,
}

impl PhoneFormatCheck {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Default for PhoneFormatCheck {
    fn default() -> Self {
        Self::new(7)
    }
}

impl FieldCheck for PhoneFormatCheck {
    fn field(&self) -> FieldKey {
        FieldKey::Phone
    }

    fn is_flagged(&self, value: &str) -> bool {
        let digits: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
            .collect();
        digits.chars().count() < self.min_length || !PHONE_PATTERN.is_match(&digits)
    }

    fn message(&self, count: usize) -> String {
        format!(
            "{} sample value(s) do not look like valid phone numbers; these leads may fail to dial",
            count
        )
    }
}

/// Flags non-empty values that are not shaped like an email address.
pub struct EmailFormatCheck;

impl FieldCheck for EmailFormatCheck {
    fn field(&self) -> FieldKey {
        FieldKey::Email
    }

    fn is_flagged(&self, value: &str) -> bool {
        !value.is_empty() && !EMAIL_PATTERN.is_match(value)
    }

    fn message(&self, count: usize) -> String {
        format!("{} sample value(s) are not valid email addresses", count)
    }
}

/// Flags names that are blank.
pub struct NameCompletenessCheck;

impl FieldCheck for NameCompletenessCheck {
    fn field(&self) -> FieldKey {
        FieldKey::Name
    }

    fn is_flagged(&self, value: &str) -> bool {
        value.trim().is_empty()
    }

    fn message(&self, count: usize) -> String {
        format!("{} sample value(s) have an empty name", count)
    }
}

//! Header-based auto-mapping of columns to canonical fields.

use crate::schema::{Column, FieldKey};

use super::field_mapping::FieldMapping;

/// Header spellings recognized for one canonical field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSynonyms {
    pub field: FieldKey,
    pub synonyms: &'static [&'static str],
}

/// Synonym table, evaluated in canonical field order.
///
/// Synonym sets are disjoint, so a header can only ever match one field.
pub static FIELD_SYNONYMS: [FieldSynonyms; 5] = [
    FieldSynonyms {
        field: FieldKey::Name,
        synonyms: &["full name", "name", "contact name", "first name", "lead name"],
    },
    FieldSynonyms {
        field: FieldKey::Phone,
        synonyms: &[
            "phone",
            "phone number",
            "mobile",
            "cell",
            "tel",
            "telephone",
            "contact number",
        ],
    },
    FieldSynonyms {
        field: FieldKey::Email,
        synonyms: &["email", "e-mail", "email address", "mail"],
    },
    FieldSynonyms {
        field: FieldKey::Company,
        synonyms: &[
            "company",
            "organization",
            "org",
            "business",
            "company name",
            "employer",
        ],
    },
    FieldSynonyms {
        field: FieldKey::Notes,
        synonyms: &[
            "notes",
            "note",
            "comments",
            "comment",
            "description",
            "details",
            "remarks",
        ],
    },
];

/// Suggests a mapping from detected headers.
pub struct AutoMapper {
    /// Normalized synonyms per field, in canonical order.
    patterns: Vec<(FieldKey, Vec<String>)>,
}

impl AutoMapper {
    /// Create a mapper over the built-in synonym table.
    pub fn new() -> Self {
        let patterns = FIELD_SYNONYMS
            .iter()
            .map(|entry| {
                let synonyms = entry.synonyms.iter().map(|s| normalize_header(s)).collect();
                (entry.field, synonyms)
            })
            .collect();
        Self { patterns }
    }

    /// Field whose synonyms match `header`, in canonical order.
    pub fn match_header(&self, header: &str) -> Option<FieldKey> {
        self.matching_fields(header).next()
    }

    fn matching_fields<'a>(&'a self, header: &str) -> impl Iterator<Item = FieldKey> + 'a {
        let normalized = normalize_header(header);
        self.patterns
            .iter()
            .filter(move |(_, synonyms)| synonyms.iter().any(|s| *s == normalized))
            .map(|(field, _)| *field)
    }

    /// Suggest a mapping. Columns are scanned in order and each column goes to
    /// the first still-unassigned field it matches; assigned fields are never
    /// overwritten.
    pub fn map_columns(&self, columns: &[Column]) -> FieldMapping {
        let mut mapping = FieldMapping::new();

        for column in columns {
            if mapping.owner_of(&column.header).is_some() {
                continue;
            }

            let field = self
                .matching_fields(&column.header)
                .find(|field| !mapping.is_mapped(*field));

            if let Some(field) = field {
                // The header is unowned, so assignment cannot fail.
                if mapping.assign(field, Some(&column.header)).is_ok() {
                    tracing::debug!(field = field.as_str(), header = %column.header, "auto-mapped column");
                }
            }
        }

        mapping
    }
}

impl Default for AutoMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Suggest a mapping using the built-in synonym table.
pub fn auto_map(columns: &[Column]) -> FieldMapping {
    AutoMapper::new().map_columns(columns)
}

/// Lowercase, treat `_` and `-` as spaces and collapse whitespace.
pub fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

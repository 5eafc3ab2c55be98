//! Canonical lead fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of a canonical lead field.
///
/// Variants are declared in canonical order; every ordered traversal of
/// fields (auto-mapping, validation, display) follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
    Name,
    Phone,
    Email,
    Company,
    Notes,
}

impl FieldKey {
    /// All keys in canonical order.
    pub const ALL: [FieldKey; 5] = [
        FieldKey::Name,
        FieldKey::Phone,
        FieldKey::Email,
        FieldKey::Company,
        FieldKey::Notes,
    ];

    /// Machine name used in configuration and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Phone => "phone",
            FieldKey::Email => "email",
            FieldKey::Company => "company",
            FieldKey::Notes => "notes",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        self.definition().label
    }

    /// Whether an import requires this field to be mapped.
    pub fn is_required(&self) -> bool {
        self.definition().required
    }

    /// Static definition for this key.
    pub fn definition(&self) -> &'static CanonicalField {
        // CANONICAL_FIELDS is indexed by declaration order.
        &CANONICAL_FIELDS[*self as usize]
    }

    /// Parse a machine name, case-insensitively.
    pub fn parse(value: &str) -> Option<FieldKey> {
        let value = value.trim();
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Definition of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanonicalField {
    pub key: FieldKey,
    pub label: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// The fixed set of canonical fields, in canonical order.
pub static CANONICAL_FIELDS: [CanonicalField; 5] = [
    CanonicalField {
        key: FieldKey::Name,
        label: "Full Name",
        description: "Contact's full name",
        required: true,
    },
    CanonicalField {
        key: FieldKey::Phone,
        label: "Phone Number",
        description: "Primary number the agent will dial",
        required: true,
    },
    CanonicalField {
        key: FieldKey::Email,
        label: "Email Address",
        description: "Contact email for follow-ups",
        required: false,
    },
    CanonicalField {
        key: FieldKey::Company,
        label: "Company",
        description: "Organization the lead belongs to",
        required: false,
    },
    CanonicalField {
        key: FieldKey::Notes,
        label: "Notes",
        description: "Free-form context passed to the agent",
        required: false,
    },
];

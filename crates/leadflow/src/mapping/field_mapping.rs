//! The user-editable mapping from canonical fields to source headers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};
use crate::schema::FieldKey;

/// Source column assigned to a single canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAssignment {
    /// Header of the source column, or `None` when unmapped.
    pub source_column: Option<String>,
    /// Copied from the field definition.
    pub required: bool,
}

/// Mapping from every canonical field to an optional source header.
///
/// Entries are kept in canonical field order. A header is owned by at most
/// one field at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    fields: IndexMap<FieldKey, FieldAssignment>,
}

impl FieldMapping {
    /// Create a mapping with every field unmapped.
    pub fn new() -> Self {
        let fields = FieldKey::ALL
            .into_iter()
            .map(|key| {
                (
                    key,
                    FieldAssignment {
                        source_column: None,
                        required: key.is_required(),
                    },
                )
            })
            .collect();
        Self { fields }
    }

    /// Assign `header` to `field`, or clear the field with `None`.
    ///
    /// Fails with [`ImportError::ColumnInUse`] if another field owns the header.
    /// Re-assigning a field's current header is a no-op.
    pub fn assign(&mut self, field: FieldKey, header: Option<&str>) -> Result<()> {
        if let Some(header) = header {
            if let Some(owner) = self.owner_of(header) {
                if owner != field {
                    return Err(ImportError::ColumnInUse {
                        header: header.to_string(),
                        owner,
                    });
                }
            }
        }

        if let Some(entry) = self.fields.get_mut(&field) {
            entry.source_column = header.map(str::to_string);
        }
        Ok(())
    }

    /// Clear the assignment for `field`.
    pub fn clear(&mut self, field: FieldKey) {
        if let Some(entry) = self.fields.get_mut(&field) {
            entry.source_column = None;
        }
    }

    /// Source header for `field`, if mapped.
    pub fn source_for(&self, field: FieldKey) -> Option<&str> {
        self.fields
            .get(&field)
            .and_then(|a| a.source_column.as_deref())
    }

    /// Whether `field` has a source column.
    pub fn is_mapped(&self, field: FieldKey) -> bool {
        self.source_for(field).is_some()
    }

    /// Field that currently owns `header`.
    pub fn owner_of(&self, header: &str) -> Option<FieldKey> {
        self.fields
            .iter()
            .find(|(_, a)| a.source_column.as_deref() == Some(header))
            .map(|(key, _)| *key)
    }

    /// Required fields without a source column, in canonical order.
    pub fn missing_required(&self) -> Vec<FieldKey> {
        self.fields
            .iter()
            .filter(|(_, a)| a.required && a.source_column.is_none())
            .map(|(key, _)| *key)
            .collect()
    }

    /// Whether every required field is mapped.
    pub fn has_required(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Number of mapped fields.
    pub fn mapped_count(&self) -> usize {
        self.fields
            .values()
            .filter(|a| a.source_column.is_some())
            .count()
    }

    /// Whether no field is mapped.
    pub fn is_empty(&self) -> bool {
        self.mapped_count() == 0
    }

    /// Iterate over all fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldAssignment)> {
        self.fields.iter().map(|(key, a)| (*key, a))
    }

    /// Mapped `(field, header)` pairs in canonical order.
    pub fn mapped(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.fields
            .iter()
            .filter_map(|(key, a)| a.source_column.as_deref().map(|h| (*key, h)))
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::new()
    }
}

//! Field mapping: which source column feeds each canonical field.

mod auto;
mod field_mapping;

pub use auto::{AutoMapper, FIELD_SYNONYMS, FieldSynonyms, auto_map, normalize_header};
pub use field_mapping::{FieldAssignment, FieldMapping};

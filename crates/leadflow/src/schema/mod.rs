//! Schema types: parsed columns and the canonical lead fields they map to.

mod column;
mod field;

pub use column::Column;
pub use field::{CANONICAL_FIELDS, CanonicalField, FieldKey};

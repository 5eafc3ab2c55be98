//! Validation of a field mapping against sampled data.

mod checks;
mod diagnostic;
mod report;
mod validator;

pub use checks::{EmailFormatCheck, FieldCheck, NameCompletenessCheck, PhoneFormatCheck};
pub use diagnostic::{MAPPING_LEVEL, ValidationError, ValidationWarning};
pub use report::{RowEstimate, ValidationReport};
pub use validator::{MappingValidator, validate};

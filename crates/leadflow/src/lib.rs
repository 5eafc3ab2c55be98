//! leadflow: CSV lead import pipeline.
//!
//! Prepares an uploaded lead file for import: a preview of the file is
//! parsed, detected headers are mapped onto canonical lead fields, the
//! mapping is validated against sampled values, and a four-stage workflow
//! hands the original file to a commit collaborator.
//!
//! # Example
//!
//! ```
//! use leadflow::{FieldKey, ImportStage, ImportWorkflow, MockCommitter, SelectedFile};
//!
//! let mut workflow = ImportWorkflow::new(MockCommitter::new());
//! workflow
//!     .select_file(SelectedFile::new("leads.csv", "Name,Phone\nAlice,555-1234\n"))
//!     .unwrap();
//!
//! assert_eq!(workflow.advance().unwrap(), ImportStage::Mapping);
//! assert_eq!(workflow.session().mapping().source_for(FieldKey::Phone), Some("Phone"));
//!
//! assert_eq!(workflow.advance().unwrap(), ImportStage::Validation);
//! assert!(workflow.session().report().unwrap().can_commit());
//!
//! assert_eq!(workflow.advance().unwrap(), ImportStage::Progress);
//! ```

pub mod commit;
pub mod config;
pub mod error;
pub mod input;
pub mod mapping;
pub mod schema;
pub mod validation;
pub mod workflow;

pub use commit::{
    CommitOutcome, CsvFileCommitter, LeadCommitter, MockCommitter, UploadProgress, UploadStatus,
};
pub use config::{ImportConfig, PreviewConfig, ValidatorConfig};
pub use error::{ImportError, Result};
pub use input::{FileKind, PreviewParser, PreviewTable, SelectedFile, parse_preview};
pub use mapping::{AutoMapper, FieldAssignment, FieldMapping, auto_map};
pub use schema::{CANONICAL_FIELDS, CanonicalField, Column, FieldKey};
pub use validation::{
    MappingValidator, ValidationError, ValidationReport, ValidationWarning, validate,
};
pub use workflow::{ColumnChoice, ImportSession, ImportStage, ImportWorkflow};

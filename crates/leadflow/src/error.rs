//! Error types for the leadflow library.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::FieldKey;
use crate::workflow::ImportStage;

/// Main error type for lead import operations.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File contents could not be read as text.
    #[error("Cannot read '{file_name}' as UTF-8 text: {source}")]
    Encoding {
        file_name: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Selected file does not carry an accepted extension.
    #[error("Unsupported file type '{file_name}': expected one of {expected}")]
    UnsupportedFileType { file_name: String, expected: String },

    /// Operation is not available in the current workflow stage.
    #[error("Cannot {action} while in the {stage} stage")]
    InvalidStage {
        action: &'static str,
        stage: ImportStage,
    },

    /// Mapping refers to a header that is not present in the parsed file.
    #[error("Column '{0}' does not exist in the selected file")]
    UnknownColumn(String),

    /// Header is already mapped to a different field.
    #[error("Column '{header}' is already mapped to {owner}")]
    ColumnInUse { header: String, owner: FieldKey },

    /// Required fields have no source column.
    #[error("Required fields are not mapped: {}", join_fields(.0))]
    MissingRequiredFields(Vec<FieldKey>),

    /// Validation produced mapping-level errors.
    #[error("{0} blocking validation error(s) must be fixed before importing")]
    BlockingValidationErrors(usize),

    /// Workflow cannot be closed while a commit is in flight.
    #[error("Import is still in progress and cannot be closed")]
    CloseWhileCommitting,

    /// No file has been selected yet.
    #[error("No file selected")]
    NoFileSelected,

    /// Commit collaborator reported a failure.
    #[error("Commit failed: {0}")]
    Commit(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn join_fields(fields: &[FieldKey]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for lead import operations.
pub type Result<T> = std::result::Result<T, ImportError>;

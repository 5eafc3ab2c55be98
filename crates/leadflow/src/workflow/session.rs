//! Session state owned by a single workflow.

use crate::commit::{CommitOutcome, UploadProgress};
use crate::input::SelectedFile;
use crate::mapping::FieldMapping;
use crate::schema::Column;
use crate::validation::ValidationReport;

use super::stage::ImportStage;

/// Everything a workflow knows about the import in hand.
///
/// `Default` is the initial empty state the workflow returns to on close.
#[derive(Debug, Clone, Default)]
pub struct ImportSession {
    pub(crate) stage: ImportStage,
    pub(crate) file: Option<SelectedFile>,
    pub(crate) file_error: Option<String>,
    pub(crate) columns: Vec<Column>,
    pub(crate) row_count: usize,
    pub(crate) mapping: FieldMapping,
    pub(crate) report: Option<ValidationReport>,
    pub(crate) progress: Option<UploadProgress>,
    pub(crate) outcome: Option<CommitOutcome>,
}

impl ImportSession {
    /// Current stage.
    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    /// Selected file, if any.
    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Message from the last rejected file selection.
    pub fn file_error(&self) -> Option<&str> {
        self.file_error.as_deref()
    }

    /// Columns parsed from the selected file.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Data row count of the selected file.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Current field mapping.
    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// Report computed on entering the validation stage.
    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    /// Latest commit progress.
    pub fn progress(&self) -> Option<&UploadProgress> {
        self.progress.as_ref()
    }

    /// Result returned by the committer.
    pub fn outcome(&self) -> Option<&CommitOutcome> {
        self.outcome.as_ref()
    }

    /// Whether a commit is uploading or processing.
    pub fn is_committing(&self) -> bool {
        self.progress
            .as_ref()
            .is_some_and(|p| p.status.is_active())
    }

    /// Record a progress update. Status only moves forward; updates after a
    /// terminal status or to an earlier phase are dropped.
    pub(crate) fn record_progress(&mut self, update: UploadProgress) {
        if let Some(current) = &self.progress {
            if current.status.is_terminal() {
                tracing::debug!(status = update.status.label(), "ignoring progress after commit finished");
                return;
            }
            if update.status.phase() < current.status.phase() {
                tracing::debug!(
                    from = current.status.label(),
                    to = update.status.label(),
                    "ignoring backward progress update"
                );
                return;
            }
        }
        tracing::debug!(status = update.status.label(), progress = update.progress, "commit progress");
        self.progress = Some(update);
    }

    /// Drop everything derived from the selected file.
    pub(crate) fn clear_preview(&mut self) {
        self.columns.clear();
        self.row_count = 0;
        self.mapping = FieldMapping::new();
        self.report = None;
    }
}

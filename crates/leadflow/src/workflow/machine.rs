//! The import workflow state machine.

use serde::Serialize;

use crate::commit::{CommitOutcome, LeadCommitter, UploadProgress, UploadStatus};
use crate::config::ImportConfig;
use crate::error::{ImportError, Result};
use crate::input::{PreviewParser, SelectedFile};
use crate::mapping::AutoMapper;
use crate::schema::FieldKey;
use crate::validation::MappingValidator;

use super::session::ImportSession;
use super::stage::ImportStage;

/// A column as offered for one field in the mapping stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnChoice {
    pub header: String,
    /// False when another field already uses this column.
    pub enabled: bool,
    /// True when this column is the field's current source.
    pub selected: bool,
}

/// Drives one import from file selection to commit.
///
/// Stages run `upload → mapping → validation → progress`. Moving back is
/// allowed to any earlier stage except from `progress`.
pub struct ImportWorkflow<C> {
    config: ImportConfig,
    parser: PreviewParser,
    mapper: AutoMapper,
    validator: MappingValidator,
    committer: C,
    session: ImportSession,
}

impl<C: LeadCommitter> ImportWorkflow<C> {
    /// Create a workflow with the default configuration.
    pub fn new(committer: C) -> Self {
        Self::with_config(committer, ImportConfig::default())
    }

    /// Create a workflow with custom configuration.
    pub fn with_config(committer: C, config: ImportConfig) -> Self {
        let parser = PreviewParser::with_config(config.preview.clone());
        let validator = MappingValidator::with_config(config.validator.clone());

        Self {
            config,
            parser,
            mapper: AutoMapper::new(),
            validator,
            committer,
            session: ImportSession::default(),
        }
    }

    /// Read-only session state.
    pub fn session(&self) -> &ImportSession {
        &self.session
    }

    /// Current stage.
    pub fn stage(&self) -> ImportStage {
        self.session.stage
    }

    /// Active configuration.
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// The commit collaborator.
    pub fn committer(&self) -> &C {
        &self.committer
    }

    /// Select a file. Only `.csv`/`.xls` (or the configured list) are accepted.
    ///
    /// A rejected file is recorded as the session's file error and clears any
    /// previous selection; an accepted file replaces the previous one.
    pub fn select_file(&mut self, file: SelectedFile) -> Result<()> {
        self.require_stage(ImportStage::Upload, "select a file")?;

        self.session.clear_preview();

        if !file.has_extension_in(&self.config.accepted_extensions) {
            let err = ImportError::UnsupportedFileType {
                file_name: file.name.clone(),
                expected: self.config.extension_list(),
            };
            tracing::info!(file = %file.name, "rejected file selection");
            self.session.file = None;
            self.session.file_error = Some(err.to_string());
            return Err(err);
        }

        tracing::info!(
            file = %file.name,
            kind = ?file.kind(),
            bytes = file.size_bytes(),
            "selected file"
        );
        self.session.file = Some(file);
        self.session.file_error = None;
        Ok(())
    }

    /// Reassign `field` to `header`, or unmap it with `None`.
    pub fn update_mapping(&mut self, field: FieldKey, header: Option<&str>) -> Result<()> {
        self.require_stage(ImportStage::Mapping, "change the mapping")?;

        if let Some(header) = header {
            if !self.session.columns.iter().any(|c| c.header == header) {
                return Err(ImportError::UnknownColumn(header.to_string()));
            }
        }

        self.session.mapping.assign(field, header)?;
        tracing::debug!(field = field.as_str(), header = ?header, "updated mapping");
        Ok(())
    }

    /// Columns offered for `field`: columns owned by a different field are
    /// disabled.
    pub fn column_choices(&self, field: FieldKey) -> Vec<ColumnChoice> {
        let mapping = &self.session.mapping;
        self.session
            .columns
            .iter()
            .map(|column| {
                let owner = mapping.owner_of(&column.header);
                ColumnChoice {
                    header: column.header.clone(),
                    enabled: owner.is_none() || owner == Some(field),
                    selected: owner == Some(field),
                }
            })
            .collect()
    }

    /// Whether `advance()` would currently succeed.
    pub fn can_advance(&self) -> bool {
        match self.session.stage {
            ImportStage::Upload => self.session.file.is_some(),
            ImportStage::Mapping => self.session.mapping.has_required(),
            ImportStage::Validation => self
                .session
                .report
                .as_ref()
                .is_some_and(|r| r.can_commit()),
            ImportStage::Progress => false,
        }
    }

    /// Move to the next stage and return it.
    ///
    /// From `upload`, CSV files are parsed and auto-mapped; other accepted
    /// files, and CSV files whose text cannot be read, go straight to commit.
    /// From `mapping`, the validator runs once. From `validation`, the
    /// mapping is committed.
    pub fn advance(&mut self) -> Result<ImportStage> {
        match self.session.stage {
            ImportStage::Upload => self.advance_from_upload(),
            ImportStage::Mapping => self.advance_from_mapping(),
            ImportStage::Validation => self.commit_now(),
            ImportStage::Progress => Err(ImportError::InvalidStage {
                action: "advance",
                stage: ImportStage::Progress,
            }),
        }
    }

    fn advance_from_upload(&mut self) -> Result<ImportStage> {
        let file = self.session.file.as_ref().ok_or(ImportError::NoFileSelected)?;

        if !file.kind().supports_mapping() {
            tracing::info!(file = %file.name, "file has no column preview, committing directly");
            return self.run_commit();
        }

        let parsed = file.text().map(|text| self.parser.parse(text));
        let table = match parsed {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(error = %e, "could not read file as text, committing raw file");
                return self.run_commit();
            }
        };

        let mapping = self.mapper.map_columns(&table.columns);
        tracing::info!(
            columns = table.columns.len(),
            rows = table.row_count,
            mapped = mapping.mapped_count(),
            "parsed preview"
        );

        self.session.columns = table.columns;
        self.session.row_count = table.row_count;
        self.session.mapping = mapping;
        self.session.report = None;
        Ok(self.enter(ImportStage::Mapping))
    }

    fn advance_from_mapping(&mut self) -> Result<ImportStage> {
        let missing = self.session.mapping.missing_required();
        if !missing.is_empty() {
            return Err(ImportError::MissingRequiredFields(missing));
        }

        let report = self.validator.validate(
            &self.session.columns,
            &self.session.mapping,
            self.session.row_count,
        );
        self.session.report = Some(report);
        Ok(self.enter(ImportStage::Validation))
    }

    /// Commit from the validation stage. Refused while the report has
    /// blocking errors.
    pub fn commit_now(&mut self) -> Result<ImportStage> {
        self.require_stage(ImportStage::Validation, "commit")?;

        let blocking = self
            .session
            .report
            .as_ref()
            .map(|r| r.blocking_errors().count())
            .unwrap_or(0);
        if blocking > 0 {
            return Err(ImportError::BlockingValidationErrors(blocking));
        }

        self.run_commit()
    }

    /// Go back one stage.
    pub fn back(&mut self) -> Result<ImportStage> {
        let stage = self.session.stage;
        let target = stage.previous().ok_or(ImportError::InvalidStage {
            action: "go back",
            stage,
        })?;
        self.back_to(target)
    }

    /// Go back to any earlier stage. Leaving `validation` discards the report.
    pub fn back_to(&mut self, target: ImportStage) -> Result<ImportStage> {
        let stage = self.session.stage;
        if !stage.can_go_back_to(target) {
            return Err(ImportError::InvalidStage {
                action: "go back",
                stage,
            });
        }

        self.session.report = None;
        Ok(self.enter(target))
    }

    /// Apply a progress update pushed by the host while a commit is running.
    pub fn apply_progress(&mut self, update: UploadProgress) -> Result<()> {
        self.require_stage(ImportStage::Progress, "report progress")?;
        self.session.record_progress(update);
        Ok(())
    }

    /// Whether `close()` is currently allowed.
    pub fn can_close(&self) -> bool {
        !self.session.is_committing()
    }

    /// Close the workflow, resetting the session. Refused while uploading or
    /// processing.
    pub fn close(&mut self) -> Result<()> {
        if self.session.is_committing() {
            return Err(ImportError::CloseWhileCommitting);
        }
        self.session = ImportSession::default();
        tracing::debug!("closed import workflow");
        Ok(())
    }

    /// Enter `progress` and hand the original file to the committer.
    fn run_commit(&mut self) -> Result<ImportStage> {
        let file = self.session.file.clone().ok_or(ImportError::NoFileSelected)?;

        self.session.outcome = None;
        self.session.progress = Some(UploadProgress::uploading(&file.name, 0));
        self.enter(ImportStage::Progress);

        let session = &mut self.session;
        let result = self
            .committer
            .commit(&file, &mut |update| session.record_progress(update));

        self.finish_commit(&file.name, result);
        Ok(ImportStage::Progress)
    }

    fn finish_commit(&mut self, file_name: &str, result: Result<CommitOutcome>) {
        match result {
            Ok(outcome) if outcome.success => {
                match self.session.progress.as_ref().map(|p| p.status) {
                    // Server-side processing continues; the host pushes the
                    // terminal update through `apply_progress`.
                    Some(UploadStatus::Processing) => {
                        tracing::debug!(file = file_name, "commit accepted, awaiting processing result");
                    }
                    Some(UploadStatus::Completed) | Some(UploadStatus::Error) => {}
                    Some(UploadStatus::Uploading) | None => {
                        self.session.record_progress(UploadProgress::completed(
                            file_name,
                            outcome.total_leads,
                            outcome.leads_added,
                        ));
                    }
                }
                tracing::info!(added = outcome.leads_added, total = outcome.total_leads, "import completed");
                self.session.outcome = Some(outcome);
            }
            Ok(outcome) => {
                tracing::warn!(file = file_name, "committer reported an unsuccessful import");
                self.session
                    .record_progress(UploadProgress::failed(file_name, "The import was not accepted"));
                self.session.outcome = Some(outcome);
            }
            Err(e) => {
                tracing::warn!(file = file_name, error = %e, "import failed");
                self.session
                    .record_progress(UploadProgress::failed(file_name, e.to_string()));
            }
        }
    }

    fn enter(&mut self, stage: ImportStage) -> ImportStage {
        tracing::info!(from = %self.session.stage, to = %stage, "stage transition");
        self.session.stage = stage;
        stage
    }

    fn require_stage(&self, expected: ImportStage, action: &'static str) -> Result<()> {
        if self.session.stage == expected {
            Ok(())
        } else {
            Err(ImportError::InvalidStage {
                action,
                stage: self.session.stage,
            })
        }
    }
}

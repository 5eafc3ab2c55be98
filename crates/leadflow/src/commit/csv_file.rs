//! Committer that writes normalized leads to a CSV file.

use std::path::{Path, PathBuf};

use crate::error::{ImportError, Result};
use crate::input::{FileKind, SelectedFile, clean_cell};
use crate::mapping::AutoMapper;
use crate::schema::{Column, FieldKey};

use super::committer::{CommitOutcome, LeadCommitter};
use super::progress::UploadProgress;

/// Writes every lead with a name and a phone number to `output`, one column
/// per canonical field.
///
/// The committer parses the raw upload itself with a full CSV reader, so
/// quoted commas are handled here even though the preview parser splits
/// naively. Headers are mapped with the same synonym table as the preview,
/// then any explicit overrides are applied on top.
pub struct CsvFileCommitter {
    output: PathBuf,
    mapper: AutoMapper,
    overrides: Vec<(FieldKey, Option<String>)>,
}

impl CsvFileCommitter {
    /// Create a committer writing to `output`.
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            mapper: AutoMapper::new(),
            overrides: Vec::new(),
        }
    }

    /// Map fields to explicit headers after auto-mapping. A header taken by
    /// an override is released by its previous owner; `None` unmaps.
    pub fn with_overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (FieldKey, Option<S>)>,
        S: Into<String>,
    {
        self.overrides = overrides
            .into_iter()
            .map(|(field, header)| (field, header.map(Into::into)))
            .collect();
        self
    }

    /// Destination path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    fn write_leads(&self, text: &str) -> Result<CommitOutcome> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let columns: Vec<Column> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| Column::new(i, clean_cell(h)))
            .collect();
        let mut mapping = self.mapper.map_columns(&columns);

        for (field, header) in &self.overrides {
            match header {
                Some(header) if columns.iter().any(|c| &c.header == header) => {
                    if let Some(owner) = mapping.owner_of(header) {
                        mapping.clear(owner);
                    }
                    mapping.assign(*field, Some(header.as_str()))?;
                }
                Some(header) => return Err(ImportError::UnknownColumn(header.clone())),
                None => mapping.clear(*field),
            }
        }

        // Position of the source column for each canonical field.
        let positions: Vec<Option<usize>> = FieldKey::ALL
            .iter()
            .map(|key| {
                mapping
                    .source_for(*key)
                    .and_then(|h| columns.iter().find(|c| c.header == h))
                    .map(|c| c.index)
            })
            .collect();

        let mut writer = csv::Writer::from_path(&self.output)?;
        writer.write_record(FieldKey::ALL.iter().map(|k| k.as_str()))?;

        let mut total = 0;
        let mut added = 0;
        for record in reader.records() {
            let record = record?;
            if record.iter().all(|cell| cell.is_empty()) {
                continue;
            }
            total += 1;

            // Cells get the same quote rule as the preview.
            let values: Vec<String> = positions
                .iter()
                .map(|pos| pos.and_then(|i| record.get(i)).map(clean_cell).unwrap_or_default())
                .collect();

            let has_required = FieldKey::ALL
                .iter()
                .zip(&values)
                .all(|(key, value)| !key.is_required() || !value.is_empty());

            if has_required {
                writer.write_record(&values)?;
                added += 1;
            }
        }

        writer.flush().map_err(|e| ImportError::Io {
            path: self.output.clone(),
            source: e,
        })?;

        Ok(CommitOutcome::succeeded(total, added))
    }
}

impl LeadCommitter for CsvFileCommitter {
    fn commit(
        &self,
        file: &SelectedFile,
        progress: &mut dyn FnMut(UploadProgress),
    ) -> Result<CommitOutcome> {
        progress(UploadProgress::uploading(&file.name, 0));

        if file.kind() != FileKind::Csv {
            return Err(ImportError::Commit(format!(
                "'{}' is not a CSV file; spreadsheets must be imported through the dashboard",
                file.name
            )));
        }

        let text = file.text()?;
        progress(UploadProgress::uploading(&file.name, 100));
        progress(UploadProgress::processing(&file.name, 0));

        let outcome = self.write_leads(text)?;
        tracing::info!(
            output = %self.output.display(),
            total = outcome.total_leads,
            added = outcome.leads_added,
            "wrote leads"
        );

        progress(UploadProgress::completed(
            &file.name,
            outcome.total_leads,
            outcome.leads_added,
        ));
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_mapped_leads() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("leads.csv");
        let committer = CsvFileCommitter::new(&output);

        let file = SelectedFile::new(
            "upload.csv",
            "Email,Full Name,Mobile,Remarks\n\
             a@example.com,Alice,555-1234,\"call after 5, not before\"\n\
             b@example.com,,555-9999,no name\n\
             ,Carol,555-0000,\n",
        );

        let outcome = committer.commit(&file, &mut |_| {}).unwrap();
        assert_eq!(outcome, CommitOutcome::succeeded(3, 2));

        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines[0], "name,phone,email,company,notes");
        assert_eq!(lines[1], "Alice,555-1234,a@example.com,,\"call after 5, not before\"");
        assert_eq!(lines[2], "Carol,555-0000,,,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("leads.csv");
        let committer = CsvFileCommitter::new(&output).with_overrides([
            (FieldKey::Name, Some("Contact")),
            (FieldKey::Notes, Some("Mobile")),
            (FieldKey::Phone, Some("Work Phone")),
        ]);

        let file = SelectedFile::new("upload.csv", "Contact,Mobile,Work Phone
Alice,555-0000,555-1234
");
        let outcome = committer.commit(&file, &mut |_| {}).unwrap();
        assert_eq!(outcome, CommitOutcome::succeeded(1, 1));

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().nth(1), Some("Alice,555-1234,,,555-0000"));
    }

    #[test]
    fn test_override_with_unknown_header() {
        let dir = tempfile::tempdir().unwrap();
        let committer = CsvFileCommitter::new(dir.path().join("out.csv"))
            .with_overrides([(FieldKey::Email, Some("Email"))]);
        let file = SelectedFile::new("leads.csv", "Name,Phone
Alice,555-1234
");

        let err = committer.commit(&file, &mut |_| {}).unwrap_err();
        assert!(matches!(err, ImportError::UnknownColumn(_)));
    }

    #[test]
    fn test_single_quoted_headers_match_preview() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("leads.csv");
        let committer = CsvFileCommitter::new(&output);
        let file = SelectedFile::new("upload.csv", "'Name','Phone'\nAlice,555-1234\n'Bob','555-9876'\n");

        let outcome = committer.commit(&file, &mut |_| {}).unwrap();
        assert_eq!(outcome, CommitOutcome::succeeded(2, 2));

        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines[1], "Alice,555-1234,,,");
        assert_eq!(lines[2], "Bob,555-9876,,,");
    }

    #[test]
    fn test_override_uses_cleaned_header() {
        let dir = tempfile::tempdir().unwrap();
        let committer = CsvFileCommitter::new(dir.path().join("out.csv"))
            .with_overrides([(FieldKey::Name, Some("Contact"))]);
        let file = SelectedFile::new("leads.csv", "'Contact','Phone'\nAlice,555-1234\n");

        let outcome = committer.commit(&file, &mut |_| {}).unwrap();
        assert_eq!(outcome, CommitOutcome::succeeded(1, 1));
    }

    #[test]
    fn test_rejects_spreadsheets() {
        let dir = tempfile::tempdir().unwrap();
        let committer = CsvFileCommitter::new(dir.path().join("out.csv"));
        let file = SelectedFile::new("leads.xls", vec![0xd0, 0xcf]);

        let err = committer.commit(&file, &mut |_| {}).unwrap_err();
        assert!(matches!(err, ImportError::Commit(_)));
    }

    #[test]
    fn test_rejects_binary_csv() {
        let dir = tempfile::tempdir().unwrap();
        let committer = CsvFileCommitter::new(dir.path().join("out.csv"));
        let file = SelectedFile::new("leads.csv", vec![0xff, 0xfe]);

        let err = committer.commit(&file, &mut |_| {}).unwrap_err();
        assert!(matches!(err, ImportError::Encoding { .. }));
    }
}

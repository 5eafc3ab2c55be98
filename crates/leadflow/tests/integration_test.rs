//! Integration tests for the import workflow.

use std::io::Write;

use tempfile::NamedTempFile;

use leadflow::{
    CsvFileCommitter, FieldKey, ImportConfig, ImportError, ImportStage, ImportWorkflow,
    MockCommitter, SelectedFile, UploadStatus, auto_map, parse_preview, validate,
};

/// Helper to create a temporary file with given content.
fn create_test_file(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content).expect("Failed to write to temp file");
    file
}

// =============================================================================
// Component Pipeline
// =============================================================================

#[test]
fn test_preview_map_validate() {
    let table = parse_preview("Name,Phone\nAlice,555-1234\nBob,notaphone");
    assert_eq!(table.row_count, 2);

    let mapping = auto_map(&table.columns);
    assert_eq!(mapping.source_for(FieldKey::Name), Some("Name"));
    assert_eq!(mapping.source_for(FieldKey::Phone), Some("Phone"));

    let report = validate(&table.columns, &mapping, table.row_count);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].field_label, "Phone Number");
    assert_eq!(report.warnings[0].affected_count, 1);
    assert!(!report.has_blocking_errors());
}

#[test]
fn test_unrecognized_headers_report() {
    let table = parse_preview("X,Y\nfoo,bar");
    let mapping = auto_map(&table.columns);
    assert!(mapping.is_empty());

    let report = validate(&table.columns, &mapping, table.row_count);
    assert_eq!(report.blocking_errors().count(), 2);
    assert!(!report.can_commit());
}

// =============================================================================
// Workflow Scenarios
// =============================================================================

#[test]
fn test_csv_with_phone_warning_can_be_committed() {
    let mut workflow = ImportWorkflow::new(MockCommitter::new());
    workflow
        .select_file(SelectedFile::new(
            "leads.csv",
            "Name,Phone\nAlice,555-1234\nBob,notaphone",
        ))
        .unwrap();

    assert_eq!(workflow.advance().unwrap(), ImportStage::Mapping);
    assert_eq!(workflow.session().row_count(), 2);

    assert_eq!(workflow.advance().unwrap(), ImportStage::Validation);
    let report = workflow.session().report().unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(report.errors.is_empty());
    assert!(workflow.can_advance());

    assert_eq!(workflow.commit_now().unwrap(), ImportStage::Progress);
    assert_eq!(
        workflow.session().progress().unwrap().status,
        UploadStatus::Completed
    );
    assert_eq!(workflow.committer().commit_count(), 1);
}

#[test]
fn test_unmapped_required_fields_block_progress() {
    let mut workflow = ImportWorkflow::new(MockCommitter::new());
    workflow
        .select_file(SelectedFile::new("leads.csv", "X,Y\nfoo,bar"))
        .unwrap();
    workflow.advance().unwrap();

    assert!(workflow.session().mapping().is_empty());
    assert!(!workflow.can_advance());
    let err = workflow.advance().unwrap_err();
    assert!(matches!(
        err,
        ImportError::MissingRequiredFields(ref fields) if fields == &vec![FieldKey::Name, FieldKey::Phone]
    ));
    assert_eq!(workflow.stage(), ImportStage::Mapping);
    assert_eq!(workflow.committer().commit_count(), 0);
}

#[test]
fn test_remapping_unblocks_import() {
    let mut workflow = ImportWorkflow::new(MockCommitter::new());
    workflow
        .select_file(SelectedFile::new("leads.csv", "X,Y\nAlice,5551234"))
        .unwrap();
    workflow.advance().unwrap();

    workflow.update_mapping(FieldKey::Name, Some("X")).unwrap();
    workflow.update_mapping(FieldKey::Phone, Some("Y")).unwrap();

    assert_eq!(workflow.advance().unwrap(), ImportStage::Validation);
    assert!(workflow.session().report().unwrap().is_clean());
    assert_eq!(workflow.advance().unwrap(), ImportStage::Progress);
}

#[test]
fn test_pdf_is_rejected() {
    let mut workflow = ImportWorkflow::new(MockCommitter::new());
    let err = workflow
        .select_file(SelectedFile::new("report.pdf", "%PDF-1.4"))
        .unwrap_err();

    assert!(matches!(err, ImportError::UnsupportedFileType { .. }));
    assert_eq!(workflow.stage(), ImportStage::Upload);
    assert!(workflow.session().file_error().is_some());
    assert!(!workflow.can_advance());
}

#[test]
fn test_xls_skips_mapping() {
    let mut workflow = ImportWorkflow::new(MockCommitter::new());
    workflow
        .select_file(SelectedFile::new("leads.xls", vec![0xd0, 0xcf, 0x11, 0xe0]))
        .unwrap();

    assert_eq!(workflow.advance().unwrap(), ImportStage::Progress);
    assert!(workflow.session().columns().is_empty());
    assert!(workflow.session().report().is_none());
    assert_eq!(workflow.committer().commit_count(), 1);
    assert_eq!(
        workflow.committer().last_file().unwrap().name,
        "leads.xls"
    );
}

#[test]
fn test_unreadable_csv_falls_back_to_raw_commit() {
    let mut workflow = ImportWorkflow::new(MockCommitter::new());
    let raw = vec![b'N', b'a', 0xff, b'\n', 0xfe];
    workflow
        .select_file(SelectedFile::new("leads.csv", raw.clone()))
        .unwrap();

    assert_eq!(workflow.advance().unwrap(), ImportStage::Progress);
    assert_eq!(workflow.committer().last_file().unwrap().contents, raw);
    assert!(workflow.session().file_error().is_none());
}

#[test]
fn test_excel_byte_order_mark_is_ignored() {
    let mut workflow = ImportWorkflow::new(MockCommitter::new());
    workflow
        .select_file(SelectedFile::new("leads.csv", "\u{feff}Name,Phone\nAlice,555-1234\n"))
        .unwrap();

    assert_eq!(workflow.advance().unwrap(), ImportStage::Mapping);
    let session = workflow.session();
    assert_eq!(session.columns()[0].header, "Name");
    assert_eq!(session.mapping().source_for(FieldKey::Name), Some("Name"));

    assert_eq!(workflow.advance().unwrap(), ImportStage::Validation);
    assert!(workflow.session().report().unwrap().can_commit());
}

#[test]
fn test_commit_receives_original_file() {
    let content = "Phone,Name,Extra\n5551234,Alice,x\n";
    let mut workflow = ImportWorkflow::new(MockCommitter::new());
    workflow
        .select_file(SelectedFile::new("leads.csv", content))
        .unwrap();
    workflow.advance().unwrap();
    workflow.update_mapping(FieldKey::Notes, Some("Extra")).unwrap();
    workflow.advance().unwrap();
    workflow.advance().unwrap();

    let committed = workflow.committer().last_file().unwrap();
    assert_eq!(committed.contents, content.as_bytes());
}

#[test]
fn test_close_and_restart() {
    let mut workflow = ImportWorkflow::new(MockCommitter::new());
    workflow
        .select_file(SelectedFile::new("leads.xls", ""))
        .unwrap();
    workflow.advance().unwrap();
    workflow.close().unwrap();

    assert_eq!(workflow.stage(), ImportStage::Upload);
    assert!(workflow.session().progress().is_none());

    workflow
        .select_file(SelectedFile::new("next.csv", "name,phone\nA,5551234"))
        .unwrap();
    assert_eq!(workflow.advance().unwrap(), ImportStage::Mapping);
}

#[test]
fn test_custom_sample_window_and_extensions() {
    let mut config = ImportConfig::default();
    config.preview.sample_window = 1;
    config.accepted_extensions.push("txt".to_string());

    let mut workflow = ImportWorkflow::with_config(MockCommitter::new(), config);
    workflow
        .select_file(SelectedFile::new("leads.txt", "name,phone\nA,1\nB,2"))
        .unwrap();

    // Accepted by the gate, but only CSV files get a column preview.
    assert_eq!(workflow.advance().unwrap(), ImportStage::Progress);

    workflow.close().unwrap();
    workflow
        .select_file(SelectedFile::new("leads.csv", "name,phone\nA,1\nB,2"))
        .unwrap();
    workflow.advance().unwrap();
    assert_eq!(workflow.session().columns()[0].sample_values, vec!["A"]);
    assert_eq!(workflow.session().row_count(), 2);
}

// =============================================================================
// File Committer
// =============================================================================

#[test]
fn test_workflow_with_file_committer() {
    let input = create_test_file(
        ".csv",
        b"Full Name,Telephone,Company Name\nAlice,555-1234,Acme\nBob,,Initech\n",
    );
    let output_dir = tempfile::tempdir().unwrap();
    let output = output_dir.path().join("leads.csv");

    let mut workflow = ImportWorkflow::new(CsvFileCommitter::new(&output));
    workflow
        .select_file(SelectedFile::from_path(input.path()).unwrap())
        .unwrap();
    workflow.advance().unwrap();
    workflow.advance().unwrap();
    workflow.advance().unwrap();

    let outcome = workflow.session().outcome().unwrap();
    assert_eq!(outcome.total_leads, 2);
    assert_eq!(outcome.leads_added, 1);

    let progress = workflow.session().progress().unwrap();
    assert_eq!(progress.status, UploadStatus::Completed);
    assert_eq!(progress.valid_leads, 1);

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("Alice,555-1234,,Acme,"));
    assert!(!written.contains("Bob"));
}

#[test]
fn test_file_committer_agrees_with_preview_on_quoted_headers() {
    let output_dir = tempfile::tempdir().unwrap();
    let output = output_dir.path().join("leads.csv");

    let mut workflow = ImportWorkflow::new(CsvFileCommitter::new(&output));
    workflow
        .select_file(SelectedFile::new(
            "leads.csv",
            "'Name','Phone'\nAlice,555-1234\nBob,555-9876\n",
        ))
        .unwrap();
    workflow.advance().unwrap();
    assert_eq!(workflow.session().mapping().source_for(FieldKey::Phone), Some("Phone"));
    workflow.advance().unwrap();
    assert!(workflow.session().report().unwrap().can_commit());
    workflow.advance().unwrap();

    let progress = workflow.session().progress().unwrap();
    assert_eq!(progress.status, UploadStatus::Completed);
    assert_eq!(progress.total_leads, 2);
    assert_eq!(progress.valid_leads, 2);

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("Alice,555-1234,,,"));
    assert!(written.contains("Bob,555-9876,,,"));
}

#[test]
fn test_file_committer_strips_byte_order_mark() {
    let output_dir = tempfile::tempdir().unwrap();
    let output = output_dir.path().join("leads.csv");

    let mut workflow = ImportWorkflow::new(CsvFileCommitter::new(&output));
    workflow
        .select_file(SelectedFile::new("leads.csv", "\u{feff}Name,Phone\nAlice,555-1234\n"))
        .unwrap();
    workflow.advance().unwrap();
    workflow.advance().unwrap();
    workflow.advance().unwrap();

    assert_eq!(workflow.session().outcome().unwrap().leads_added, 1);
}

//! Fuzz target for the import workflow.
//!
//! Arbitrary action sequences must never panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use leadflow::{FieldKey, ImportWorkflow, MockCommitter, SelectedFile};

#[derive(Debug, Arbitrary)]
enum Action {
    Select { csv: bool, contents: Vec<u8> },
    Map { field: u8, header: Option<String> },
    Advance,
    Commit,
    Back,
    Close,
}

fuzz_target!(|actions: Vec<Action>| {
    let mut workflow = ImportWorkflow::new(MockCommitter::new());

    for action in actions.into_iter().take(64) {
        match action {
            Action::Select { csv, contents } => {
                let name = if csv { "leads.csv" } else { "leads.xls" };
                let _ = workflow.select_file(SelectedFile::new(name, contents));
            }
            Action::Map { field, header } => {
                let field = FieldKey::ALL[field as usize % FieldKey::ALL.len()];
                let _ = workflow.update_mapping(field, header.as_deref());
            }
            Action::Advance => {
                let _ = workflow.advance();
            }
            Action::Commit => {
                let _ = workflow.commit_now();
            }
            Action::Back => {
                let _ = workflow.back();
            }
            Action::Close => {
                let _ = workflow.close();
            }
        }
    }

    assert!(workflow.committer().commit_count() <= 64);
    let _ = workflow.session().stage();
});

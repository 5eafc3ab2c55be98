//! Mock committer for tests and dry runs.

use std::cell::{Cell, RefCell};

use crate::error::{ImportError, Result};
use crate::input::SelectedFile;

use super::committer::{CommitOutcome, LeadCommitter};
use super::progress::UploadProgress;

/// Committer that stores nothing and reports predictable progress.
///
/// Lead counts come from the number of non-blank lines after the header.
#[derive(Debug, Default)]
pub struct MockCommitter {
    failure: Option<String>,
    reject: bool,
    defer_completion: bool,
    commits: Cell<usize>,
    last_file: RefCell<Option<SelectedFile>>,
}

impl MockCommitter {
    /// Create a committer that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a committer whose commit call returns an error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Create a committer that completes with `success == false`.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    /// Create a committer that returns while the file is still processing,
    /// leaving the terminal update to the host.
    pub fn deferred() -> Self {
        Self {
            defer_completion: true,
            ..Self::default()
        }
    }

    /// Number of commit calls received.
    pub fn commit_count(&self) -> usize {
        self.commits.get()
    }

    /// The file passed to the most recent commit.
    pub fn last_file(&self) -> Option<SelectedFile> {
        self.last_file.borrow().clone()
    }
}

impl LeadCommitter for MockCommitter {
    fn commit(
        &self,
        file: &SelectedFile,
        progress: &mut dyn FnMut(UploadProgress),
    ) -> Result<CommitOutcome> {
        self.commits.set(self.commits.get() + 1);
        *self.last_file.borrow_mut() = Some(file.clone());

        progress(UploadProgress::uploading(&file.name, 0));
        progress(UploadProgress::uploading(&file.name, 100));
        progress(UploadProgress::processing(&file.name, 50));

        if let Some(ref message) = self.failure {
            return Err(ImportError::Commit(message.clone()));
        }

        let total = file
            .text()
            .map(|text| {
                text.lines()
                    .filter(|l| !l.trim().is_empty())
                    .count()
                    .saturating_sub(1)
            })
            .unwrap_or(0);

        if self.reject {
            return Ok(CommitOutcome::rejected(total));
        }

        if !self.defer_completion {
            progress(UploadProgress::completed(&file.name, total, total));
        }
        Ok(CommitOutcome::succeeded(total, total))
    }
}

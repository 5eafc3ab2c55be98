//! Commit collaborator trait.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::SelectedFile;

use super::progress::UploadProgress;

/// Result of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitOutcome {
    pub success: bool,
    /// Leads stored by the commit.
    pub leads_added: usize,
    /// Rows the committer considered.
    pub total_leads: usize,
}

impl CommitOutcome {
    /// A successful commit.
    pub fn succeeded(total_leads: usize, leads_added: usize) -> Self {
        Self {
            success: true,
            leads_added,
            total_leads,
        }
    }

    /// A commit that ran but stored nothing.
    pub fn rejected(total_leads: usize) -> Self {
        Self {
            success: false,
            leads_added: 0,
            total_leads,
        }
    }
}

/// Stores the leads of an uploaded file.
///
/// The committer receives the original file, not a reconstruction from the
/// preview mapping, and does its own parsing. Progress snapshots are passed
/// to `progress` while the call is running.
pub trait LeadCommitter {
    /// Commit `file`, reporting progress along the way.
    fn commit(
        &self,
        file: &SelectedFile,
        progress: &mut dyn FnMut(UploadProgress),
    ) -> Result<CommitOutcome>;
}

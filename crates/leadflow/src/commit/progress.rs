//! Upload progress reported by a committer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stage of a commit in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Processing,
    Completed,
    Error,
}

impl UploadStatus {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            UploadStatus::Uploading => "Uploading",
            UploadStatus::Processing => "Processing",
            UploadStatus::Completed => "Completed",
            UploadStatus::Error => "Error",
        }
    }

    /// Whether the commit is still running.
    pub fn is_active(&self) -> bool {
        matches!(self, UploadStatus::Uploading | UploadStatus::Processing)
    }

    /// Whether the commit has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Position in `uploading → processing → completed | error`.
    pub fn phase(&self) -> u8 {
        match self {
            UploadStatus::Uploading => 0,
            UploadStatus::Processing => 1,
            UploadStatus::Completed | UploadStatus::Error => 2,
        }
    }
}

/// Snapshot of commit progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadProgress {
    pub file_name: String,
    pub status: UploadStatus,
    /// Percentage, 0 to 100.
    pub progress: u8,
    pub total_leads: usize,
    pub valid_leads: usize,
    /// Failure description when `status` is `Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl UploadProgress {
    fn with_status(file_name: impl Into<String>, status: UploadStatus, progress: u8) -> Self {
        Self {
            file_name: file_name.into(),
            status,
            progress: progress.min(100),
            total_leads: 0,
            valid_leads: 0,
            error: None,
            updated_at: Utc::now(),
        }
    }

    /// File is being transferred.
    pub fn uploading(file_name: impl Into<String>, progress: u8) -> Self {
        Self::with_status(file_name, UploadStatus::Uploading, progress)
    }

    /// File has been received and is being processed.
    pub fn processing(file_name: impl Into<String>, progress: u8) -> Self {
        Self::with_status(file_name, UploadStatus::Processing, progress)
    }

    /// Commit finished.
    pub fn completed(file_name: impl Into<String>, total_leads: usize, valid_leads: usize) -> Self {
        Self {
            total_leads,
            valid_leads,
            ..Self::with_status(file_name, UploadStatus::Completed, 100)
        }
    }

    /// Commit failed.
    pub fn failed(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::with_status(file_name, UploadStatus::Error, 0)
        }
    }
}

//! Commit collaborator: the seam to whatever actually stores leads.

mod committer;
mod csv_file;
mod mock;
mod progress;

pub use committer::{CommitOutcome, LeadCommitter};
pub use csv_file::CsvFileCommitter;
pub use mock::MockCommitter;
pub use progress::{UploadProgress, UploadStatus};

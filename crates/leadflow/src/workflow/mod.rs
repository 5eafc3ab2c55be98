//! Interactive import workflow: select file, map columns, review, commit.

mod machine;
mod session;
mod stage;

pub use machine::{ColumnChoice, ImportWorkflow};
pub use session::ImportSession;
pub use stage::ImportStage;

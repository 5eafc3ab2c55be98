//! Workflow stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stage of an import, in forward order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStage {
    /// Choosing a file.
    #[default]
    Upload,
    /// Assigning source columns to canonical fields.
    Mapping,
    /// Reviewing the validation report.
    Validation,
    /// Commit running or finished.
    Progress,
}

impl ImportStage {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ImportStage::Upload => "Upload",
            ImportStage::Mapping => "Map Columns",
            ImportStage::Validation => "Review",
            ImportStage::Progress => "Import",
        }
    }

    /// The stage `back()` returns to, if any.
    pub fn previous(&self) -> Option<ImportStage> {
        match self {
            ImportStage::Upload | ImportStage::Progress => None,
            ImportStage::Mapping => Some(ImportStage::Upload),
            ImportStage::Validation => Some(ImportStage::Mapping),
        }
    }

    /// Whether the workflow may move back from this stage to `target`.
    pub fn can_go_back_to(&self, target: ImportStage) -> bool {
        *self != ImportStage::Progress && target < *self
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportStage::Upload => "upload",
            ImportStage::Mapping => "mapping",
            ImportStage::Validation => "validation",
            ImportStage::Progress => "progress",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert!(ImportStage::Upload < ImportStage::Mapping);
        assert!(ImportStage::Mapping < ImportStage::Validation);
        assert!(ImportStage::Validation < ImportStage::Progress);
    }

    #[test]
    fn test_backward_transitions() {
        assert!(ImportStage::Validation.can_go_back_to(ImportStage::Upload));
        assert!(ImportStage::Validation.can_go_back_to(ImportStage::Mapping));
        assert!(!ImportStage::Mapping.can_go_back_to(ImportStage::Validation));
        assert!(!ImportStage::Upload.can_go_back_to(ImportStage::Upload));
        assert!(!ImportStage::Progress.can_go_back_to(ImportStage::Validation));
        assert_eq!(ImportStage::Progress.previous(), None);
    }
}

//! Configuration for the import pipeline.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

/// Number of data rows read for preview when not configured.
pub const DEFAULT_SAMPLE_WINDOW: usize = 5;

/// Preview parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Maximum data rows sampled after the header.
    pub sample_window: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            sample_window: DEFAULT_SAMPLE_WINDOW,
        }
    }
}

/// Tuning for the validator's row estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Share of rows (percent, rounded up) reported invalid when the mapping
    /// has blocking errors.
    pub invalid_row_percent: u32,
    /// Share of rows (percent, rounded down) reported as likely duplicates.
    pub duplicate_row_percent: u32,
    /// Minimum digit count for a phone number once separators are removed.
    pub min_phone_length: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            invalid_row_percent: 5,
            duplicate_row_percent: 2,
            min_phone_length: 7,
        }
    }
}

/// Top-level configuration for an import workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Preview parser configuration.
    pub preview: PreviewConfig,
    /// Validator configuration.
    pub validator: ValidatorConfig,
    /// File extensions accepted at selection time (without the dot).
    pub accepted_extensions: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            preview: PreviewConfig::default(),
            validator: ValidatorConfig::default(),
            accepted_extensions: vec!["csv".to_string(), "xls".to_string()],
        }
    }
}

impl ImportConfig {
    /// Load configuration from a JSON file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| ImportError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ImportConfig = serde_json::from_reader(BufReader::new(file))?;
        config.check()?;

        tracing::debug!(path = %path.display(), "loaded import configuration");
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn check(&self) -> Result<()> {
        if self.preview.sample_window == 0 {
            return Err(ImportError::Config(
                "preview.sample_window must be at least 1".to_string(),
            ));
        }
        if self.validator.invalid_row_percent > 100 || self.validator.duplicate_row_percent > 100 {
            return Err(ImportError::Config(
                "validator percentages must be between 0 and 100".to_string(),
            ));
        }
        if self.accepted_extensions.is_empty() {
            return Err(ImportError::Config(
                "accepted_extensions must list at least one extension".to_string(),
            ));
        }
        Ok(())
    }

    /// Comma-separated list of accepted extensions for messages.
    pub fn extension_list(&self) -> String {
        self.accepted_extensions
            .iter()
            .map(|e| format!(".{}", e))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

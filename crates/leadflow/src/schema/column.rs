//! Column definition derived from a parsed preview.

use serde::{Deserialize, Serialize};

/// A column detected in the header row of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Zero-based position in the header row.
    pub index: usize,
    /// Header text after trimming and quote stripping.
    pub header: String,
    /// Non-empty cells from the sample window, in row order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_values: Vec<String>,
}

impl Column {
    /// Create a column with no sample values.
    pub fn new(index: usize, header: impl Into<String>) -> Self {
        Self {
            index,
            header: header.into(),
            sample_values: Vec::new(),
        }
    }

    /// Set the sample values.
    pub fn with_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sample_values = samples.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the sample window produced any values for this column.
    pub fn has_samples(&self) -> bool {
        !self.sample_values.is_empty()
    }
}

//! Preview parser for comma-separated lead files.
//!
//! Reads the header row plus a bounded sample window. Cells are split on a
//! plain comma: quoted commas and multi-line fields are not supported.

use serde::{Deserialize, Serialize};

use crate::config::PreviewConfig;
use crate::schema::Column;

/// Result of parsing a file preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewTable {
    /// Columns from the header row with their sample values.
    pub columns: Vec<Column>,
    /// Number of data rows (non-blank lines after the header).
    pub row_count: usize,
}

impl PreviewTable {
    /// Whether the input had no header row at all.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a column by its exact header.
    pub fn column(&self, header: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.header == header)
    }

    /// Header texts in column order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.header.as_str())
    }
}

/// Parses the header and sample window of delimited text.
#[derive(Debug, Clone, Default)]
pub struct PreviewParser {
    config: PreviewConfig,
}

impl PreviewParser {
    /// Create a parser with the default sample window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: PreviewConfig) -> Self {
        Self { config }
    }

    /// Parse raw text into columns and a row count. Never fails.
    pub fn parse(&self, raw: &str) -> PreviewTable {
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
        let lines: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();

        let Some((header_line, data_lines)) = lines.split_first() else {
            return PreviewTable::default();
        };

        let sample_rows: Vec<Vec<String>> = data_lines
            .iter()
            .take(self.config.sample_window)
            .map(|line| split_cells(line))
            .collect();

        let columns = split_cells(header_line)
            .into_iter()
            .enumerate()
            .map(|(index, header)| {
                let samples = sample_rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .filter(|cell| !cell.is_empty())
                    .cloned();
                Column::new(index, header).with_samples(samples)
            })
            .collect();

        PreviewTable {
            columns,
            row_count: data_lines.len(),
        }
    }
}

/// Parse with the default configuration.
pub fn parse_preview(raw: &str) -> PreviewTable {
    PreviewParser::new().parse(raw)
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(clean_cell).collect()
}

/// Trim, then strip one leading and one trailing quote character.
pub(crate) fn clean_cell(cell: &str) -> String {
    let cell = cell.trim();
    let cell = cell.strip_prefix(['"', '\'']).unwrap_or(cell);
    let cell = cell.strip_suffix(['"', '\'']).unwrap_or(cell);
    cell.to_string()
}

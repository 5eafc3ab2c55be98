//! Files selected for import.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ImportError, Result};

/// Broad kind of a selected file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Comma-separated text; eligible for mapping and validation.
    Csv,
    /// Legacy spreadsheet; committed as-is.
    Xls,
    /// Anything else.
    Other,
}

impl FileKind {
    /// Classify a file name by extension, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        match extension_of(name).map(|e| e.to_ascii_lowercase()).as_deref() {
            Some("csv") => FileKind::Csv,
            Some("xls") => FileKind::Xls,
            _ => FileKind::Other,
        }
    }

    /// Whether column mapping and validation apply to this kind.
    pub fn supports_mapping(&self) -> bool {
        matches!(self, FileKind::Csv)
    }
}

/// A file chosen by the user, held in memory for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as presented by the host (no directory).
    pub name: String,
    /// Raw contents.
    pub contents: Vec<u8>,
}

impl SelectedFile {
    /// Create a file from a name and its raw bytes.
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Read a file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| ImportError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self { name, contents })
    }

    /// Kind derived from the file name.
    pub fn kind(&self) -> FileKind {
        FileKind::from_name(&self.name)
    }

    /// Whether the extension is one of `accepted` (case-insensitive).
    pub fn has_extension_in(&self, accepted: &[String]) -> bool {
        match extension_of(&self.name) {
            Some(ext) => accepted.iter().any(|a| a.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }

    /// Contents as UTF-8 text, without a leading byte order mark.
    pub fn text(&self) -> Result<&str> {
        let text = std::str::from_utf8(&self.contents).map_err(|e| ImportError::Encoding {
            file_name: self.name.clone(),
            source: e,
        })?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
    }

    /// Size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.contents.len()
    }

    /// SHA-256 of the contents, prefixed with the algorithm name.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.contents);
        format!("sha256:{:x}", hasher.finalize())
    }
}

/// Text after the last dot. A bare `.csv` counts as a `csv` file.
fn extension_of(name: &str) -> Option<&str> {
    let (_, ext) = name.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}

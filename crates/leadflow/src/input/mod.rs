//! Input handling: selected files and the tabular preview parser.

mod file;
mod preview;

pub use file::{FileKind, SelectedFile};
pub use preview::{PreviewParser, PreviewTable, parse_preview};
pub(crate) use preview::clean_cell;

//! propshift parser
//!
//! Source-level scanning over whole JSX/TSX files: locating the open and
//! closing tags of a component, bounding each open tag's attribute span, and
//! finding the import statements the migrator edits. Nothing here builds a
//! tree; each scanner hands back byte ranges into the original text.

pub mod imports;
pub mod position;
pub mod tags;

pub use imports::{find_named_import, import_sites, ImportSite, NamedImport};
pub use position::{line_col, LineIndex, Position};
pub use tags::{find_closing_tags, OpenTag, TagScanner};

/// An open tag whose closing `>` could not be found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Tag boundary error at line {line}, column {column}: {message}")]
pub struct BoundaryError {
    pub message: String,
    /// Byte offset of the tag's `<`.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

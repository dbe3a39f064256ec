//! propshift rewrite engine
//!
//! Migrates usages of one component vocabulary to another inside JSX/TSX
//! source while leaving every byte it does not mean to change untouched.
//!
//! ```text
//! source → TagScanner → AttributeList → prop renames + color mapping
//!        → serialize → substituted back with paired closing tags → import edits
//! ```
//!
//! Nothing in this crate fails: values that cannot be resolved statically and
//! tags that cannot be bounded are reported as [`Issue`]s and left as they are.

pub mod colors;
pub mod config;
pub mod imports;
pub mod mapper;
pub mod migrate;
pub mod occurrences;
pub mod origin;

use std::fmt;

pub use colors::{ColorMapping, Resolution, StyledScheme, DEFAULT_COLORS};
pub use config::{ComponentRule, ConfigError, ImportRule, MigrationConfig, WalkConfig};
pub use imports::{ensure_named_import, remove_named_import};
pub use mapper::map_color_attributes;
pub use migrate::{migrate_source, MigrationOutcome};
pub use occurrences::{rewrite_all_occurrences, Rewrite};
pub use origin::{Origin, Splice};

/// Where in which file something happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// An attribute value is an expression and could not be mapped.
    UnresolvedValue,
    /// An open tag has no closing `>`; the occurrence was skipped.
    MalformedTag,
    /// A legacy import was kept because the name is still used.
    StillReferenced,
}

/// A non-fatal note that something needs manual review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: IssueKind,
    pub location: Location,
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// A changed region of a file, for previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// 1-based line where the region starts.
    pub line: usize,
    pub before: String,
    pub after: String,
}

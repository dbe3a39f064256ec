//! Per-file migration.

use std::path::{Path, PathBuf};

use propshift_rewrite::{migrate_source, MigrationConfig, MigrationOutcome};
use rayon::prelude::*;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What happened to one input file.
#[derive(Debug)]
pub struct FileReport {
    /// Input path relative to the run's root, used in issue locations.
    pub label: String,
    pub result: Result<MigrationOutcome, FileError>,
}

/// Migrate one file, writing it back only if `write` is set and the text
/// changed.
pub fn process_file(
    path: &Path,
    label: &str,
    config: &MigrationConfig,
    write: bool,
) -> Result<MigrationOutcome, FileError> {
    let source = std::fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = migrate_source(&source, label, config);

    if outcome.changed && write {
        std::fs::write(path, &outcome.text).map_err(|source| FileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(file = label, occurrences = outcome.occurrences, "migrated");
    }

    Ok(outcome)
}

/// Migrate every file in parallel. Reports come back in input order.
pub fn process_all(
    paths: &[PathBuf],
    root: &Path,
    config: &MigrationConfig,
    write: bool,
) -> Vec<FileReport> {
    paths
        .par_iter()
        .map(|path| {
            let label = label_for(path, root);
            let result = process_file(path, &label, config, write);
            FileReport { label, result }
        })
        .collect()
}

fn label_for(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    const LEGACY: &str = "import { CButton } from '@coreui/react'\n\nexport const A = () => <CButton color=\"danger\">x</CButton>\n";
    const MIGRATED: &str = "import { Button } from '@chakra-ui/react'\n\nexport const A = () => <Button colorScheme=\"red\">x</Button>\n";

    #[test]
    fn test_writes_changed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jsx");
        fs::write(&path, LEGACY).unwrap();

        let outcome = process_file(&path, "a.jsx", &MigrationConfig::default(), true).unwrap();
        assert!(outcome.changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), MIGRATED);
    }

    #[test]
    fn test_dry_run_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jsx");
        fs::write(&path, LEGACY).unwrap();

        let outcome = process_file(&path, "a.jsx", &MigrationConfig::default(), false).unwrap();
        assert_eq!(outcome.text, MIGRATED);
        assert_eq!(fs::read_to_string(&path).unwrap(), LEGACY);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = process_file(&dir.path().join("nope.jsx"), "nope.jsx", &MigrationConfig::default(), true)
            .unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
    }

    #[test]
    fn test_process_all_keeps_order_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = ["c.jsx", "a.jsx", "b.jsx"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                fs::write(&path, LEGACY).unwrap();
                path
            })
            .collect();

        let reports = process_all(&paths, dir.path(), &MigrationConfig::default(), false);
        let labels: Vec<_> = reports.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["c.jsx", "a.jsx", "b.jsx"]);
        assert!(reports.iter().all(|r| r.result.as_ref().is_ok_and(|o| o.changed)));
    }
}

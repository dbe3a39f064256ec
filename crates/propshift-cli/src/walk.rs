//! Source file discovery.

use std::path::{Path, PathBuf};

use propshift_rewrite::WalkConfig;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Every file under `root` with a configured extension, in a stable order.
///
/// Hidden directories and `exclude_dirs` are not descended into. The root
/// itself is always walked, even when its name would be skipped.
pub fn collect_files(root: &Path, walk: &WalkConfig) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry, walk))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && walk.matches_extension(entry.path()))
        .map(DirEntry::into_path)
        .collect()
}

fn is_skipped_dir(entry: &DirEntry, walk: &WalkConfig) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || walk.exclude_dirs.iter().any(|d| *d == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_collects_matching_extensions_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/b.tsx");
        touch(dir.path(), "src/a.jsx");
        touch(dir.path(), "src/styles.css");
        touch(dir.path(), "index.js");

        let files: Vec<_> = collect_files(dir.path(), &WalkConfig::default())
            .into_iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("index.js"),
                PathBuf::from("src/a.jsx"),
                PathBuf::from("src/b.tsx"),
            ]
        );
    }

    #[test]
    fn test_skips_excluded_and_hidden_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "node_modules/lib/index.js");
        touch(dir.path(), ".git/hooks/x.js");
        touch(dir.path(), "app/node_modules/y.js");
        touch(dir.path(), "app/main.ts");

        let files = collect_files(dir.path(), &WalkConfig::default());
        assert_eq!(files, vec![dir.path().join("app/main.ts")]);
    }

    #[test]
    fn test_hidden_root_is_still_walked() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".work/a.jsx");

        let files = collect_files(&dir.path().join(".work"), &WalkConfig::default());
        assert_eq!(files, vec![dir.path().join(".work/a.jsx")]);
    }
}

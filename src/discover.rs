//! Discover .go files under a directory tree.
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::ExtractError;

/// Directories the Go toolchain itself ignores when building packages.
const SKIPPED_DIRS: &[&str] = &["vendor", "testdata"];

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('_') || SKIPPED_DIRS.contains(&name.as_ref())
}

/// Discover all .go files below `root`, skipping dirs the go tool ignores.
///
/// A `root` that is itself a .go file is returned as the only entry.
pub fn discover_go_files(root: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
    {
        let entry = entry.map_err(|source| ExtractError::Discover {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "go") {
                files.push(path.to_path_buf());
            }
        }
    }

    // Sort for deterministic ordering
    files.sort();
    tracing::debug!(root = %root.display(), files = files.len(), "discovered go files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "package p\n").unwrap();
    }

    #[test]
    fn test_discovers_sorted_go_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.go");
        touch(dir.path(), "a.go");
        touch(dir.path(), "pkg/c.go");
        touch(dir.path(), "README.md");

        let files = discover_go_files(dir.path()).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(rel, vec!["a.go", "b.go", "pkg/c.go"]);
    }

    #[test]
    fn test_skips_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "main.go");
        touch(dir.path(), "vendor/dep/dep.go");
        touch(dir.path(), "testdata/bad.go");
        touch(dir.path(), ".git/x.go");
        touch(dir.path(), "_scratch/y.go");

        let files = discover_go_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("main.go")]);
    }

    #[test]
    fn test_single_file_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "only.go");
        let root = dir.path().join("only.go");
        assert_eq!(discover_go_files(&root).unwrap(), vec![root]);
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_go_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ExtractError::Discover { .. }));
    }
}

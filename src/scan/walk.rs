// src/scan/walk.rs
// =============================================================================
// Recursive directory traversal.
//
// How it works:
// 1. Walk the root with walkdir, entries sorted by file name
// 2. Keep every non-directory entry whose extension is exactly "md"
// 3. Stop at the first unreadable entry: without a full listing we can't
//    promise every document gets processed, so the whole run is aborted
//
// Sorting makes the order deterministic for a given filesystem state.
// =============================================================================

use crate::error::ScanError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Posts live here, relative to the project root.
pub const POSTS_DIR: &str = "source/_posts";

/// Documents must carry this extension (case-sensitive).
const DOCUMENT_EXTENSION: &str = "md";

// Collects the paths of all markdown documents under `root`
//
// Returns: paths in traversal order (parents before children, siblings
// sorted by name), or the first traversal error
pub fn find_documents(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| ScanError {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        if is_document(entry.path()) {
            documents.push(entry.into_path());
        }
    }

    Ok(documents)
}

fn is_document(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(DOCUMENT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_finds_nested_markdown_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("2023/travel")).unwrap();
        fs::write(root.join("b.md"), "b").unwrap();
        fs::write(root.join("a.md"), "a").unwrap();
        fs::write(root.join("2023/travel/c.md"), "c").unwrap();
        fs::write(root.join("notes.txt"), "skip").unwrap();

        let found = find_documents(root).unwrap();
        let expected = vec![
            root.join("2023/travel/c.md"),
            root.join("a.md"),
            root.join("b.md"),
        ];
        assert_eq!(found, expected);
    }

    #[test]
    fn test_extension_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("upper.MD"), "x").unwrap();
        fs::write(dir.path().join("lower.md"), "x").unwrap();

        let found = find_documents(dir.path()).unwrap();
        assert_eq!(found, vec![dir.path().join("lower.md")]);
    }

    #[test]
    fn test_skips_directories_named_like_documents() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("folder.md")).unwrap();

        let found = find_documents(dir.path()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("source/_posts");

        let err = find_documents(&missing).unwrap_err();
        assert_eq!(err.path, missing);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_aborts() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("b-locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("hidden.md"), "x").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join("c.md"), "c").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root can list any directory
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            println!("SKIP - directory permissions are not enforced for this user");
            return;
        }

        let result = find_documents(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert_eq!(err.path, locked);
    }
}

// crates/engine/src/path_security.rs
//! Sweep root validation.
//!
//! The sweeper deletes whatever qualifies beneath its root, so the root is
//! checked before the walk starts:
//!
//! - **Symlinks**: a linked root could redirect the sweep anywhere
//! - **Filesystem roots**: `/` or a bare drive is never a temp area
//! - **Excessive depth**: very deep paths are rejected outright
//!
//! # Example
//!
//! ```rust,ignore
//! use tempsweep_engine::path_security::sanitize_root;
//!
//! let root = sanitize_root(&std::env::temp_dir())?;
//! println!("sweeping {}", root.display());
//! ```

use std::path::{Component, Path, PathBuf};

use crate::error::{EngineError, Result};

/// Roots with more normal components than this are rejected.
pub const MAX_ROOT_DEPTH: usize = 256;

/// Validates a sweep root and returns its canonical form, which is what
/// gets swept.
///
/// # Errors
///
/// Returns an error if:
/// - The path contains null bytes
/// - The path exceeds the maximum depth
/// - The path does not exist or cannot be inspected
/// - The path is a symbolic link, or is not a directory
/// - The resolved path is a filesystem root
pub fn sanitize_root(path: &Path) -> Result<PathBuf> {
    if path.to_string_lossy().contains('\0') {
        return Err(EngineError::unsafe_root(path, "path contains null bytes"));
    }

    let depth = count_path_depth(path);
    if depth > MAX_ROOT_DEPTH {
        return Err(EngineError::unsafe_root(
            path,
            format!("path exceeds maximum depth of {MAX_ROOT_DEPTH} (found {depth})"),
        ));
    }

    let meta = std::fs::symlink_metadata(path).map_err(|source| EngineError::RootInspect {
        path: path.to_path_buf(),
        source,
    })?;
    if meta.file_type().is_symlink() {
        return Err(EngineError::unsafe_root(path, "symbolic links are not allowed"));
    }
    if !meta.is_dir() {
        return Err(EngineError::unsafe_root(path, "not a directory"));
    }

    let canonical = path.canonicalize().map_err(|source| EngineError::RootInspect {
        path: path.to_path_buf(),
        source,
    })?;
    if is_filesystem_root(&canonical) {
        return Err(EngineError::unsafe_root(path, "refusing to sweep a filesystem root"));
    }

    Ok(canonical)
}

fn is_filesystem_root(path: &Path) -> bool {
    !path.components().any(|c| matches!(c, Component::Normal(_)))
}

fn count_path_depth(path: &Path) -> usize {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn accepts_a_plain_directory() {
        let temp = TempDir::new().unwrap();
        let root = sanitize_root(temp.path()).unwrap();
        assert_eq!(root, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn rejects_null_bytes() {
        let err = sanitize_root(Path::new("tmp\0dir")).unwrap_err();
        assert!(err.to_string().contains("null bytes"));
    }

    #[test]
    fn rejects_excessive_depth() {
        let deep = (0..=MAX_ROOT_DEPTH).map(|_| "a").collect::<Vec<_>>().join("/");
        let err = sanitize_root(Path::new(&deep)).unwrap_err();
        assert!(err.to_string().contains("maximum depth"));
    }

    #[test]
    fn rejects_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = sanitize_root(&temp.path().join("gone")).unwrap_err();
        assert!(matches!(err, EngineError::RootInspect { .. }));
    }

    #[test]
    fn rejects_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f.txt");
        fs::write(&file, "x").unwrap();
        let err = sanitize_root(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_filesystem_root() {
        let err = sanitize_root(Path::new("/")).unwrap_err();
        assert!(err.to_string().contains("filesystem root"));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_symlinked_root() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let target = temp.path().join("target");
        let link = temp.path().join("link");
        fs::create_dir(&target).unwrap();
        symlink(&target, &link).unwrap();

        let err = sanitize_root(&link).unwrap_err();
        assert!(err.to_string().contains("symbolic links"));
    }

    #[test]
    fn depth_counts_only_normal_components() {
        assert_eq!(count_path_depth(Path::new("/a/./b/../c")), 3);
    }
}

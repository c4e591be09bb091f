// crates/engine/src/filesystem.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::entry::{EntryKind, EntryTimes};

/// An immediate child found while listing a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Child {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Child {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Port for the filesystem operations a sweep needs.
///
/// Every call goes to the live filesystem; implementations must not cache
/// listings between calls.
pub trait FileSystem {
    /// Lists the immediate children of `dir`, fully materialized.
    fn list(&self, dir: &Path) -> io::Result<Vec<Child>>;

    /// Reads creation, access and modification times without following links.
    fn timestamps(&self, path: &Path) -> io::Result<EntryTimes>;

    /// Whether `dir` currently has no children.
    fn is_empty_dir(&self, dir: &Path) -> io::Result<bool>;

    /// Removes a single file or an empty directory. Never recursive.
    fn remove(&self, path: &Path, kind: EntryKind) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list(&self, dir: &Path) -> io::Result<Vec<Child>> {
        fs::read_dir(dir)?
            .map(|entry| {
                let entry = entry?;
                // file_type() does not traverse symlinks, so a link to a
                // directory is removed as a link rather than descended into.
                let kind = match entry.file_type() {
                    Ok(ft) if ft.is_dir() => EntryKind::Directory,
                    _ => EntryKind::File,
                };
                Ok(Child::new(entry.path(), kind))
            })
            .collect()
    }

    fn timestamps(&self, path: &Path) -> io::Result<EntryTimes> {
        let meta = fs::symlink_metadata(path)?;
        let created = match meta.created() {
            Ok(t) => DateTime::<Utc>::from(t),
            Err(err) => status_change_time(&meta).ok_or(err)?,
        };
        Ok(EntryTimes {
            created,
            accessed: meta.accessed()?.into(),
            modified: meta.modified()?.into(),
        })
    }

    fn is_empty_dir(&self, dir: &Path) -> io::Result<bool> {
        // An unreadable child still counts as a child.
        Ok(fs::read_dir(dir)?.next().is_none())
    }

    fn remove(&self, path: &Path, kind: EntryKind) -> io::Result<()> {
        match kind {
            EntryKind::File => remove_file_or_link(path),
            EntryKind::Directory => fs::remove_dir(path),
        }
    }
}

// Windows directory symlinks and junctions are removed as directories. The
// link goes, its target is untouched.
#[cfg(windows)]
fn remove_file_or_link(path: &Path) -> io::Result<()> {
    use std::os::windows::fs::FileTypeExt;

    let file_type = fs::symlink_metadata(path)?.file_type();
    if file_type.is_symlink_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(not(windows))]
fn remove_file_or_link(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

/// Stand-in for birth time on filesystems that do not record one.
///
/// `ctime` can never be earlier than the birth time, so substituting it only
/// makes the eligibility test stricter.
#[cfg(unix)]
fn status_change_time(meta: &fs::Metadata) -> Option<DateTime<Utc>> {
    use std::os::unix::fs::MetadataExt;

    let nanos = u32::try_from(meta.ctime_nsec()).ok()?;
    DateTime::<Utc>::from_timestamp(meta.ctime(), nanos)
}

#[cfg(not(unix))]
fn status_change_time(_meta: &fs::Metadata) -> Option<DateTime<Utc>> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn lists_files_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("a.txt")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let mut children = OsFileSystem.list(dir.path()).unwrap();
        children.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(
            children,
            vec![
                Child::new(dir.path().join("a.txt"), EntryKind::File),
                Child::new(dir.path().join("sub"), EntryKind::Directory),
            ]
        );
    }

    #[test]
    fn listing_a_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(OsFileSystem.list(&dir.path().join("gone")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_listed_as_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(target.path(), dir.path().join("link")).unwrap();

        let children = OsFileSystem.list(dir.path()).unwrap();
        assert_eq!(children, vec![Child::new(dir.path().join("link"), EntryKind::File)]);
    }

    #[test]
    fn reads_all_three_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        File::create(&path).unwrap();

        let before = Utc::now() - chrono::Duration::minutes(5);
        let times = OsFileSystem.timestamps(&path).unwrap();
        assert!(times.created > before);
        assert!(times.accessed > before);
        assert!(times.modified > before);
    }

    #[test]
    fn emptiness_reflects_current_contents() {
        let dir = tempfile::tempdir().unwrap();
        assert!(OsFileSystem.is_empty_dir(dir.path()).unwrap());
        File::create(dir.path().join("a.txt")).unwrap();
        assert!(!OsFileSystem.is_empty_dir(dir.path()).unwrap());
    }

    #[test]
    fn refuses_to_remove_a_populated_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        File::create(sub.join("a.txt")).unwrap();

        assert!(OsFileSystem.remove(&sub, EntryKind::Directory).is_err());
        assert!(sub.exists());
    }

    #[cfg(unix)]
    #[test]
    fn removing_a_directory_link_keeps_its_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        File::create(target.path().join("keep.txt")).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(target.path(), &link).unwrap();

        OsFileSystem.remove(&link, EntryKind::File).unwrap();

        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.path().join("keep.txt").exists());
    }

    #[cfg(windows)]
    #[test]
    fn removing_a_directory_link_keeps_its_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        File::create(target.path().join("keep.txt")).unwrap();
        let link = dir.path().join("link");
        // Creating symlinks needs developer mode or elevation.
        if std::os::windows::fs::symlink_dir(target.path(), &link).is_err() {
            return;
        }

        OsFileSystem.remove(&link, EntryKind::File).unwrap();

        assert!(fs::symlink_metadata(&link).is_err());
        assert!(target.path().join("keep.txt").exists());
    }
}

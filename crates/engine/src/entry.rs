// crates/engine/src/entry.rs
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Tag used by the journal.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::Directory => "FOLDER",
        }
    }
}

/// One of the three timestamps every entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeAxis {
    Created,
    Accessed,
    Modified,
}

impl fmt::Display for TimeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Accessed => "accessed",
            Self::Modified => "modified",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTimes {
    pub created: DateTime<Utc>,
    pub accessed: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl EntryTimes {
    /// All three axes set to the same instant.
    #[must_use]
    pub const fn uniform(at: DateTime<Utc>) -> Self {
        Self {
            created: at,
            accessed: at,
            modified: at,
        }
    }

    /// Axes in the order they are checked.
    #[must_use]
    pub const fn axes(&self) -> [(TimeAxis, DateTime<Utc>); 3] {
        [
            (TimeAxis::Created, self.created),
            (TimeAxis::Accessed, self.accessed),
            (TimeAxis::Modified, self.modified),
        ]
    }
}

/// A file or directory as observed when its parent was enumerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub times: EntryTimes,
}

impl FileSystemEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, times: EntryTimes) -> Self {
        Self {
            path: path.into(),
            kind,
            times,
        }
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

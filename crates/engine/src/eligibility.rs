// crates/engine/src/eligibility.rs
//! The deletion-safety predicate.
//!
//! An entry may be deleted only when every one of its timestamps predates the
//! boot instant and, for a directory, it has no children left at the moment
//! of the decision.

use std::fmt;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::boot::BootInstant;
use crate::entry::{EntryTimes, FileSystemEntry, TimeAxis};

/// Why an entry was left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "axis")]
pub enum Ineligibility {
    /// The given timestamp is at or after the boot instant.
    TouchedAfterBoot(TimeAxis),
    /// The directory still has children.
    NotEmpty,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TouchedAfterBoot(axis) => write!(f, "{axis} after boot"),
            Self::NotEmpty => f.write_str("directory not empty"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Eligible,
    Ineligible(Ineligibility),
}

impl Verdict {
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }
}

/// Returns the first axis that does not strictly predate `boot`.
#[must_use]
pub fn first_post_boot_axis(times: &EntryTimes, boot: BootInstant) -> Option<TimeAxis> {
    times
        .axes()
        .into_iter()
        .find(|(_, at)| !boot.predates(*at))
        .map(|(axis, _)| axis)
}

/// Decides whether `entry` may be deleted.
///
/// `is_empty` is only consulted for directories whose timestamps already
/// qualify, and it is called at decision time so the answer reflects any
/// children removed (or left behind) earlier in the walk.
///
/// # Errors
///
/// Propagates the error from `is_empty` when the directory cannot be read.
pub fn can_delete<F>(entry: &FileSystemEntry, boot: BootInstant, is_empty: F) -> io::Result<Verdict>
where
    F: FnOnce(&Path) -> io::Result<bool>,
{
    if let Some(axis) = first_post_boot_axis(&entry.times, boot) {
        return Ok(Verdict::Ineligible(Ineligibility::TouchedAfterBoot(axis)));
    }
    if entry.is_dir() && !is_empty(&entry.path)? {
        return Ok(Verdict::Ineligible(Ineligibility::NotEmpty));
    }
    Ok(Verdict::Eligible)
}

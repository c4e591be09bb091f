// crates/engine/src/sweeper.rs
//! Post-order traversal and deletion.
//!
//! Every directory's children reach a terminal state before the directory
//! itself is evaluated, so a directory whose children were all removed is
//! seen as empty, and one that kept a child is seen as populated. Failures are
//! reported per entry and never abort the walk.

use std::path::Path;

use log::{debug, trace, warn};

use crate::boot::BootInstant;
use crate::eligibility::{Verdict, can_delete};
use crate::entry::{EntryKind, FileSystemEntry};
use crate::filesystem::{Child, FileSystem};
use crate::outcome::{Outcome, OutcomeSink, Report};

/// How many directory levels below the root the sweep descends by default.
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub struct Sweeper<'a, F: ?Sized, S: ?Sized> {
    fs: &'a F,
    boot: BootInstant,
    sink: &'a mut S,
    max_depth: usize,
}

impl<'a, F, S> Sweeper<'a, F, S>
where
    F: FileSystem + ?Sized,
    S: OutcomeSink + ?Sized,
{
    pub fn new(fs: &'a F, boot: BootInstant, sink: &'a mut S) -> Self {
        Self {
            fs,
            boot,
            sink,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sweeps the contents of `root`. The root itself is never deleted.
    pub fn clean(&mut self, root: &Path) {
        self.sweep_dir(root, 0);
    }

    /// Returns `false` when `dir` could not be enumerated. That failure is
    /// the directory's terminal report.
    fn sweep_dir(&mut self, dir: &Path, depth: usize) -> bool {
        let children = match self.fs.list(dir) {
            Ok(children) => children,
            Err(err) => {
                self.report(EntryKind::Directory, dir, Outcome::error(&err));
                return false;
            }
        };
        for child in children {
            self.visit(child, depth + 1);
        }
        true
    }

    fn visit(&mut self, child: Child, depth: usize) {
        // Captured before descending: removing children bumps a directory's
        // modified time and listing it may bump its access time.
        let times = match self.fs.timestamps(&child.path) {
            Ok(times) => times,
            Err(err) => {
                self.report(child.kind, &child.path, Outcome::error(&err));
                return;
            }
        };

        if child.kind == EntryKind::Directory {
            if depth > self.max_depth {
                let reason = format!("maximum depth of {} exceeded", self.max_depth);
                self.report(child.kind, &child.path, Outcome::SkippedError(reason));
                return;
            }
            if !self.sweep_dir(&child.path, depth) {
                return;
            }
        }

        let entry = FileSystemEntry::new(child.path, child.kind, times);
        let outcome = self.decide(&entry);
        self.report(entry.kind, &entry.path, outcome);
    }

    fn decide(&self, entry: &FileSystemEntry) -> Outcome {
        let fs = self.fs;
        match can_delete(entry, self.boot, |dir| fs.is_empty_dir(dir)) {
            Ok(Verdict::Eligible) => match fs.remove(&entry.path, entry.kind) {
                Ok(()) => Outcome::Deleted,
                // Most likely in use by another process. Leave it be.
                Err(err) => Outcome::error(&err),
            },
            Ok(Verdict::Ineligible(why)) => Outcome::SkippedIneligible(why),
            Err(err) => Outcome::error(&err),
        }
    }

    fn report(&mut self, kind: EntryKind, path: &Path, outcome: Outcome) {
        match &outcome {
            Outcome::Deleted => debug!("deleted {} {}", kind.label(), path.display()),
            Outcome::SkippedIneligible(why) => trace!("kept {}: {why}", path.display()),
            Outcome::SkippedError(reason) => warn!("skipped {}: {reason}", path.display()),
        }
        self.sink.record(&Report::new(kind, path, outcome));
    }
}

// crates/engine/src/stats.rs
use serde::Serialize;

use crate::boot::BootInstant;
use crate::entry::EntryKind;
use crate::outcome::{Outcome, OutcomeSink, Report};

/// Per-run tallies, aggregated from the reports a sweep emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    pub deleted_files: usize,
    pub deleted_dirs: usize,
    pub retained: usize,
    pub errors: usize,
}

impl SweepSummary {
    #[must_use]
    pub const fn deleted(&self) -> usize {
        self.deleted_files + self.deleted_dirs
    }

    pub fn tally(&mut self, report: &Report) {
        match (&report.outcome, report.kind) {
            (Outcome::Deleted, EntryKind::File) => self.deleted_files += 1,
            (Outcome::Deleted, EntryKind::Directory) => self.deleted_dirs += 1,
            (Outcome::SkippedIneligible(_), _) => self.retained += 1,
            (Outcome::SkippedError(_), _) => self.errors += 1,
        }
    }
}

impl OutcomeSink for SweepSummary {
    fn record(&mut self, report: &Report) {
        self.tally(report);
    }
}

/// What a finished run hands back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub root: std::path::PathBuf,
    #[serde(serialize_with = "serialize_boot")]
    pub boot: BootInstant,
    pub summary: SweepSummary,
}

fn serialize_boot<S: serde::Serializer>(boot: &BootInstant, serializer: S) -> Result<S::Ok, S::Error> {
    if boot.is_unknown() {
        serializer.serialize_none()
    } else {
        serializer.serialize_some(&boot.as_datetime())
    }
}

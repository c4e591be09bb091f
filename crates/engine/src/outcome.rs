// crates/engine/src/outcome.rs
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::eligibility::Ineligibility;
use crate::entry::EntryKind;

/// Terminal state of a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum Outcome {
    Deleted,
    SkippedIneligible(Ineligibility),
    /// The entry could not be read, listed or removed. Carries the OS reason.
    SkippedError(String),
}

impl Outcome {
    pub(crate) fn error(err: &std::io::Error) -> Self {
        Self::SkippedError(err.to_string())
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::SkippedError(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted => f.write_str("deleted"),
            Self::SkippedIneligible(why) => write!(f, "kept: {why}"),
            Self::SkippedError(reason) => f.write_str(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub kind: EntryKind,
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl Report {
    pub fn new(kind: EntryKind, path: &Path, outcome: Outcome) -> Self {
        Self {
            kind,
            path: path.to_path_buf(),
            outcome,
        }
    }
}

/// Receives one report per entry as the sweep reaches a decision.
///
/// Sinks are write-only from the sweep's point of view. They cannot fail it.
pub trait OutcomeSink {
    fn record(&mut self, report: &Report);
}

impl<F> OutcomeSink for F
where
    F: FnMut(&Report),
{
    fn record(&mut self, report: &Report) {
        self(report);
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OutcomeSink for NullSink {
    fn record(&mut self, _report: &Report) {}
}

/// Forwards each report to two sinks in turn.
pub struct Tee<'a, A: ?Sized, B: ?Sized>(pub &'a mut A, pub &'a mut B);

impl<A, B> OutcomeSink for Tee<'_, A, B>
where
    A: OutcomeSink + ?Sized,
    B: OutcomeSink + ?Sized,
{
    fn record(&mut self, report: &Report) {
        self.0.record(report);
        self.1.record(report);
    }
}

// crates/cli/src/journal.rs
//! Per-day append-only journal of everything the sweep had to skip.
//!
//! One file per local calendar day, one tab-separated line per event:
//!
//! ```text
//! 2025-03-01T08:00:00.000000Z	[INFO]	START RUN
//! 2025-03-01T08:00:00.012345Z	[FILE]	/tmp/busy.log	Text file busy (os error 26)
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use log::warn;
use tempsweep_engine::outcome::{Outcome, OutcomeSink, Report};

pub const APP_DIR_NAME: &str = "tempsweep";

#[derive(Debug)]
pub struct Journal {
    path: PathBuf,
    write_failed: bool,
}

impl Journal {
    /// Opens today's journal under `dir`, creating the folder if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be created.
    pub fn open(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(file_name_for(Local::now().date_naive())),
            write_failed: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&mut self, message: &str) {
        self.write("INFO", None, message);
    }

    /// Appends one event. Failures are reported once on stderr and
    /// otherwise ignored.
    pub fn write(&mut self, tag: &str, path: Option<&Path>, message: &str) {
        let line = format_line(Utc::now(), tag, path, message);
        if let Err(err) = self.append(&line) {
            if !self.write_failed {
                warn!("cannot write journal {}: {err}", self.path.display());
            }
            self.write_failed = true;
        }
    }

    fn append(&self, line: &str) -> io::Result<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?
            .write_all(line.as_bytes())
    }
}

impl OutcomeSink for Journal {
    fn record(&mut self, report: &Report) {
        if let Outcome::SkippedError(reason) = &report.outcome {
            self.write(report.kind.label(), Some(&report.path), reason);
        }
    }
}

#[must_use]
pub fn file_name_for(date: NaiveDate) -> String {
    format!("{} - Log.txt", date.format("%Y-%m-%d"))
}

/// Renders one journal line, newline included.
#[must_use]
pub fn format_line(at: DateTime<Utc>, tag: &str, path: Option<&Path>, message: &str) -> String {
    let timestamp = at.to_rfc3339_opts(SecondsFormat::Micros, true);
    let message = single_line(message);
    match path.map(|p| single_line(&p.to_string_lossy())) {
        Some(path) if !path.trim().is_empty() => {
            format!("{timestamp}\t[{tag}]\t{path}\t{message}\n")
        }
        _ => format!("{timestamp}\t[{tag}]\t{message}\n"),
    }
}

// Tabs and line breaks would split one event across fields or lines.
fn single_line(s: &str) -> String {
    s.replace(['\t', '\r', '\n'], " ")
}

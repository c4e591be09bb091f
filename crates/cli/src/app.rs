// crates/cli/src/app.rs
use log::warn;
use tempsweep_engine::outcome::NullSink;

use crate::config::Config;
use crate::error::Result;
use crate::journal::Journal;
use crate::presentation;

/// Runs one sweep as configured and returns the rendered summary.
///
/// # Errors
///
/// Returns an error only when the summary cannot be rendered. An unusable
/// root is journaled like any other folder that could not be read, and
/// journal problems are logged and otherwise ignored.
pub fn run(config: &Config) -> Result<String> {
    let mut journal = open_journal(config);
    if let Some(journal) = journal.as_mut() {
        journal.info("START RUN");
    }

    let boot = tempsweep_engine::resolve_boot(&config.sweep);
    if boot.is_unknown()
        && let Some(journal) = journal.as_mut()
    {
        journal.info("boot time unknown; nothing will be deleted");
    }

    let result = match journal.as_mut() {
        Some(journal) => tempsweep_engine::run(&config.sweep, boot, journal),
        None => tempsweep_engine::run(&config.sweep, boot, &mut NullSink),
    };

    if let Some(journal) = journal.as_mut() {
        journal.info("END RUN");
    }

    presentation::render_summary(&result, config.format)
}

fn open_journal(config: &Config) -> Option<Journal> {
    let dir = match config.journal.resolve_dir() {
        Ok(dir) => dir?,
        Err(err) => {
            warn!("{err}");
            return None;
        }
    };
    match Journal::open(&dir) {
        Ok(journal) => Some(journal),
        Err(err) => {
            warn!("cannot open journal in {}: {err}", dir.display());
            None
        }
    }
}

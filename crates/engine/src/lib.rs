// crates/engine/src/lib.rs
//! Conservative temp-directory sweeping.
//!
//! Deletes files and empty folders whose creation, access and modification
//! times all predate the last system boot. Anything that cannot be shown to
//! be stale is left alone.

pub mod boot;
pub mod config;
pub mod eligibility;
pub mod entry;
pub mod error;
pub mod filesystem;
pub mod outcome;
pub mod path_security;
pub mod stats;
pub mod sweeper;

use log::{info, warn};

use crate::boot::{BootInstant, BootTimeOracle, FixedBootTime};
use crate::config::SweepConfig;
use crate::entry::EntryKind;
use crate::filesystem::OsFileSystem;
use crate::outcome::{Outcome, OutcomeSink, Report, Tee};
use crate::path_security::sanitize_root;
use crate::stats::{RunResult, SweepSummary};
use crate::sweeper::Sweeper;

/// Resolves the run's boot instant: the configured override if any,
/// otherwise a single host query.
#[must_use]
pub fn resolve_boot(config: &SweepConfig) -> BootInstant {
    match config.boot_override {
        Some(boot) => BootTimeOracle::new(FixedBootTime(boot)).resolve(),
        None => BootTimeOracle::system().resolve(),
    }
}

/// Sweep `config.root` against `boot`, reporting every entry to `sink`.
///
/// A root that fails validation is reported as a single directory-level
/// error and nothing beneath it is touched. Per-entry failures are reported
/// to `sink` and counted in the summary.
pub fn run<S>(config: &SweepConfig, boot: BootInstant, sink: &mut S) -> RunResult
where
    S: OutcomeSink + ?Sized,
{
    let mut summary = SweepSummary::default();
    let mut tee = Tee(&mut summary, sink);

    let root = match sanitize_root(&config.root) {
        Ok(root) => root,
        Err(err) => {
            warn!("not sweeping {}: {err}", config.root.display());
            let report = Report::new(
                EntryKind::Directory,
                &config.root,
                Outcome::SkippedError(err.to_string()),
            );
            tee.record(&report);
            return RunResult {
                root: config.root.clone(),
                boot,
                summary,
            };
        }
    };

    info!("sweeping {} (boot {boot})", root.display());
    Sweeper::new(&OsFileSystem, boot, &mut tee)
        .max_depth(config.max_depth)
        .clean(&root);

    info!(
        "sweep finished: {} deleted, {} kept, {} errors",
        summary.deleted(),
        summary.retained,
        summary.errors
    );
    RunResult { root, boot, summary }
}

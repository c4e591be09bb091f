// crates/cli/src/config.rs
use std::path::PathBuf;

use crate::args::Args;
use crate::error::{AppError, Result};
use crate::journal::APP_DIR_NAME;
use crate::options::OutputFormat;
pub use tempsweep_engine::config::{SweepConfig, SweepConfigBuilder};
use tempsweep_engine::boot::BootInstant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalOptions {
    pub enabled: bool,
    pub dir: Option<PathBuf>,
}

impl JournalOptions {
    /// Folder the journal should be written to, or `None` when disabled.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoDataDir`] when no folder was given and the
    /// platform has no application data directory.
    pub fn resolve_dir(&self) -> Result<Option<PathBuf>> {
        if !self.enabled {
            return Ok(None);
        }
        match &self.dir {
            Some(dir) => Ok(Some(dir.clone())),
            None => dirs::data_dir()
                .map(|base| Some(base.join(APP_DIR_NAME)))
                .ok_or(AppError::NoDataDir),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub sweep: SweepConfig,
    pub journal: JournalOptions,
    pub format: OutputFormat,
    pub verbose: u8,
}

impl TryFrom<Args> for Config {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self> {
        let mut sweep = SweepConfigBuilder::default();
        sweep.max_depth(args.max_depth);
        if let Some(root) = args.root {
            sweep.root(root);
        }
        if let Some(boot) = args.boot_time {
            sweep.boot_override(BootInstant::new(boot.0));
        }

        Ok(Self {
            sweep: sweep.build()?,
            journal: JournalOptions {
                enabled: !args.no_log,
                dir: args.log_dir,
            },
            format: args.format,
            verbose: args.verbose,
        })
    }
}

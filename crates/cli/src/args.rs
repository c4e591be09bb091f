// crates/cli/src/args.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use tempsweep_engine::sweeper::DEFAULT_MAX_DEPTH;

use crate::options::OutputFormat;
use crate::parsers::{BootTimeArg, parse_max_depth};

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "tempsweep",
    version = crate::VERSION,
    about = "Conservatively delete temp files and folders that predate the last boot",
    long_about = "Conservatively delete temp files and folders that predate the last boot.\n\n\
        An entry is deleted only when its creation, last-access and last-modified times \
        are all earlier than the last system boot. A folder must also be empty once its \
        own contents have been processed. Anything that cannot be read or removed is \
        skipped and recorded in the daily journal."
)]
pub struct Args {
    /// Directory whose contents are swept (default: the system temp directory)
    #[arg(long, value_hint = ValueHint::DirPath, help_heading = "Sweep")]
    pub root: Option<PathBuf>,

    /// Boot time to compare against instead of asking the OS
    /// (RFC 3339, "YYYY-MM-DD HH:MM:SS", "YYYY-MM-DD" or "@SECONDS")
    #[arg(long, value_name = "TIME", help_heading = "Sweep")]
    pub boot_time: Option<BootTimeArg>,

    /// Folders nested deeper than this below the root are left alone
    #[arg(long, value_parser = parse_max_depth, default_value_t = DEFAULT_MAX_DEPTH, help_heading = "Sweep")]
    pub max_depth: usize,

    /// Do not write the daily journal
    #[arg(long, help_heading = "Journal")]
    pub no_log: bool,

    /// Folder for the daily journal (default: <data dir>/tempsweep)
    #[arg(long, value_hint = ValueHint::DirPath, conflicts_with = "no_log", help_heading = "Journal")]
    pub log_dir: Option<PathBuf>,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help_heading = "Output")]
    pub format: OutputFormat,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Output")]
    pub verbose: u8,
}

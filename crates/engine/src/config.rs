use std::path::PathBuf;

use derive_builder::Builder;

use crate::boot::BootInstant;
use crate::error::EngineError;
use crate::sweeper::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(error = "EngineError"))]
pub struct SweepConfig {
    /// Directory whose contents are swept. The directory itself is kept.
    #[builder(default = "std::env::temp_dir()")]
    pub root: PathBuf,
    /// Directories nested deeper than this below the root are left alone.
    #[builder(default = "DEFAULT_MAX_DEPTH")]
    pub max_depth: usize,
    /// Use this boot instant instead of asking the host.
    #[builder(default)]
    pub boot_override: Option<BootInstant>,
}

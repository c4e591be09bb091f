use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Sweep root '{path}' is not usable: {reason}")]
    UnsafeRoot { path: PathBuf, reason: String },

    #[error("Failed to inspect sweep root '{path}': {source}")]
    RootInspect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    pub(crate) fn unsafe_root(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::UnsafeRoot {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl From<derive_builder::UninitializedFieldError> for EngineError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

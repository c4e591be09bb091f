use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] tempsweep_engine::error::EngineError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No application data directory is available; pass --log-dir or --no-log")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, AppError>;

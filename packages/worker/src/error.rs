use softhyphen_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid admin password")]
    Unauthorized,

    #[error("invalid rule: {0}")]
    InvalidRule(String),

    #[error("rule already exists: {0}")]
    DuplicateRule(String),

    #[error("rule not found: {0}")]
    RuleNotFound(String),

    #[error("input too large: {size} bytes (limit {limit})")]
    InputTooLarge { size: usize, limit: usize },

    #[error("hyphenation panicked: {0}")]
    Panicked(String),

    #[error("worker channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, WorkerError>;

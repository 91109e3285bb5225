use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid frame width: {0}")]
    InvalidFrameWidth(f32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Transaction is empty, nothing to submit")]
    EmptyTransaction,

    #[error("Transaction submit failed: {0}")]
    Submit(String),
}

use thiserror::Error;

/// Error type that captures storage backend failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Conflicting record: {0}")]
    Conflict(String),
    #[error("Store rejected the operation: {0}")]
    Rejected(String),
}

use thiserror::Error;

/// Errors raised by a memory backend adapter.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("memory backend unavailable")]
    Unavailable,

    #[error("memory backend not initialized: {0}")]
    NotInitialized(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode backend response: {0}")]
    Decode(String),
}

/// Errors surfaced by the memory service to its callers.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("ingest failed: {0}")]
    Ingest(BackendError),
}

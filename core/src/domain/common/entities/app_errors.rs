use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Invalid(String),

    /// Failure reported by the storage backend, message kept as-is.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error")]
    InternalServerError,
}

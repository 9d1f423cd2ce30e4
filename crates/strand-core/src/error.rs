use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrandError {
    #[error("Buffer error: {0}")]
    Buffer(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Commit error: {0}")]
    Commit(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, StrandError>;

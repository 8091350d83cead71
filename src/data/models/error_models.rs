use diesel::result::Error as DieselError;
use thiserror::Error;

// Errors surfaced by the HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Database error")]
    DatabaseError(#[from] DieselError),
    #[error("Connection pool error: {0}")]
    PoolError(String),
    #[error("Cannot connect to Anki: {0}")]
    AnkiUnavailable(String),
}

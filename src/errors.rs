// errors.rs
use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, validation, etc.) or downstream layers (DB).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Input rejected before it reaches the bucket core.
    #[error("Validation Error: {0}")]
    Validation(String),

    /// Unique-key race on insert. Retried internally, never shown to callers.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Validation(_) => 422,
            ServerError::Conflict(_) => 409,
            ServerError::DbError(_) | ServerError::InternalError => 500,
        }
    }

    /// Conflicts outside the bucket retry path are plain store failures.
    pub fn into_store_failure(self) -> Self {
        match self {
            ServerError::Conflict(msg) => ServerError::DbError(msg),
            other => other,
        }
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                ServerError::Conflict(err.to_string())
            }
            _ => ServerError::DbError(err.to_string()),
        }
    }
}

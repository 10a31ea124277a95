use sea_orm::{DbErr, SqlErr};
use util::time::TimeError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by domain operations. Each variant maps to exactly one
/// HTTP status in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Invalid time input: {0}")]
    Time(#[from] TimeError),
}

impl ServiceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::BadRequest(_) | Self::Time(_) => 400,
            Self::Conflict(_) => 409,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::Database(_) => 500,
        }
    }
}

/// Maps a unique-index violation on insert to a conflict. A pre-check can
/// lose a race with a concurrent writer, so the index is the final word.
pub(crate) fn conflict_on_duplicate(err: DbErr, msg: &str) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::conflict(msg),
        _ => ServiceError::Database(err),
    }
}

/// Rejects a blank required field.
pub(crate) fn require(value: &str, field: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::bad_request(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(ServiceError::not_found("x").status_code(), 404);
        assert_eq!(ServiceError::Time(TimeError::MissingReading).status_code(), 400);
        assert_eq!(ServiceError::Database(DbErr::Custom("x".into())).status_code(), 500);
        assert!(require("  ", "email").is_err());
        assert_eq!(require(" a ", "email").unwrap(), "a");
    }
}

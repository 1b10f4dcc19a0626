//! Unified error handling
//!
//! Application error taxonomy:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Validation` | malformed or out-of-range input, rejected pre-write |
//! | `NotFound` | referenced entity id does not exist |
//! | `Forbidden` | caller's role/branch does not authorize the mutation |
//! | `Conflict` | uniqueness violation (username, email) |
//! | `BusinessRule` | state-machine violation (e.g. editing a terminal booking) |
//! | `Aggregation` | dashboard rollup failure, caught once at the top |
//! | `Database` / `Internal` | infrastructure failures |
//!
//! Validation and permission errors are local and immediate; no partial
//! state is ever written for them. Aggregation errors are caught only at
//! the outermost dashboard boundary.

use crate::db::repository::RepoError;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Dashboard aggregation failed: {0}")]
    Aggregation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        AppError::BusinessRule(msg.into())
    }

    pub fn aggregation(msg: impl Into<String>) -> Self {
        AppError::Aggregation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        AppError::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

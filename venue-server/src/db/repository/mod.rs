//! Repository Module
//!
//! Query functions over the SQLite store, one module per table.
//! Functions take `&SqlitePool` (or a `SqliteExecutor` where they must
//! participate in a caller-owned transaction) and return row types from
//! the `shared` crate.
//!
//! Scoped queries take `scope: Option<i64>` — `None` means all branches
//! (admin), `Some(id)` restricts to one branch. The SQL pattern is
//! `(?1 IS NULL OR branch_id = ?1)` so a single prepared statement
//! serves both cases.

pub mod b2bc_sale;
pub mod booking;
pub mod branch;
pub mod commission_rule;
pub mod product;
pub mod sale;
pub mod user;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

//! Shared types for the venue administration suite
//!
//! Data models and small helpers used by the server core and its
//! operational binaries. Row types derive `sqlx::FromRow` behind the
//! `db` feature so frontends can consume the same structs without
//! pulling in the database stack.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

//! Data models
//!
//! Shared between the server core and its callers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//! Timestamps are Unix millis; calendar dates are ISO `YYYY-MM-DD` strings.

pub mod b2bc_sale;
pub mod booking;
pub mod branch;
pub mod commission_rule;
pub mod product;
pub mod sale;
pub mod user;

// Re-exports
pub use b2bc_sale::*;
pub use booking::*;
pub use branch::*;
pub use commission_rule::*;
pub use product::*;
pub use sale::*;
pub use user::*;

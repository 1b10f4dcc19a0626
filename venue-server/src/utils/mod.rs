//! Utility module — common helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type and alias
//! - logging, time-window and validation helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::AppError;
pub use result::AppResult;

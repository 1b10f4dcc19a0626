//! B2B Corporate Course Sale Model

use serde::{Deserialize, Serialize};

/// Corporate/course sale carrying a salesperson commission
///
/// `commission_rate` is resolved from the rule table once, at creation,
/// and stored — later rule edits never retouch historical figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct B2bcSale {
    pub id: i64,
    /// Unix millis
    pub sale_date: i64,
    pub course_name: String,
    pub price: f64,
    pub commission_rate: f64,
    /// `price` × `commission_rate`, recomputed only when price changes
    pub commission_amount: f64,
    pub user_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub notes: Option<String>,
}

/// Create B2B sale payload — `sale_date` defaults to now
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct B2bcSaleCreate {
    pub course_name: String,
    pub price: f64,
    pub branch_id: Option<i64>,
    pub notes: Option<String>,
    pub sale_date: Option<i64>,
}

//! Commission Rule Model

use serde::{Deserialize, Serialize};

/// Price-range → commission-rate rule
///
/// Rules should partition the price axis without gaps or overlaps; lookup
/// is first-match by range containment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CommissionRule {
    pub id: i64,
    pub min_amount: f64,
    pub max_amount: f64,
    /// Fraction, e.g. 0.10 for 10%
    pub rate: f64,
}

/// Create commission rule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRuleCreate {
    pub min_amount: f64,
    pub max_amount: f64,
    pub rate: f64,
}

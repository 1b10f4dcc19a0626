//! Branch Model

use serde::{Deserialize, Serialize};

/// Branch entity — one physical venue location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    /// Daily booking capacity, used for the utilization rate
    pub capacity: i64,
}

/// Create branch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchCreate {
    pub name: String,
    pub location: Option<String>,
    pub capacity: Option<i64>,
}

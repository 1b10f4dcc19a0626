//! Product Model

use serde::{Deserialize, Serialize};

/// Category tag that switches a sale to group pricing (bracket logic)
pub const CATEGORY_ACTIVITIES_GROUP: &str = "activities_group";

/// Category tag for simple passes
pub const CATEGORY_VOUCHER: &str = "voucher";

/// Product catalog entity
///
/// Sales snapshot the product name at sale time; they never hold a live
/// reference to this row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Free-form tag, notably "activities_group" and "voucher"
    pub category: String,
    pub default_price: f64,
    pub description: Option<String>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    pub default_price: f64,
    pub description: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub default_price: Option<f64>,
    pub description: Option<String>,
}

//! Voucher / Group Sale Model

use serde::{Deserialize, Serialize};

/// Sale type, derived from the product category at creation time —
/// never settable independently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum SaleType {
    Voucher,
    Group,
}

/// Payment status of a voucher/group sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum SaleStatus {
    Waiting,
    Paid,
    Canceled,
}

/// Voucher / group activity sale
///
/// `product_name` is an immutable snapshot taken when the sale is recorded.
/// `total_price`, `vat_7` and `total_sale` are always written together —
/// they are derived from `quantity` × `price_per_unit` and must not drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VoucherGroupSale {
    pub id: i64,
    /// Unix millis
    pub sale_date: i64,
    pub sale_type: SaleType,
    pub product_name: String,
    pub quantity: i64,
    pub price_per_unit: f64,
    pub total_price: f64,
    /// Fixed 7% VAT on `total_price`
    pub vat_7: f64,
    pub total_sale: f64,
    pub partner_name: Option<String>,
    pub partner_company: Option<String>,
    pub status: SaleStatus,
    pub branch_id: Option<i64>,
    pub salesperson_id: Option<i64>,
    pub notes: Option<String>,
}

/// Create sale payload
///
/// `price_per_unit` may be omitted for bracket-priced group activities;
/// the pricing engine resolves it. `sale_date` defaults to now.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherGroupSaleCreate {
    pub product_id: i64,
    pub quantity: i64,
    pub price_per_unit: Option<f64>,
    pub partner_name: Option<String>,
    pub partner_company: Option<String>,
    pub status: Option<SaleStatus>,
    pub branch_id: Option<i64>,
    pub notes: Option<String>,
    pub sale_date: Option<i64>,
    /// Name for the auto-created booking, when that policy is on
    pub booking_name: Option<String>,
}

/// Update sale payload — quantity/price changes recompute all totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherGroupSaleUpdate {
    pub product_id: i64,
    pub quantity: i64,
    pub price_per_unit: Option<f64>,
    pub partner_name: Option<String>,
    pub partner_company: Option<String>,
    pub status: SaleStatus,
    pub notes: Option<String>,
    /// Propagated to the sale's first linked booking, if any
    pub booking_name: Option<String>,
}

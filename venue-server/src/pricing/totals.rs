//! Sale total computation
//!
//! `total_price`, `vat_7` and `total_sale` are derived together from
//! quantity × unit price and always written as one unit — patching any of
//! them independently would let the figures drift.

use crate::utils::{AppError, AppResult};

/// Fixed VAT rate applied to every voucher/group sale
pub const VAT_RATE: f64 = 0.07;

/// The three derived money fields of a voucher/group sale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaleTotals {
    pub total_price: f64,
    pub vat_7: f64,
    pub total_sale: f64,
}

/// Compute sale totals from quantity and unit price.
///
/// Quantity must be positive; unit price must not be negative.
pub fn compute_totals(quantity: i64, price_per_unit: f64) -> AppResult<SaleTotals> {
    if quantity <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    if price_per_unit < 0.0 {
        return Err(AppError::validation(format!(
            "price_per_unit must not be negative, got {price_per_unit}"
        )));
    }

    let total_price = quantity as f64 * price_per_unit;
    let vat_7 = total_price * VAT_RATE;
    Ok(SaleTotals {
        total_price,
        vat_7,
        total_sale: total_price + vat_7,
    })
}

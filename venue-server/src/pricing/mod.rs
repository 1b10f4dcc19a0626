//! Pricing Engine Module
//!
//! Bracket-based unit-price resolution for group activities and the
//! VAT-inclusive total computation shared by every voucher/group sale.

mod brackets;
mod totals;

pub use brackets::*;
pub use totals::*;

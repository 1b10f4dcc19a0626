//! Service layer
//!
//! One service struct per domain area, each owning a pool clone. All
//! operations take the caller's [`Identity`](crate::auth::Identity)
//! explicitly; nothing here reads ambient session state. Reads are scoped
//! through `Identity::branch_scope`, mutations gated through
//! `require_sales_access` / `require_admin` plus a per-record branch check.

pub mod b2bc;
pub mod bookings;
pub mod catalog;
pub mod dashboard;
pub mod sales;
pub mod users;

pub use b2bc::B2bcService;
pub use bookings::BookingService;
pub use catalog::CatalogService;
pub use dashboard::{Dashboard, DashboardService};
pub use sales::SaleService;
pub use users::UserService;

use crate::auth::Identity;
use crate::utils::{AppError, AppResult};

/// Resolve the branch a new record belongs to. Admins may place records
/// in any branch (or none); everyone else writes into their own branch,
/// whatever the payload says.
fn resolve_branch(caller: &Identity, requested: Option<i64>) -> AppResult<Option<i64>> {
    if caller.is_admin() {
        return Ok(requested);
    }
    match caller.branch_id {
        Some(id) => Ok(Some(id)),
        None => Err(AppError::validation(
            "caller has no branch assignment; cannot record branch-scoped data",
        )),
    }
}

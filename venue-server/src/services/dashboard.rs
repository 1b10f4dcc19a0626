//! Dashboard aggregation
//!
//! One `render` call assembles every rollup the overview screen needs,
//! scoped to the caller's branch visibility. The computation is a series
//! of aggregate queries merged in memory; any failure inside is logged
//! with full context and surfaced as a single aggregation error, so one
//! bad query can never take down the caller with a half-built dashboard.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{Booking, SaleType};
use sqlx::SqlitePool;

use crate::auth::Identity;
use crate::db::repository::{
    b2bc_sale as b2bc_repo, booking as booking_repo, branch as branch_repo, sale as sale_repo,
};
use crate::utils::time::{day_end_millis, day_start_millis, month_start, week_start, year_start};
use crate::utils::{AppError, AppResult};

/// Days of history shown in the trend charts
const TREND_DAYS: i64 = 30;

/// Overview rollups, scoped to the caller
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Voucher/group `total_sale` + B2B `price`, all time
    pub total_revenue: f64,
    pub revenue_today: f64,
    pub revenue_this_week: f64,
    pub revenue_this_month: f64,
    pub revenue_this_year: f64,
    pub total_commission: f64,
    pub commission_this_month: f64,
    /// `total_revenue` less `total_commission`
    pub net_revenue: f64,
    pub sales_by_type: Vec<(SaleType, i64)>,
    /// Product names by sale count, best first
    pub top_products: Vec<(String, i64)>,
    /// Partners by summed revenue, best first
    pub top_partners: Vec<(String, f64)>,
    /// Per-day combined revenue over the trend window; days without
    /// sales are absent
    pub revenue_trend: Vec<(String, f64)>,
    pub booking_trend: Vec<(String, i64)>,
    pub bookings_today: i64,
    /// Bookings dated on or after Monday of the current week, future
    /// dates included
    pub bookings_this_week: i64,
    pub upcoming_bookings: i64,
    /// Bookings from today onward, (date, time_slot) ascending
    pub upcoming: Vec<Booking>,
    pub revenue_by_branch: Vec<(String, f64)>,
    pub bookings_by_branch: Vec<(String, i64)>,
    /// Today's bookings as a percentage of branch capacity in scope
    pub capacity_utilization: f64,
}

#[derive(Clone)]
pub struct DashboardService {
    pool: SqlitePool,
}

impl DashboardService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Assemble the dashboard for `caller` as of `today`.
    pub async fn render(&self, caller: &Identity, today: NaiveDate) -> AppResult<Dashboard> {
        match self.compute(caller, today).await {
            Ok(dashboard) => Ok(dashboard),
            Err(e) => {
                tracing::error!(
                    user_id = caller.user_id,
                    role = ?caller.role,
                    branch_id = ?caller.branch_id,
                    %today,
                    error = %e,
                    "Dashboard aggregation failed"
                );
                Err(AppError::aggregation(e.to_string()))
            }
        }
    }

    async fn compute(&self, caller: &Identity, today: NaiveDate) -> AppResult<Dashboard> {
        let pool = &self.pool;
        let scope = caller.branch_scope();
        let today_str = today.format("%Y-%m-%d").to_string();

        let day_end = day_end_millis(today);
        let windows = [
            (day_start_millis(today), day_end),
            (day_start_millis(week_start(today)), day_end),
            (day_start_millis(month_start(today)), day_end),
            (day_start_millis(year_start(today)), day_end),
        ];
        let mut window_revenue = [0.0; 4];
        for (i, &window) in windows.iter().enumerate() {
            window_revenue[i] = sale_repo::sum_total_sale(pool, scope, Some(window)).await?
                + b2bc_repo::sum_price(pool, scope, Some(window)).await?;
        }

        let total_revenue = sale_repo::sum_total_sale(pool, scope, None).await?
            + b2bc_repo::sum_price(pool, scope, None).await?;
        let total_commission = b2bc_repo::sum_commission(pool, scope, None).await?;
        let commission_this_month = b2bc_repo::sum_commission(pool, scope, Some(windows[2])).await?;

        // Window covers TREND_DAYS calendar days counting today itself
        let trend_start_date = today - chrono::Duration::days(TREND_DAYS - 1);
        let trend_start = day_start_millis(trend_start_date);
        let revenue_trend = merge_f64(
            sale_repo::revenue_trend_since(pool, scope, trend_start).await?,
            b2bc_repo::price_trend_since(pool, scope, trend_start).await?,
        );
        let trend_start_str = trend_start_date.format("%Y-%m-%d").to_string();
        let booking_trend: Vec<(String, i64)> = booking_repo::trend_since(pool, scope, &trend_start_str)
            .await?
            .into_iter()
            .collect::<BTreeMap<_, _>>()
            .into_iter()
            .collect();

        let bookings_today = booking_repo::count_on_date(pool, scope, &today_str).await?;
        let week_start_str = week_start(today).format("%Y-%m-%d").to_string();
        let bookings_this_week = booking_repo::count_since(pool, scope, &week_start_str).await?;
        let upcoming_bookings = booking_repo::count_since(pool, scope, &today_str).await?;
        let upcoming = booking_repo::upcoming(pool, scope, &today_str).await?;

        let capacity = branch_repo::total_capacity(pool, scope).await?;
        let capacity_utilization = if capacity > 0 {
            bookings_today as f64 / capacity as f64 * 100.0
        } else {
            0.0
        };

        let top_partners = sale_repo::top_partners(pool, scope, 5)
            .await?
            .into_iter()
            .map(|(name, total)| (name.unwrap_or_else(|| "N/A".into()), total))
            .collect();

        Ok(Dashboard {
            total_revenue,
            revenue_today: window_revenue[0],
            revenue_this_week: window_revenue[1],
            revenue_this_month: window_revenue[2],
            revenue_this_year: window_revenue[3],
            total_commission,
            commission_this_month,
            net_revenue: total_revenue - total_commission,
            sales_by_type: sale_repo::count_by_type(pool, scope).await?,
            top_products: sale_repo::top_products(pool, scope, 5).await?,
            top_partners,
            revenue_trend,
            booking_trend,
            bookings_today,
            bookings_this_week,
            upcoming_bookings,
            upcoming,
            revenue_by_branch: merge_f64(
                sale_repo::revenue_by_branch(pool, scope).await?,
                b2bc_repo::revenue_by_branch(pool, scope).await?,
            ),
            bookings_by_branch: booking_repo::count_by_branch(pool, scope).await?,
            capacity_utilization,
        })
    }
}

/// Merge two keyed sum lists, adding values on shared keys. Output is
/// key-sorted, which for ISO dates is chronological.
fn merge_f64(a: Vec<(String, f64)>, b: Vec<(String, f64)>) -> Vec<(String, f64)> {
    let mut merged: BTreeMap<String, f64> = BTreeMap::new();
    for (key, value) in a.into_iter().chain(b) {
        *merged.entry(key).or_default() += value;
    }
    merged.into_iter().collect()
}

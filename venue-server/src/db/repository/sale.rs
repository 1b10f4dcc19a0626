//! Voucher / Group Sale Repository
//!
//! Aggregation queries here feed the dashboard; each takes the usual
//! branch scope and, where windowed, a `[start, end)` millis pair.

use shared::models::{SaleStatus, SaleType, VoucherGroupSale};
use sqlx::{SqliteExecutor, SqlitePool};

use super::{RepoError, RepoResult};

/// Insert a fully computed sale row. Takes an executor so sale creation
/// can share one transaction with its auto-created booking.
pub async fn insert(
    ex: impl SqliteExecutor<'_>,
    sale: &VoucherGroupSale,
) -> RepoResult<VoucherGroupSale> {
    let row = sqlx::query_as::<_, VoucherGroupSale>(
        "INSERT INTO sales_voucher_group \
            (sale_date, sale_type, product_name, quantity, price_per_unit, \
             total_price, vat_7, total_sale, partner_name, partner_company, \
             status, branch_id, salesperson_id, notes) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14) \
         RETURNING *",
    )
    .bind(sale.sale_date)
    .bind(sale.sale_type)
    .bind(&sale.product_name)
    .bind(sale.quantity)
    .bind(sale.price_per_unit)
    .bind(sale.total_price)
    .bind(sale.vat_7)
    .bind(sale.total_sale)
    .bind(&sale.partner_name)
    .bind(&sale.partner_company)
    .bind(sale.status)
    .bind(sale.branch_id)
    .bind(sale.salesperson_id)
    .bind(&sale.notes)
    .fetch_one(ex)
    .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<VoucherGroupSale>> {
    let row = sqlx::query_as::<_, VoucherGroupSale>("SELECT * FROM sales_voucher_group WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// List sales in scope, optionally restricted to a `[start, end)` window.
pub async fn list(
    pool: &SqlitePool,
    scope: Option<i64>,
    window: Option<(i64, i64)>,
) -> RepoResult<Vec<VoucherGroupSale>> {
    let rows = sqlx::query_as::<_, VoucherGroupSale>(
        "SELECT * FROM sales_voucher_group \
         WHERE (?1 IS NULL OR branch_id = ?1) \
           AND (?2 IS NULL OR (sale_date >= ?2 AND sale_date < ?3)) \
         ORDER BY sale_date DESC",
    )
    .bind(scope)
    .bind(window.map(|w| w.0))
    .bind(window.map(|w| w.1))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Rewrite every mutable field of a sale. The three derived totals ride
/// along with quantity/price so they can never drift apart.
pub async fn update(
    ex: impl SqliteExecutor<'_>,
    sale: &VoucherGroupSale,
) -> RepoResult<VoucherGroupSale> {
    let row = sqlx::query_as::<_, VoucherGroupSale>(
        "UPDATE sales_voucher_group SET \
            sale_type = ?2, product_name = ?3, quantity = ?4, price_per_unit = ?5, \
            total_price = ?6, vat_7 = ?7, total_sale = ?8, partner_name = ?9, \
            partner_company = ?10, status = ?11, notes = ?12 \
         WHERE id = ?1 RETURNING *",
    )
    .bind(sale.id)
    .bind(sale.sale_type)
    .bind(&sale.product_name)
    .bind(sale.quantity)
    .bind(sale.price_per_unit)
    .bind(sale.total_price)
    .bind(sale.vat_7)
    .bind(sale.total_sale)
    .bind(&sale.partner_name)
    .bind(&sale.partner_company)
    .bind(sale.status)
    .bind(&sale.notes)
    .fetch_optional(ex)
    .await?;
    row.ok_or_else(|| RepoError::NotFound(format!("Sale {} not found", sale.id)))
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: SaleStatus,
) -> RepoResult<VoucherGroupSale> {
    let row = sqlx::query_as::<_, VoucherGroupSale>(
        "UPDATE sales_voucher_group SET status = ?2 WHERE id = ?1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| RepoError::NotFound(format!("Sale {id} not found")))
}

/// Delete a sale; linked bookings go with it via the FK cascade.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM sales_voucher_group WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Sum of `total_sale` in scope, optionally windowed.
pub async fn sum_total_sale(
    pool: &SqlitePool,
    scope: Option<i64>,
    window: Option<(i64, i64)>,
) -> RepoResult<f64> {
    let sum = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(total_sale), 0.0) FROM sales_voucher_group \
         WHERE (?1 IS NULL OR branch_id = ?1) \
           AND (?2 IS NULL OR (sale_date >= ?2 AND sale_date < ?3))",
    )
    .bind(scope)
    .bind(window.map(|w| w.0))
    .bind(window.map(|w| w.1))
    .fetch_one(pool)
    .await?;
    Ok(sum)
}

/// Sale counts grouped by type (voucher vs. group).
pub async fn count_by_type(
    pool: &SqlitePool,
    scope: Option<i64>,
) -> RepoResult<Vec<(SaleType, i64)>> {
    let rows = sqlx::query_as::<_, (SaleType, i64)>(
        "SELECT sale_type, COUNT(id) FROM sales_voucher_group \
         WHERE (?1 IS NULL OR branch_id = ?1) GROUP BY sale_type",
    )
    .bind(scope)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Top product names by sale count, descending. Ties break by storage order.
pub async fn top_products(
    pool: &SqlitePool,
    scope: Option<i64>,
    limit: i64,
) -> RepoResult<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT product_name, COUNT(id) AS cnt FROM sales_voucher_group \
         WHERE (?1 IS NULL OR branch_id = ?1) \
         GROUP BY product_name ORDER BY cnt DESC LIMIT ?2",
    )
    .bind(scope)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Top partners by summed `total_sale`, descending.
pub async fn top_partners(
    pool: &SqlitePool,
    scope: Option<i64>,
    limit: i64,
) -> RepoResult<Vec<(Option<String>, f64)>> {
    let rows = sqlx::query_as::<_, (Option<String>, f64)>(
        "SELECT partner_name, SUM(total_sale) AS total FROM sales_voucher_group \
         WHERE (?1 IS NULL OR branch_id = ?1) \
         GROUP BY partner_name ORDER BY total DESC LIMIT ?2",
    )
    .bind(scope)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Per-day revenue since `start` millis: (ISO date, summed total_sale).
/// Days without sales are simply absent.
pub async fn revenue_trend_since(
    pool: &SqlitePool,
    scope: Option<i64>,
    start: i64,
) -> RepoResult<Vec<(String, f64)>> {
    let rows = sqlx::query_as::<_, (String, f64)>(
        "SELECT date(sale_date / 1000, 'unixepoch') AS d, SUM(total_sale) \
         FROM sales_voucher_group \
         WHERE (?1 IS NULL OR branch_id = ?1) AND sale_date >= ?2 \
         GROUP BY d",
    )
    .bind(scope)
    .bind(start)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Revenue per branch name. Branches without voucher/group sales are absent.
pub async fn revenue_by_branch(
    pool: &SqlitePool,
    scope: Option<i64>,
) -> RepoResult<Vec<(String, f64)>> {
    let rows = sqlx::query_as::<_, (String, f64)>(
        "SELECT b.name, SUM(s.total_sale) FROM branches b \
         JOIN sales_voucher_group s ON s.branch_id = b.id \
         WHERE (?1 IS NULL OR b.id = ?1) GROUP BY b.name",
    )
    .bind(scope)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

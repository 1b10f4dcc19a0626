//! B2B Course Sale Repository

use shared::models::B2bcSale;
use sqlx::SqlitePool;

use super::RepoResult;

pub async fn insert(pool: &SqlitePool, sale: &B2bcSale) -> RepoResult<B2bcSale> {
    let row = sqlx::query_as::<_, B2bcSale>(
        "INSERT INTO sales_b2bc \
            (sale_date, course_name, price, commission_rate, commission_amount, \
             user_id, branch_id, notes) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING *",
    )
    .bind(sale.sale_date)
    .bind(&sale.course_name)
    .bind(sale.price)
    .bind(sale.commission_rate)
    .bind(sale.commission_amount)
    .bind(sale.user_id)
    .bind(sale.branch_id)
    .bind(&sale.notes)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<B2bcSale>> {
    let row = sqlx::query_as::<_, B2bcSale>("SELECT * FROM sales_b2bc WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list(pool: &SqlitePool, scope: Option<i64>) -> RepoResult<Vec<B2bcSale>> {
    let rows = sqlx::query_as::<_, B2bcSale>(
        "SELECT * FROM sales_b2bc WHERE (?1 IS NULL OR branch_id = ?1) ORDER BY sale_date DESC",
    )
    .bind(scope)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Sum of `price` in scope, optionally windowed `[start, end)`.
pub async fn sum_price(
    pool: &SqlitePool,
    scope: Option<i64>,
    window: Option<(i64, i64)>,
) -> RepoResult<f64> {
    let sum = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(price), 0.0) FROM sales_b2bc \
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

/// Sum of `commission_amount` in scope, optionally windowed.
pub async fn sum_commission(
    pool: &SqlitePool,
    scope: Option<i64>,
    window: Option<(i64, i64)>,
) -> RepoResult<f64> {
    let sum = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(commission_amount), 0.0) FROM sales_b2bc \
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

/// Per-day B2B revenue since `start` millis: (ISO date, summed price).
pub async fn price_trend_since(
    pool: &SqlitePool,
    scope: Option<i64>,
    start: i64,
) -> RepoResult<Vec<(String, f64)>> {
    let rows = sqlx::query_as::<_, (String, f64)>(
        "SELECT date(sale_date / 1000, 'unixepoch') AS d, SUM(price) \
         FROM sales_b2bc \
         WHERE (?1 IS NULL OR branch_id = ?1) AND sale_date >= ?2 \
         GROUP BY d",
    )
    .bind(scope)
    .bind(start)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// B2B revenue per branch name.
pub async fn revenue_by_branch(
    pool: &SqlitePool,
    scope: Option<i64>,
) -> RepoResult<Vec<(String, f64)>> {
    let rows = sqlx::query_as::<_, (String, f64)>(
        "SELECT b.name, SUM(s.price) FROM branches b \
         JOIN sales_b2bc s ON s.branch_id = b.id \
         WHERE (?1 IS NULL OR b.id = ?1) GROUP BY b.name",
    )
    .bind(scope)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

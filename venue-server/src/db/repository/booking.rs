//! Booking Repository
//!
//! Booking dates are ISO `YYYY-MM-DD` strings; lexicographic comparison
//! matches chronological order, so windows and ordering are plain string
//! comparisons here.

use shared::models::{Booking, BookingStatus};
use sqlx::{SqliteExecutor, SqlitePool};

use super::{RepoError, RepoResult};

/// Insert a booking. Executor-generic so auto-created bookings share the
/// sale's transaction.
pub async fn insert(ex: impl SqliteExecutor<'_>, booking: &Booking) -> RepoResult<Booking> {
    let row = sqlx::query_as::<_, Booking>(
        "INSERT INTO bookings \
            (sale_id, booking_name, booking_date, time_slot, status, \
             actual_quantity, branch_id, notes) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING *",
    )
    .bind(booking.sale_id)
    .bind(&booking.booking_name)
    .bind(&booking.booking_date)
    .bind(&booking.time_slot)
    .bind(booking.status)
    .bind(booking.actual_quantity)
    .bind(booking.branch_id)
    .bind(&booking.notes)
    .fetch_one(ex)
    .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let row = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn list(pool: &SqlitePool, scope: Option<i64>) -> RepoResult<Vec<Booking>> {
    let rows = sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE (?1 IS NULL OR branch_id = ?1) ORDER BY id",
    )
    .bind(scope)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_sale(pool: &SqlitePool, sale_id: i64) -> RepoResult<Vec<Booking>> {
    let rows = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE sale_id = ?1 ORDER BY id")
        .bind(sale_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Rewrite every mutable field of a booking.
pub async fn update(ex: impl SqliteExecutor<'_>, booking: &Booking) -> RepoResult<Booking> {
    let row = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET \
            booking_name = ?2, booking_date = ?3, time_slot = ?4, status = ?5, \
            actual_quantity = ?6, branch_id = ?7, notes = ?8 \
         WHERE id = ?1 RETURNING *",
    )
    .bind(booking.id)
    .bind(&booking.booking_name)
    .bind(&booking.booking_date)
    .bind(&booking.time_slot)
    .bind(booking.status)
    .bind(booking.actual_quantity)
    .bind(booking.branch_id)
    .bind(&booking.notes)
    .fetch_optional(ex)
    .await?;
    row.ok_or_else(|| RepoError::NotFound(format!("Booking {} not found", booking.id)))
}

/// Inline list-view update: only status and realized attendance.
pub async fn update_fields(
    pool: &SqlitePool,
    id: i64,
    status: Option<BookingStatus>,
    actual_quantity: Option<i64>,
) -> RepoResult<Booking> {
    let row = sqlx::query_as::<_, Booking>(
        "UPDATE bookings SET \
            status = COALESCE(?2, status), \
            actual_quantity = COALESCE(?3, actual_quantity) \
         WHERE id = ?1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .bind(actual_quantity)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_on_date(pool: &SqlitePool, scope: Option<i64>, date: &str) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(id) FROM bookings \
         WHERE (?1 IS NULL OR branch_id = ?1) AND booking_date = ?2",
    )
    .bind(scope)
    .bind(date)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn count_since(pool: &SqlitePool, scope: Option<i64>, date: &str) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(id) FROM bookings \
         WHERE (?1 IS NULL OR branch_id = ?1) AND booking_date >= ?2",
    )
    .bind(scope)
    .bind(date)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Bookings per day since `date`: (ISO date, count). Undated bookings are
/// excluded; days without bookings are absent.
pub async fn trend_since(
    pool: &SqlitePool,
    scope: Option<i64>,
    date: &str,
) -> RepoResult<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT booking_date, COUNT(id) FROM bookings \
         WHERE (?1 IS NULL OR branch_id = ?1) \
           AND booking_date IS NOT NULL AND booking_date >= ?2 \
         GROUP BY booking_date",
    )
    .bind(scope)
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Booking counts per branch name.
pub async fn count_by_branch(
    pool: &SqlitePool,
    scope: Option<i64>,
) -> RepoResult<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT b.name, COUNT(k.id) FROM branches b \
         JOIN bookings k ON k.branch_id = b.id \
         WHERE (?1 IS NULL OR b.id = ?1) GROUP BY b.name",
    )
    .bind(scope)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Bookings from `date` onward, ordered by (date, time_slot) ascending.
pub async fn upcoming(pool: &SqlitePool, scope: Option<i64>, date: &str) -> RepoResult<Vec<Booking>> {
    let rows = sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings \
         WHERE (?1 IS NULL OR branch_id = ?1) AND booking_date >= ?2 \
         ORDER BY booking_date, time_slot",
    )
    .bind(scope)
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

//! Branch Repository

use shared::models::{Branch, BranchCreate};
use sqlx::SqlitePool;

use super::RepoResult;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Branch>> {
    let rows = sqlx::query_as::<_, Branch>("SELECT * FROM branches ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Branch>> {
    let row = sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: BranchCreate) -> RepoResult<Branch> {
    let row = sqlx::query_as::<_, Branch>(
        "INSERT INTO branches (name, location, capacity) VALUES (?1, ?2, ?3) RETURNING *",
    )
    .bind(data.name)
    .bind(data.location)
    .bind(data.capacity.unwrap_or(100))
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Summed booking capacity in scope (all branches for admin, one otherwise).
pub async fn total_capacity(pool: &SqlitePool, scope: Option<i64>) -> RepoResult<i64> {
    let sum = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(capacity), 0) FROM branches WHERE (?1 IS NULL OR id = ?1)",
    )
    .bind(scope)
    .fetch_one(pool)
    .await?;
    Ok(sum)
}

//! User Repository

use shared::models::{Role, User};
use sqlx::SqlitePool;

use super::RepoResult;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?1")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Duplicate check used at registration: either field colliding counts.
pub async fn find_by_username_or_email(
    pool: &SqlitePool,
    username: &str,
    email: &str,
) -> RepoResult<Option<User>> {
    let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?1 OR email = ?2")
        .bind(username)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_admin(pool: &SqlitePool) -> RepoResult<Option<User>> {
    let row = sqlx::query_as::<_, User>("SELECT * FROM users WHERE role = ?1 LIMIT 1")
        .bind(Role::Admin)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
    role: Role,
    branch_id: Option<i64>,
) -> RepoResult<User> {
    let row = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, role, branch_id) \
         VALUES (?1, ?2, ?3, ?4, ?5) RETURNING *",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(branch_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

//! Product Repository

use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY category, name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Name lookup for seeding upserts. Names are unique in practice but not
/// enforced at storage; first match wins.
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE name = ?1 LIMIT 1")
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let row = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, category, default_price, description) \
         VALUES (?1, ?2, ?3, ?4) RETURNING *",
    )
    .bind(data.name)
    .bind(data.category)
    .bind(data.default_price)
    .bind(data.description)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let row = sqlx::query_as::<_, Product>(
        "UPDATE products SET \
            name = COALESCE(?2, name), \
            category = COALESCE(?3, category), \
            default_price = COALESCE(?4, default_price), \
            description = COALESCE(?5, description) \
         WHERE id = ?1 RETURNING *",
    )
    .bind(id)
    .bind(data.name)
    .bind(data.category)
    .bind(data.default_price)
    .bind(data.description)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

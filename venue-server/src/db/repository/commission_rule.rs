//! Commission Rule Repository

use shared::models::{CommissionRule, CommissionRuleCreate};
use sqlx::SqlitePool;

use super::RepoResult;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<CommissionRule>> {
    let rows =
        sqlx::query_as::<_, CommissionRule>("SELECT * FROM commission_rules ORDER BY min_amount")
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: CommissionRuleCreate) -> RepoResult<CommissionRule> {
    let row = sqlx::query_as::<_, CommissionRule>(
        "INSERT INTO commission_rules (min_amount, max_amount, rate) \
         VALUES (?1, ?2, ?3) RETURNING *",
    )
    .bind(data.min_amount)
    .bind(data.max_amount)
    .bind(data.rate)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

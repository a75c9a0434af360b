//! Order History Repository
//!
//! Append-only: only insert and paged reads. The table carries triggers that
//! abort any UPDATE or DELETE.

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

/// Raw `order_history` row; `diff` and `snapshot` are JSON text
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct OrderHistoryRow {
    pub record_id: i64,
    pub order_id: String,
    pub operation: String,
    pub actor_id: String,
    pub timestamp: i64,
    pub diff: Option<String>,
    pub snapshot: String,
}

pub async fn insert(pool: &SqlitePool, row: &OrderHistoryRow) -> RepoResult<()> {
    if row.order_id.trim().is_empty() {
        return Err(RepoError::Validation("order_id must not be empty".into()));
    }

    sqlx::query(
        "INSERT INTO order_history (record_id, order_id, operation, actor_id, timestamp, diff, snapshot) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(row.record_id)
    .bind(&row.order_id)
    .bind(&row.operation)
    .bind(&row.actor_id)
    .bind(row.timestamp)
    .bind(&row.diff)
    .bind(&row.snapshot)
    .execute(pool)
    .await?;
    Ok(())
}

/// Page of one order's history, oldest first (insertion order breaks ties)
pub async fn find_by_order_id(
    pool: &SqlitePool,
    order_id: &str,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<OrderHistoryRow>> {
    let rows = sqlx::query_as::<_, OrderHistoryRow>(
        "SELECT record_id, order_id, operation, actor_id, timestamp, diff, snapshot FROM order_history WHERE order_id = ? ORDER BY timestamp ASC, seq ASC LIMIT ? OFFSET ?",
    )
    .bind(order_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_by_order_id(pool: &SqlitePool, order_id: &str) -> RepoResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_history WHERE order_id = ?")
        .bind(order_id)
        .fetch_one(pool)
        .await?;
    Ok(total)
}

//! 订单历史存储层
//!
//! Append-only 设计：接口只有 `append` 和按订单分页查询，没有更新/删除。
//!
//! - [`MemoryHistoryStore`]：按订单分区的内存实现（测试、嵌入场景）
//! - [`SqliteHistoryStore`]：SQLite 实现，表上的触发器拒绝 UPDATE/DELETE

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::history::{ChangeRecord, HistoryPageRequest};
use sqlx::SqlitePool;

use super::error::{HistoryStorageError, HistoryStorageResult};
use crate::db::repository::RepoError;
use crate::db::repository::order_history::{self, OrderHistoryRow};

/// 历史存储接口
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// 追加一条记录，返回实际写入的记录 id
    async fn append(&self, record: &ChangeRecord) -> HistoryStorageResult<i64>;

    /// 按订单分页查询，按时间升序（同一时间按写入顺序）
    ///
    /// 返回 `(当前页记录, 该订单记录总数)`
    async fn find_by_order_id(
        &self,
        order_id: &str,
        page: HistoryPageRequest,
    ) -> HistoryStorageResult<(Vec<ChangeRecord>, u64)>;
}

// ============================================================================
// Memory
// ============================================================================

/// 内存存储（按订单 id 分区）
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    partitions: RwLock<HashMap<String, Vec<ChangeRecord>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有订单的记录总数
    pub fn len(&self) -> usize {
        self.partitions.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, record: &ChangeRecord) -> HistoryStorageResult<i64> {
        let mut partitions = self.partitions.write();
        let records = partitions.entry(record.order_id.clone()).or_default();
        // 时间相同的记录排在已有记录之后
        let index = records.partition_point(|r| r.timestamp <= record.timestamp);
        records.insert(index, record.clone());
        Ok(record.id)
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
        page: HistoryPageRequest,
    ) -> HistoryStorageResult<(Vec<ChangeRecord>, u64)> {
        let partitions = self.partitions.read();
        let Some(records) = partitions.get(order_id) else {
            return Ok((Vec::new(), 0));
        };

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = records
            .iter()
            .skip(offset)
            .take(page.limit as usize)
            .cloned()
            .collect();
        Ok((items, records.len() as u64))
    }
}

// ============================================================================
// SQLite
// ============================================================================

/// SQLite 存储（`order_history` 表）
#[derive(Clone)]
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(&self, record: &ChangeRecord) -> HistoryStorageResult<i64> {
        let mut row = to_row(record)?;
        match order_history::insert(&self.pool, &row).await {
            Ok(()) => Ok(row.record_id),
            // 同一毫秒内 snowflake id 碰撞：换新 id 重试一次
            Err(RepoError::Duplicate(msg)) => {
                let retry_id = shared::util::snowflake_id();
                tracing::warn!(
                    order_id = %row.order_id,
                    record_id = row.record_id,
                    retry_id,
                    "History record id collision, retrying: {}",
                    msg
                );
                row.record_id = retry_id;
                order_history::insert(&self.pool, &row).await?;
                Ok(row.record_id)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
        page: HistoryPageRequest,
    ) -> HistoryStorageResult<(Vec<ChangeRecord>, u64)> {
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let rows =
            order_history::find_by_order_id(&self.pool, order_id, i64::from(page.limit), offset)
                .await?;
        let total = order_history::count_by_order_id(&self.pool, order_id).await?;

        let records = rows
            .into_iter()
            .map(from_row)
            .collect::<HistoryStorageResult<Vec<_>>>()?;
        Ok((records, total.max(0) as u64))
    }
}

fn to_row(record: &ChangeRecord) -> HistoryStorageResult<OrderHistoryRow> {
    Ok(OrderHistoryRow {
        record_id: record.id,
        order_id: record.order_id.clone(),
        operation: record.operation.as_str().to_string(),
        actor_id: record.actor_id.clone(),
        timestamp: record.timestamp,
        diff: record.diff.as_ref().map(serde_json::to_string).transpose()?,
        snapshot: serde_json::to_string(&record.snapshot)?,
    })
}

fn from_row(row: OrderHistoryRow) -> HistoryStorageResult<ChangeRecord> {
    let operation = row
        .operation
        .parse()
        .map_err(|reason| HistoryStorageError::Corrupted {
            record_id: row.record_id,
            reason,
        })?;

    Ok(ChangeRecord {
        id: row.record_id,
        operation,
        order_id: row.order_id,
        actor_id: row.actor_id,
        timestamp: row.timestamp,
        diff: row.diff.as_deref().map(serde_json::from_str).transpose()?,
        snapshot: serde_json::from_str(&row.snapshot)?,
    })
}

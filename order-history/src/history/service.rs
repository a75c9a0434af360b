//! 订单历史服务
//!
//! `OrderHistoryService` 对外暴露两个操作：
//! - `track()`：在调用方的事务内同步执行，快照 → diff → 追加；从不返回错误
//! - `get_history()`：分页读取并丰富，读取失败向上传播

use std::sync::Arc;

use shared::history::{ChangeOperation, ChangeRecord, HistoryPage, HistoryPageRequest};
use shared::order::OrderAggregate;

use super::actors::ActorDirectory;
use super::diff::{diff, diff_removal};
use super::formatter::HistoryFormatter;
use super::snapshot;
use super::storage::HistoryStore;
use crate::core::Config;
use crate::utils::{AppError, AppResult, ErrorCode};

/// `track()` 的结果，仅用于观测
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// 已写入
    Recorded { record_id: i64 },
    /// UPDATE 没有任何变化，未写入
    Skipped,
    /// 快照失败或写入失败（已记录日志）
    Failed,
    /// 历史记录已关闭
    Disabled,
}

impl TrackOutcome {
    pub fn record_id(&self) -> Option<i64> {
        match self {
            Self::Recorded { record_id } => Some(*record_id),
            _ => None,
        }
    }
}

/// 订单历史服务
#[derive(Clone)]
pub struct OrderHistoryService {
    store: Arc<dyn HistoryStore>,
    formatter: HistoryFormatter,
    enabled: bool,
    max_page_limit: u32,
}

impl std::fmt::Debug for OrderHistoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderHistoryService")
            .field("enabled", &self.enabled)
            .field("max_page_limit", &self.max_page_limit)
            .finish_non_exhaustive()
    }
}

impl OrderHistoryService {
    pub fn new(
        store: Arc<dyn HistoryStore>,
        directory: Arc<dyn ActorDirectory>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            formatter: HistoryFormatter::from_config(directory, config),
            enabled: config.enable_history,
            max_page_limit: config.max_page_limit,
        }
    }

    /// 记录一次订单变更
    ///
    /// - INSERT：`previous` 忽略，diff 为全部新增
    /// - UPDATE：与 `previous` 比较，无变化则不写入
    /// - DELETE：`current` 为删除时的最后状态，diff 为全部移除
    pub async fn track(
        &self,
        operation: ChangeOperation,
        current: &OrderAggregate,
        previous: Option<&OrderAggregate>,
        actor_id: &str,
    ) -> TrackOutcome {
        if !self.enabled {
            return TrackOutcome::Disabled;
        }

        let current_snapshot = match snapshot::build(current) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(
                    order_id = %current.id,
                    %operation,
                    code = ErrorCode::HistorySerializationFailed.code(),
                    "Failed to snapshot order: {}",
                    e
                );
                return TrackOutcome::Failed;
            }
        };

        let change = match operation {
            ChangeOperation::Insert => diff(&current_snapshot, None),
            ChangeOperation::Delete => Some(diff_removal(&current_snapshot)),
            ChangeOperation::Update => {
                let previous_snapshot = match previous.map(snapshot::build).transpose() {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::error!(
                            order_id = %current.id,
                            %operation,
                            code = ErrorCode::HistorySerializationFailed.code(),
                            "Failed to snapshot previous order state: {}",
                            e
                        );
                        return TrackOutcome::Failed;
                    }
                };
                if previous_snapshot.is_none() {
                    tracing::warn!(
                        order_id = %current.id,
                        "UPDATE tracked without previous state, diffing as insert"
                    );
                }
                diff(&current_snapshot, previous_snapshot.as_ref())
            }
        };

        let Some(change) = change else {
            tracing::debug!(order_id = %current.id, "No changes detected, skipping history write");
            return TrackOutcome::Skipped;
        };

        let record = ChangeRecord {
            id: shared::util::snowflake_id(),
            operation,
            order_id: current.id.clone(),
            actor_id: actor_id.to_string(),
            timestamp: shared::util::now_millis(),
            diff: Some(change),
            snapshot: current_snapshot,
        };

        match self.store.append(&record).await {
            Ok(record_id) => {
                tracing::info!(
                    order_id = %record.order_id,
                    record_id,
                    %operation,
                    "Order history recorded"
                );
                TrackOutcome::Recorded { record_id }
            }
            Err(e) => {
                tracing::error!(
                    order_id = %record.order_id,
                    %operation,
                    code = ErrorCode::HistoryWriteFailed.code(),
                    "Failed to append order history: {}",
                    e
                );
                TrackOutcome::Failed
            }
        }
    }

    /// 分页读取订单历史 (page 从 1 开始)
    pub async fn get_history(
        &self,
        order_id: &str,
        page: u32,
        limit: u32,
    ) -> AppResult<HistoryPage> {
        let request = HistoryPageRequest::new(page, limit, self.max_page_limit);
        let (records, total) = self
            .store
            .find_by_order_id(order_id, request)
            .await
            .map_err(|e| {
                tracing::error!(order_id = %order_id, "Failed to read order history: {}", e);
                AppError::from(e).with_detail("orderId", order_id)
            })?;

        let items = self.formatter.enrich(records).await;
        Ok(HistoryPage::new(items, total, request))
    }
}

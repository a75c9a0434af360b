//! 订单历史模块 - 变更追踪与审计历史
//!
//! # 架构
//!
//! ```text
//! 订单变更 (调用方事务内)
//!   └─ OrderHistoryService::track()
//!        ├─ snapshot::build()       聚合 → 快照 (名称冗余、披萨定制格式化)
//!        ├─ diff::diff()            快照 × 2 → ConsolidatedDiff | None
//!        │    └─ classifier::classify()
//!        └─ HistoryStore::append()  写入失败只记录日志
//!
//! 读取
//!   └─ OrderHistoryService::get_history()
//!        ├─ HistoryStore::find_by_order_id()   (page, limit ≤ 上限)
//!        └─ HistoryFormatter::enrich()          操作人一次批量查询
//! ```
//!
//! # 不可变保证
//!
//! - **Append-only**: 存储接口没有更新/删除
//! - **SQLite 触发器**: `order_history` 表拒绝 UPDATE/DELETE
//! - **无变化不写入**: UPDATE 的 diff 为空时跳过

pub mod actors;
pub mod classifier;
pub mod diff;
pub mod error;
pub mod formatter;
pub mod labels;
pub mod service;
pub mod snapshot;
pub mod storage;

pub use actors::{ActorDirectory, StaticActorDirectory};
pub use error::{ActorLookupError, HistoryStorageError, HistoryStorageResult, SnapshotError};
pub use formatter::HistoryFormatter;
pub use service::{OrderHistoryService, TrackOutcome};
pub use storage::{HistoryStore, MemoryHistoryStore, SqliteHistoryStore};

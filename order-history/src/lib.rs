//! Order History - 订单变更追踪与审计历史引擎
//!
//! # 架构概述
//!
//! 每次订单变更时对聚合做快照，与上一版本计算结构化 diff，
//! 按语义类别归类商品行的变化，并以 append-only 方式持久化。
//! 读取时批量解析操作人并渲染为本地化的展示树。
//!
//! ```text
//! track(op, current, previous, actor)
//!   ├─ snapshot::build()        聚合 → OrderSnapshot
//!   ├─ diff::diff()             OrderSnapshot × 2 → ConsolidatedDiff
//!   │    └─ classifier::classify()
//!   └─ HistoryStore::append()   (失败仅记录日志)
//!
//! get_history(order_id, page, limit)
//!   ├─ HistoryStore::find_by_order_id()
//!   └─ HistoryFormatter::enrich()
//!        └─ ActorDirectory::find_by_ids()  (一次批量调用)
//! ```
//!
//! # 模块结构
//!
//! ```text
//! order-history/src/
//! ├── core/          # 配置
//! ├── db/            # SQLite 连接池、迁移、仓储
//! ├── history/       # 快照、diff、存储、格式化、服务
//! └── utils/         # 日志、时间、错误
//! ```

pub mod core;
pub mod db;
pub mod history;
pub mod utils;

pub use crate::core::Config;
pub use crate::db::DbService;
pub use history::{
    ActorDirectory, HistoryFormatter, HistoryStore, MemoryHistoryStore, OrderHistoryService,
    SqliteHistoryStore, StaticActorDirectory, TrackOutcome,
};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

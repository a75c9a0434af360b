//! 订单历史错误类型

use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::AppError;

/// 快照构建错误：聚合缺少必需的关联
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Item {item_id} is missing its product relation")]
    MissingProduct { item_id: String },

    #[error("Item {item_id} references variant {variant_id} but it was not loaded")]
    MissingVariant { item_id: String, variant_id: String },

    #[error("Item {item_id} references modifier {modifier_id} but it was not loaded")]
    MissingModifier { item_id: String, modifier_id: String },

    #[error("Item {item_id} references pizza customization {customization_id} but it was not loaded")]
    MissingCustomization {
        item_id: String,
        customization_id: String,
    },
}

impl From<SnapshotError> for AppError {
    fn from(err: SnapshotError) -> Self {
        AppError::history_serialization(err.to_string())
    }
}

/// 存储错误
#[derive(Debug, Error)]
pub enum HistoryStorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Corrupted record {record_id}: {reason}")]
    Corrupted { record_id: i64, reason: String },
}

impl From<RepoError> for HistoryStorageError {
    fn from(err: RepoError) -> Self {
        HistoryStorageError::Database(err.to_string())
    }
}

impl From<HistoryStorageError> for AppError {
    fn from(err: HistoryStorageError) -> Self {
        AppError::history_read(err.to_string())
    }
}

pub type HistoryStorageResult<T> = Result<T, HistoryStorageError>;

/// 操作人批量查询错误
#[derive(Debug, Error)]
pub enum ActorLookupError {
    #[error("Actor directory unavailable: {0}")]
    Unavailable(String),
}

//! 统一错误处理
//!
//! 引擎内部每层使用各自的 `thiserror` 枚举，对外统一转换为
//! [`shared::error::AppError`]（错误码 + 消息 + details）。
//!
//! # 错误码规范
//!
//! | 范围 | 分类 | 示例 |
//! |------|------|------|
//! | 0xxx | 通用 | 0 成功 |
//! | 4xxx | 订单历史 | 4101 快照序列化失败 |
//! | 9xxx | 系统 | 9002 数据库错误 |

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};

/// 结果转换为统一响应结构，供宿主 API 直接返回
pub fn into_response<T>(result: AppResult<T>) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::success(data),
        Err(err) => {
            tracing::error!(code = err.code.code(), "Request failed: {}", err.message);
            err.into()
        }
    }
}

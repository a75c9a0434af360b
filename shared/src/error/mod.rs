//! Unified error system for the order history workspace
//!
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`AppError`]: Rich error type with code, message and details
//! - [`ApiResponse`]: Response envelope for hosts embedding history results
//!
//! # Error Code Ranges
//!
//! - 0xxx: General
//! - 4xxx: Order history errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::HistoryWriteFailed);
//! assert_eq!(err.code.code(), 4102);
//!
//! let err = AppError::history_serialization("item 7 has no product")
//!     .with_detail("order_id", "ord-1");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(4101));
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};

//! Shared types for the order history workspace
//!
//! Order aggregate/snapshot types, change-record and diff types, the
//! unified error system and small utilities used by the engine and by any
//! host application embedding it.

pub mod error;
pub mod history;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use history::{ChangeOperation, ChangeRecord, ConsolidatedDiff, EnrichedChangeRecord};
pub use order::{OrderAggregate, OrderSnapshot};

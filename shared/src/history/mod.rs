//! Order change history types
//!
//! - [`ChangeRecord`]: immutable record written once per tracked mutation
//! - [`ConsolidatedDiff`]: typed diff between two order snapshots
//! - [`EnrichedChangeRecord`]: read-side record with actor and display tree

pub mod diff;
pub mod display;
pub mod page;

use serde::{Deserialize, Serialize};

use crate::order::OrderSnapshot;

pub use diff::{
    ChangeKind, ConsolidatedDiff, DeliveryField, FieldChange, FieldValue, ItemChangeCategory,
    ItemDiff, ModifiedItem, OrderField,
};
pub use display::{
    ActorIdentity, ActorInfo, EnrichedChangeRecord, FormattedChanges, FormattedEntry,
    FormattedSection, SectionKind,
};
pub use page::{HistoryPage, HistoryPageRequest};

/// Kind of mutation that produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeOperation {
    Insert,
    Update,
    Delete,
}

impl ChangeOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for ChangeOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChangeOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INSERT" => Ok(Self::Insert),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!("unknown change operation: {other}")),
        }
    }
}

/// Order change record (immutable)
///
/// `snapshot` is always the post-image of the operation. `diff` is `None`
/// only for an UPDATE without changes, and such records are never written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    /// Snowflake id
    pub id: i64,
    pub operation: ChangeOperation,
    pub order_id: String,
    pub actor_id: String,
    /// Unix millis
    pub timestamp: i64,
    pub diff: Option<ConsolidatedDiff>,
    pub snapshot: OrderSnapshot,
}

//! Read-side history types: resolved actors and the localized display tree

use serde::{Deserialize, Serialize};

use super::ChangeRecord;
use super::diff::ChangeKind;

/// Actor as returned by the actor directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActorIdentity {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl ActorIdentity {
    /// "First Last", falling back to the username when both are blank
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Actor attached to an enriched record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActorInfo {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// false when the actor could not be resolved
    pub resolved: bool,
}

impl ActorInfo {
    /// Placeholder for an actor that could not be resolved
    pub fn unknown(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            username: None,
            resolved: false,
        }
    }
}

impl From<ActorIdentity> for ActorInfo {
    fn from(identity: ActorIdentity) -> Self {
        Self {
            name: identity.display_name(),
            id: identity.id,
            username: Some(identity.username),
            resolved: true,
        }
    }
}

/// Change record plus resolved actor and rendered changes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedChangeRecord {
    #[serde(flatten)]
    pub record: ChangeRecord,
    pub actor: ActorInfo,
    pub formatted_changes: FormattedChanges,
}

/// Display tree for one record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormattedChanges {
    /// One-line summary ("Pedido actualizado")
    pub summary: String,
    pub sections: Vec<FormattedSection>,
}

impl FormattedChanges {
    pub fn section(&self, kind: SectionKind) -> Option<&FormattedSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// Section grouping of the display tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Order,
    DeliveryInfo,
    AddedItems,
    ModifiedItems,
    RemovedItems,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormattedSection {
    pub kind: SectionKind,
    pub title: String,
    pub entries: Vec<FormattedEntry>,
}

/// One rendered line of a section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormattedEntry {
    /// Scalar field change
    #[serde(rename_all = "camelCase")]
    Field {
        field: String,
        label: String,
        kind: ChangeKind,
        before: Option<String>,
        after: Option<String>,
        text: String,
    },
    /// Added or removed item
    #[serde(rename_all = "camelCase")]
    Item { id: String, description: String },
    /// Modified item with one line per changed aspect
    #[serde(rename_all = "camelCase")]
    ModifiedItem {
        id: String,
        before: String,
        after: String,
        changes: Vec<String>,
    },
}

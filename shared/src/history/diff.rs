//! Typed order diff
//!
//! Every compared field is an enum member, so adding a tracked field forces
//! every consumer match to handle it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::order::{DeliveryInfoSnapshot, ItemSnapshot, OrderSnapshot, OrderStatus, OrderType};

// ============================================================================
// Field values
// ============================================================================

/// Value of one tracked scalar field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FieldValue {
    Text(String),
    Status(OrderStatus),
    OrderType(OrderType),
    /// Unix millis
    Timestamp(i64),
    Flag(bool),
}

impl FieldValue {
    /// Text value; blank strings count as absent
    pub fn text(value: Option<&str>) -> Option<Self> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Self::Text(v.to_string()))
    }
}

/// How a field moved between two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// empty → populated
    Added,
    /// populated → empty
    Removed,
    /// populated → different populated
    Changed,
}

/// One changed scalar field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldChange<F> {
    pub field: F,
    pub kind: ChangeKind,
    #[serde(rename = "anterior")]
    pub before: Option<FieldValue>,
    #[serde(rename = "nuevo")]
    pub after: Option<FieldValue>,
}

// ============================================================================
// Order fields
// ============================================================================

/// Tracked order-level fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderField {
    Status,
    #[serde(rename = "type")]
    OrderType,
    Notes,
    TableId,
    CustomerId,
    ScheduledAt,
    EstimatedDeliveryTime,
    IsFromWhatsapp,
}

impl OrderField {
    /// Allow-list, in display order
    pub const ALL: [OrderField; 8] = [
        OrderField::Status,
        OrderField::OrderType,
        OrderField::Notes,
        OrderField::TableId,
        OrderField::CustomerId,
        OrderField::ScheduledAt,
        OrderField::EstimatedDeliveryTime,
        OrderField::IsFromWhatsapp,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::OrderType => "type",
            Self::Notes => "notes",
            Self::TableId => "tableId",
            Self::CustomerId => "customerId",
            Self::ScheduledAt => "scheduledAt",
            Self::EstimatedDeliveryTime => "estimatedDeliveryTime",
            Self::IsFromWhatsapp => "isFromWhatsapp",
        }
    }

    /// Read this field from a snapshot (`None` = empty)
    pub fn value_of(&self, snapshot: &OrderSnapshot) -> Option<FieldValue> {
        match self {
            Self::Status => Some(FieldValue::Status(snapshot.status)),
            Self::OrderType => Some(FieldValue::OrderType(snapshot.order_type)),
            Self::Notes => FieldValue::text(snapshot.notes.as_deref()),
            Self::TableId => FieldValue::text(snapshot.table_id.as_deref()),
            Self::CustomerId => FieldValue::text(snapshot.customer_id.as_deref()),
            Self::ScheduledAt => snapshot.scheduled_at.map(FieldValue::Timestamp),
            Self::EstimatedDeliveryTime => {
                snapshot.estimated_delivery_time.map(FieldValue::Timestamp)
            }
            Self::IsFromWhatsapp => Some(FieldValue::Flag(snapshot.is_from_whatsapp)),
        }
    }
}

/// Tracked delivery info sub-fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryField {
    RecipientName,
    RecipientPhone,
    FullAddress,
    DeliveryInstructions,
}

impl DeliveryField {
    pub const ALL: [DeliveryField; 4] = [
        DeliveryField::RecipientName,
        DeliveryField::RecipientPhone,
        DeliveryField::FullAddress,
        DeliveryField::DeliveryInstructions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RecipientName => "recipientName",
            Self::RecipientPhone => "recipientPhone",
            Self::FullAddress => "fullAddress",
            Self::DeliveryInstructions => "deliveryInstructions",
        }
    }

    pub fn value_of(&self, info: &DeliveryInfoSnapshot) -> Option<FieldValue> {
        let raw = match self {
            Self::RecipientName => info.recipient_name.as_deref(),
            Self::RecipientPhone => info.recipient_phone.as_deref(),
            Self::FullAddress => info.full_address.as_deref(),
            Self::DeliveryInstructions => info.delivery_instructions.as_deref(),
        };
        FieldValue::text(raw)
    }
}

// ============================================================================
// Items
// ============================================================================

/// Semantic aspect of a line item that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemChangeCategory {
    Product,
    Variant,
    Price,
    Modifiers,
    Customizations,
    Notes,
    PreparationStatus,
}

/// Item present in both versions with at least one classified change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedItem {
    pub id: String,
    pub before: ItemSnapshot,
    pub after: ItemSnapshot,
    pub changes: BTreeSet<ItemChangeCategory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemDiff {
    #[serde(default)]
    pub added: Vec<ItemSnapshot>,
    #[serde(default)]
    pub modified: Vec<ModifiedItem>,
    #[serde(default)]
    pub removed: Vec<ItemSnapshot>,
}

impl ItemDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }
}

// ============================================================================
// Consolidated
// ============================================================================

/// Diff between two order snapshots (or none and one)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedDiff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<FieldChange<OrderField>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delivery_info: Vec<FieldChange<DeliveryField>>,
    #[serde(default, skip_serializing_if = "ItemDiff::is_empty")]
    pub items: ItemDiff,
}

impl ConsolidatedDiff {
    pub fn is_empty(&self) -> bool {
        self.order.is_empty() && self.delivery_info.is_empty() && self.items.is_empty()
    }

    /// Change recorded for an order field, if any
    pub fn order_change(&self, field: OrderField) -> Option<&FieldChange<OrderField>> {
        self.order.iter().find(|c| c.field == field)
    }

    /// Change recorded for a delivery field, if any
    pub fn delivery_change(&self, field: DeliveryField) -> Option<&FieldChange<DeliveryField>> {
        self.delivery_info.iter().find(|c| c.field == field)
    }
}

//! Order history snapshot
//!
//! A snapshot is the plain, denormalized copy of an order aggregate taken for
//! one tracked mutation. Names of products, variants and modifiers are copied
//! in so the history stays readable after those entities are renamed or
//! deleted. Timestamps are Unix milliseconds.

use serde::{Deserialize, Serialize};

use super::types::{OrderStatus, OrderType, PreparationStatus};

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Order snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    /// Snapshot schema version
    pub version: u32,
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Scheduled time (Unix millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<i64>,
    /// Estimated delivery time (Unix millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_time: Option<i64>,
    #[serde(default)]
    pub is_from_whatsapp: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_info: Option<DeliveryInfoSnapshot>,
    #[serde(default)]
    pub items: Vec<ItemSnapshot>,
}

impl OrderSnapshot {
    /// Find an item by its stable id
    pub fn item(&self, id: &str) -> Option<&ItemSnapshot> {
        self.items.iter().find(|i| i.id == id)
    }
}

/// Delivery info snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfoSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_instructions: Option<String>,
}

impl DeliveryInfoSnapshot {
    pub fn is_empty(&self) -> bool {
        self.recipient_name.is_none()
            && self.recipient_phone.is_none()
            && self.full_address.is_none()
            && self.delivery_instructions.is_none()
    }
}

/// Line item snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemSnapshot {
    /// Stable item id
    pub id: String,
    pub product_id: String,
    /// Product name at the time of the snapshot
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_name: Option<String>,
    pub base_price: f64,
    pub final_price: f64,
    pub preparation_status: PreparationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preparation_notes: Option<String>,
    /// Modifier names, in selection order
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Formatted pizza customization strings
    #[serde(default)]
    pub customizations: Vec<String>,
}

impl ItemSnapshot {
    /// Name shown in the history: variant name when present, product name otherwise
    pub fn display_name(&self) -> &str {
        self.variant_name.as_deref().unwrap_or(&self.product_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ItemSnapshot {
        ItemSnapshot {
            id: "1".to_string(),
            product_id: "p-1".to_string(),
            product_name: "Pizza".to_string(),
            variant_id: None,
            variant_name: None,
            base_price: 150.0,
            final_price: 150.0,
            preparation_status: PreparationStatus::Pending,
            preparation_notes: None,
            modifiers: vec![],
            customizations: vec![],
        }
    }

    #[test]
    fn test_display_name_prefers_variant() {
        let mut item = item();
        assert_eq!(item.display_name(), "Pizza");
        item.variant_name = Some("Pizza Grande".to_string());
        assert_eq!(item.display_name(), "Pizza Grande");
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = OrderSnapshot {
            version: SNAPSHOT_VERSION,
            order_id: "ord-1".to_string(),
            status: OrderStatus::Pending,
            order_type: OrderType::Delivery,
            notes: None,
            table_id: None,
            customer_id: Some("c-9".to_string()),
            scheduled_at: None,
            estimated_delivery_time: Some(1_700_000_000_000),
            is_from_whatsapp: true,
            delivery_info: None,
            items: vec![item()],
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["type"], "DELIVERY");
        assert_eq!(json["customerId"], "c-9");
        assert_eq!(json["isFromWhatsapp"], true);
        assert_eq!(json["items"][0]["productName"], "Pizza");
        assert!(json.get("notes").is_none());

        let back: OrderSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}

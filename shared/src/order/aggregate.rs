//! Hydrated order aggregate
//!
//! This is the input handed over by the order service on every tracked
//! mutation: the order plus its line items with product, variant, modifier
//! and pizza customization relations already loaded. Relations are `Option`
//! because the loader may fail to resolve them; the snapshot builder treats a
//! missing required relation as a serialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{
    CustomizationAction, CustomizationType, OrderStatus, OrderType, PizzaHalf, PreparationStatus,
};

/// Order with all relations resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderAggregate {
    pub id: String,
    pub status: OrderStatus,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub notes: Option<String>,
    pub table_id: Option<String>,
    pub customer_id: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_from_whatsapp: bool,
    pub delivery_info: Option<DeliveryInfo>,
    #[serde(default)]
    pub items: Vec<OrderItemAggregate>,
}

impl OrderAggregate {
    /// Empty dine-in order in `PENDING` status
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: OrderStatus::Pending,
            order_type: OrderType::DineIn,
            notes: None,
            table_id: None,
            customer_id: None,
            scheduled_at: None,
            estimated_delivery_time: None,
            is_from_whatsapp: false,
            delivery_info: None,
            items: Vec::new(),
        }
    }

    /// Find an item by its stable id
    pub fn item(&self, id: &str) -> Option<&OrderItemAggregate> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Mutable access to an item by its stable id
    pub fn item_mut(&mut self, id: &str) -> Option<&mut OrderItemAggregate> {
        self.items.iter_mut().find(|i| i.id == id)
    }
}

/// Delivery address and contact
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfo {
    pub recipient_name: Option<String>,
    pub recipient_phone: Option<String>,
    pub full_address: Option<String>,
    pub delivery_instructions: Option<String>,
}

/// Line item with its relations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemAggregate {
    /// Stable across the whole item lifecycle
    pub id: String,
    pub product_id: String,
    pub product: Option<ProductRef>,
    pub variant_id: Option<String>,
    pub variant: Option<VariantRef>,
    pub base_price: f64,
    pub final_price: f64,
    #[serde(default)]
    pub preparation_status: PreparationStatus,
    pub preparation_notes: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<ItemModifier>,
    #[serde(default)]
    pub pizza_customizations: Vec<PizzaCustomizationSelection>,
}

impl OrderItemAggregate {
    /// Item for `product` at a flat price, no variant or extras
    pub fn new(id: impl Into<String>, product: ProductRef, price: f64) -> Self {
        Self {
            id: id.into(),
            product_id: product.id.clone(),
            product: Some(product),
            variant_id: None,
            variant: None,
            base_price: price,
            final_price: price,
            preparation_status: PreparationStatus::Pending,
            preparation_notes: None,
            modifiers: Vec::new(),
            pizza_customizations: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: VariantRef) -> Self {
        self.variant_id = Some(variant.id.clone());
        self.variant = Some(variant);
        self
    }

    pub fn with_modifier(mut self, modifier: ModifierRef) -> Self {
        self.modifiers.push(ItemModifier::resolved(modifier));
        self
    }

    pub fn with_customization(mut self, selection: PizzaCustomizationSelection) -> Self {
        self.pizza_customizations.push(selection);
        self
    }
}

/// Product relation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: String,
    pub name: String,
}

impl ProductRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Product variant relation (size, presentation ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariantRef {
    pub id: String,
    pub name: String,
}

impl VariantRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Modifier selected on an item (join row + resolved relation)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemModifier {
    pub modifier_id: String,
    pub modifier: Option<ModifierRef>,
}

impl ItemModifier {
    pub fn resolved(modifier: ModifierRef) -> Self {
        Self {
            modifier_id: modifier.id.clone(),
            modifier: Some(modifier),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModifierRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
}

impl ModifierRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: 0.0,
        }
    }
}

/// Pizza customization selected on an item (join row + resolved relation)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PizzaCustomizationSelection {
    pub pizza_customization_id: String,
    pub half: PizzaHalf,
    pub action: CustomizationAction,
    pub customization: Option<PizzaCustomizationRef>,
}

impl PizzaCustomizationSelection {
    pub fn resolved(
        half: PizzaHalf,
        action: CustomizationAction,
        customization: PizzaCustomizationRef,
    ) -> Self {
        Self {
            pizza_customization_id: customization.id.clone(),
            half,
            action,
            customization: Some(customization),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PizzaCustomizationRef {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub customization_type: CustomizationType,
}

impl PizzaCustomizationRef {
    pub fn flavor(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            customization_type: CustomizationType::Flavor,
        }
    }

    pub fn ingredient(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            customization_type: CustomizationType::Ingredient,
        }
    }
}

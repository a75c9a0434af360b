//! Shared enums for orders, items and pizza customizations

use serde::{Deserialize, Serialize};

// ============================================================================
// Order
// ============================================================================

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    InPreparation,
    Ready,
    InDelivery,
    Delivered,
    Completed,
    Cancelled,
}

/// 订单类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// 堂食
    #[default]
    DineIn,
    /// 外带
    TakeAway,
    /// 外送
    Delivery,
}

// ============================================================================
// Item
// ============================================================================

/// Kitchen preparation status of a single line item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PreparationStatus {
    #[default]
    Pending,
    InProgress,
    Ready,
    Delivered,
    Cancelled,
}

// ============================================================================
// Pizza Customization
// ============================================================================

/// Which part of the pizza a selection applies to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PizzaHalf {
    Full,
    #[serde(rename = "HALF_1")]
    Half1,
    #[serde(rename = "HALF_2")]
    Half2,
}

/// Whether an ingredient is added or removed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomizationAction {
    Add,
    Remove,
}

/// Flavor (a whole recipe) or a single ingredient
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomizationType {
    Flavor,
    Ingredient,
}

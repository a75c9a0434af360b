//! 快照构建器
//!
//! 纯函数：已加载关联的订单聚合 → [`OrderSnapshot`]。
//! 商品、规格、加料的名称在此时冗余进快照，披萨定制在此时格式化为字符串，
//! 之后的比较只需比较字符串。

use shared::order::{
    DeliveryInfo, DeliveryInfoSnapshot, ItemSnapshot, OrderAggregate, OrderItemAggregate,
    OrderSnapshot, PizzaSelection, SNAPSHOT_VERSION, format_pizza_customizations,
};

use super::error::SnapshotError;
use crate::utils::time::to_millis;

/// 构建订单快照
pub fn build(order: &OrderAggregate) -> Result<OrderSnapshot, SnapshotError> {
    let items = order
        .items
        .iter()
        .map(build_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OrderSnapshot {
        version: SNAPSHOT_VERSION,
        order_id: order.id.clone(),
        status: order.status,
        order_type: order.order_type,
        notes: normalize(order.notes.as_deref()),
        table_id: normalize(order.table_id.as_deref()),
        customer_id: normalize(order.customer_id.as_deref()),
        scheduled_at: order.scheduled_at.as_ref().map(to_millis),
        estimated_delivery_time: order.estimated_delivery_time.as_ref().map(to_millis),
        is_from_whatsapp: order.is_from_whatsapp,
        delivery_info: order.delivery_info.as_ref().and_then(build_delivery_info),
        items,
    })
}

/// 全部子字段为空时视为没有配送信息
fn build_delivery_info(info: &DeliveryInfo) -> Option<DeliveryInfoSnapshot> {
    let snapshot = DeliveryInfoSnapshot {
        recipient_name: normalize(info.recipient_name.as_deref()),
        recipient_phone: normalize(info.recipient_phone.as_deref()),
        full_address: normalize(info.full_address.as_deref()),
        delivery_instructions: normalize(info.delivery_instructions.as_deref()),
    };
    (!snapshot.is_empty()).then_some(snapshot)
}

fn build_item(item: &OrderItemAggregate) -> Result<ItemSnapshot, SnapshotError> {
    let product = item
        .product
        .as_ref()
        .ok_or_else(|| SnapshotError::MissingProduct {
            item_id: item.id.clone(),
        })?;

    let variant_name = match (&item.variant_id, &item.variant) {
        (_, Some(variant)) => Some(variant.name.clone()),
        (Some(variant_id), None) => {
            return Err(SnapshotError::MissingVariant {
                item_id: item.id.clone(),
                variant_id: variant_id.clone(),
            });
        }
        (None, None) => None,
    };

    let modifiers = item
        .modifiers
        .iter()
        .map(|m| {
            m.modifier
                .as_ref()
                .map(|r| r.name.clone())
                .ok_or_else(|| SnapshotError::MissingModifier {
                    item_id: item.id.clone(),
                    modifier_id: m.modifier_id.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let selections = item
        .pizza_customizations
        .iter()
        .map(|s| {
            let customization =
                s.customization
                    .as_ref()
                    .ok_or_else(|| SnapshotError::MissingCustomization {
                        item_id: item.id.clone(),
                        customization_id: s.pizza_customization_id.clone(),
                    })?;
            Ok(PizzaSelection {
                customization_id: s.pizza_customization_id.clone(),
                half: s.half,
                action: s.action,
                customization_type: customization.customization_type,
                name: customization.name.clone(),
            })
        })
        .collect::<Result<Vec<_>, SnapshotError>>()?;

    let formatted = format_pizza_customizations(&selections);
    let customizations = if formatted.is_empty() {
        Vec::new()
    } else {
        vec![formatted]
    };

    Ok(ItemSnapshot {
        id: item.id.clone(),
        product_id: item.product_id.clone(),
        product_name: product.name.clone(),
        variant_id: item.variant_id.clone(),
        variant_name,
        base_price: item.base_price,
        final_price: item.final_price,
        preparation_status: item.preparation_status,
        preparation_notes: normalize(item.preparation_notes.as_deref()),
        modifiers,
        customizations,
    })
}

/// 去除首尾空白，空字符串视为缺失
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

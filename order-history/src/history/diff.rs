//! Diff 引擎
//!
//! 比较当前快照与上一版本快照，生成 [`ConsolidatedDiff`]：
//! - 订单字段按固定白名单比较（时间按 epoch 值）
//! - 配送信息子字段逐一比较，至少一个变化才输出
//! - 商品行按 id 建索引匹配，交由 [`classify`] 归类
//!
//! 每个字段的变化按空值转换打标签：空→有 = added，有→空 = removed，
//! 有→不同 = changed。

use std::collections::{HashMap, HashSet};

use shared::history::{
    ChangeKind, ConsolidatedDiff, DeliveryField, FieldChange, FieldValue, ItemDiff, ModifiedItem,
    OrderField,
};
use shared::order::{DeliveryInfoSnapshot, ItemSnapshot, OrderSnapshot};

use super::classifier::classify;

/// 计算 diff
///
/// - `previous == None`：新建，所有非空字段与全部商品记为新增
/// - 无任何变化时返回 `None`
pub fn diff(
    current: &OrderSnapshot,
    previous: Option<&OrderSnapshot>,
) -> Option<ConsolidatedDiff> {
    let result = match previous {
        None => ConsolidatedDiff {
            order: OrderField::ALL
                .iter()
                .filter_map(|f| compare(*f, None, f.value_of(current)))
                .collect(),
            delivery_info: diff_delivery(None, current.delivery_info.as_ref()),
            items: ItemDiff {
                added: current.items.clone(),
                ..Default::default()
            },
        },
        Some(previous) => ConsolidatedDiff {
            order: OrderField::ALL
                .iter()
                .filter_map(|f| compare(*f, f.value_of(previous), f.value_of(current)))
                .collect(),
            delivery_info: diff_delivery(
                previous.delivery_info.as_ref(),
                current.delivery_info.as_ref(),
            ),
            items: diff_items(&previous.items, &current.items),
        },
    };

    (!result.is_empty()).then_some(result)
}

/// 删除订单时的 diff：所有非空字段记为移除，全部商品记为移除
pub fn diff_removal(last: &OrderSnapshot) -> ConsolidatedDiff {
    ConsolidatedDiff {
        order: OrderField::ALL
            .iter()
            .filter_map(|f| compare(*f, f.value_of(last), None))
            .collect(),
        delivery_info: diff_delivery(last.delivery_info.as_ref(), None),
        items: ItemDiff {
            removed: last.items.clone(),
            ..Default::default()
        },
    }
}

/// 按空值转换归类单个字段
fn compare<F>(
    field: F,
    before: Option<FieldValue>,
    after: Option<FieldValue>,
) -> Option<FieldChange<F>> {
    let kind = match (&before, &after) {
        (None, None) => return None,
        (None, Some(_)) => ChangeKind::Added,
        (Some(_), None) => ChangeKind::Removed,
        (Some(a), Some(b)) if a == b => return None,
        (Some(_), Some(_)) => ChangeKind::Changed,
    };
    Some(FieldChange {
        field,
        kind,
        before,
        after,
    })
}

fn diff_delivery(
    before: Option<&DeliveryInfoSnapshot>,
    after: Option<&DeliveryInfoSnapshot>,
) -> Vec<FieldChange<DeliveryField>> {
    let empty = DeliveryInfoSnapshot::default();
    let before = before.unwrap_or(&empty);
    let after = after.unwrap_or(&empty);

    DeliveryField::ALL
        .iter()
        .filter_map(|f| compare(*f, f.value_of(before), f.value_of(after)))
        .collect()
}

/// 商品行匹配 (O(n))
///
/// 新增/修改按当前顺序，移除按上一版本顺序。
fn diff_items(previous: &[ItemSnapshot], current: &[ItemSnapshot]) -> ItemDiff {
    let previous_by_id: HashMap<&str, &ItemSnapshot> =
        previous.iter().map(|i| (i.id.as_str(), i)).collect();
    let current_ids: HashSet<&str> = current.iter().map(|i| i.id.as_str()).collect();

    let mut result = ItemDiff::default();
    for item in current {
        match previous_by_id.get(item.id.as_str()) {
            None => result.added.push(item.clone()),
            Some(before) => {
                let changes = classify(before, item);
                if !changes.is_empty() {
                    result.modified.push(ModifiedItem {
                        id: item.id.clone(),
                        before: (*before).clone(),
                        after: item.clone(),
                        changes,
                    });
                }
            }
        }
    }
    result.removed = previous
        .iter()
        .filter(|i| !current_ids.contains(i.id.as_str()))
        .cloned()
        .collect();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::history::ItemChangeCategory;
    use shared::order::{OrderStatus, OrderType, PreparationStatus, SNAPSHOT_VERSION};

    fn item(id: &str, name: &str, price: f64) -> ItemSnapshot {
        ItemSnapshot {
            id: id.to_string(),
            product_id: format!("p-{id}"),
            product_name: name.to_string(),
            variant_id: None,
            variant_name: None,
            base_price: price,
            final_price: price,
            preparation_status: PreparationStatus::Pending,
            preparation_notes: None,
            modifiers: Vec::new(),
            customizations: Vec::new(),
        }
    }

    fn order() -> OrderSnapshot {
        OrderSnapshot {
            version: SNAPSHOT_VERSION,
            order_id: "o-1".to_string(),
            status: OrderStatus::Pending,
            order_type: OrderType::DineIn,
            notes: None,
            table_id: Some("t-4".to_string()),
            customer_id: None,
            scheduled_at: None,
            estimated_delivery_time: None,
            is_from_whatsapp: false,
            delivery_info: None,
            items: vec![item("1", "Hamburguesa", 120.0), item("2", "Papas", 45.0)],
        }
    }

    #[test]
    fn test_identical_snapshots_have_no_diff() {
        assert_eq!(diff(&order(), Some(&order())), None);
    }

    #[test]
    fn test_insert_adds_everything_populated() {
        let current = order();
        let result = diff(&current, None).unwrap();

        assert_eq!(result.items.added, current.items);
        assert!(result.items.modified.is_empty());
        assert!(result.items.removed.is_empty());
        assert!(
            result
                .order
                .iter()
                .all(|c| c.kind == ChangeKind::Added && c.before.is_none())
        );

        let fields: Vec<OrderField> = result.order.iter().map(|c| c.field).collect();
        assert_eq!(
            fields,
            vec![
                OrderField::Status,
                OrderField::OrderType,
                OrderField::TableId,
                OrderField::IsFromWhatsapp,
            ]
        );
        assert!(result.delivery_info.is_empty());
    }

    #[test]
    fn test_transition_labels() {
        let mut before = order();
        let mut after = order();
        after.notes = Some("v".to_string());
        let result = diff(&after, Some(&before)).unwrap();
        let change = result.order_change(OrderField::Notes).unwrap();
        assert_eq!(change.kind, ChangeKind::Added);

        before.notes = Some("v".to_string());
        after.notes = None;
        let result = diff(&after, Some(&before)).unwrap();
        let change = result.order_change(OrderField::Notes).unwrap();
        assert_eq!(change.kind, ChangeKind::Removed);
        assert_eq!(change.after, None);

        before.notes = Some("a".to_string());
        after.notes = Some("b".to_string());
        let result = diff(&after, Some(&before)).unwrap();
        let change = result.order_change(OrderField::Notes).unwrap();
        assert_eq!(change.kind, ChangeKind::Changed);
        assert_eq!(change.before, Some(FieldValue::Text("a".to_string())));
        assert_eq!(change.after, Some(FieldValue::Text("b".to_string())));
    }

    #[test]
    fn test_dates_compare_by_epoch() {
        let mut before = order();
        let mut after = order();
        before.scheduled_at = Some(1_710_527_400_000);
        after.scheduled_at = Some(1_710_527_400_000);
        assert_eq!(diff(&after, Some(&before)), None);

        after.scheduled_at = Some(1_710_531_000_000);
        let result = diff(&after, Some(&before)).unwrap();
        assert_eq!(
            result.order_change(OrderField::ScheduledAt).map(|c| c.kind),
            Some(ChangeKind::Changed)
        );
    }

    #[test]
    fn test_delivery_info_sub_fields() {
        let before = order();
        let mut after = order();
        after.delivery_info = Some(DeliveryInfoSnapshot {
            full_address: Some("Av. Juárez 12".to_string()),
            ..Default::default()
        });
        let result = diff(&after, Some(&before)).unwrap();
        assert_eq!(result.delivery_info.len(), 1);
        assert_eq!(result.delivery_info[0].field, DeliveryField::FullAddress);
        assert_eq!(result.delivery_info[0].kind, ChangeKind::Added);
        assert!(result.order.is_empty());
    }

    #[test]
    fn test_items_matched_by_id() {
        let before = order();
        let mut after = order();
        after.items[0].modifiers.push("Extra queso".to_string());
        after.items.remove(1);
        after.items.push(item("3", "Refresco", 25.0));

        let result = diff(&after, Some(&before)).unwrap();
        assert_eq!(result.items.added.len(), 1);
        assert_eq!(result.items.added[0].id, "3");
        assert_eq!(result.items.removed.len(), 1);
        assert_eq!(result.items.removed[0].id, "2");
        assert_eq!(result.items.modified.len(), 1);

        let modified = &result.items.modified[0];
        assert_eq!(modified.id, "1");
        assert_eq!(modified.before.id, modified.after.id);
        assert!(modified.changes.contains(&ItemChangeCategory::Modifiers));
    }

    #[test]
    fn test_reordered_items_are_not_changes() {
        let before = order();
        let mut after = order();
        after.items.reverse();
        assert_eq!(diff(&after, Some(&before)), None);
    }

    #[test]
    fn test_removal_diff_mirrors_insert() {
        let last = order();
        let result = diff_removal(&last);
        assert_eq!(result.items.removed, last.items);
        assert!(result.items.added.is_empty());
        assert!(
            result
                .order
                .iter()
                .all(|c| c.kind == ChangeKind::Removed && c.after.is_none())
        );
        assert_eq!(result.order.len(), diff(&last, None).unwrap().order.len());
    }
}

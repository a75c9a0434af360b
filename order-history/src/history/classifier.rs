//! 商品行变更分类
//!
//! 比较同一 id 的两个商品快照，返回发生变化的语义类别集合。空集表示未变化。

use std::collections::BTreeSet;

use shared::history::ItemChangeCategory;
use shared::order::ItemSnapshot;

/// 价格比较容差
pub const PRICE_TOLERANCE: f64 = 0.01;

/// 归类商品行变化
pub fn classify(before: &ItemSnapshot, after: &ItemSnapshot) -> BTreeSet<ItemChangeCategory> {
    let mut changes = BTreeSet::new();

    if before.product_id != after.product_id || before.product_name != after.product_name {
        changes.insert(ItemChangeCategory::Product);
    }
    if before.variant_id != after.variant_id || before.variant_name != after.variant_name {
        changes.insert(ItemChangeCategory::Variant);
    }
    if (after.final_price - before.final_price).abs() > PRICE_TOLERANCE {
        changes.insert(ItemChangeCategory::Price);
    }
    if !same_elements(&before.modifiers, &after.modifiers) {
        changes.insert(ItemChangeCategory::Modifiers);
    }
    if !same_elements(&before.customizations, &after.customizations) {
        changes.insert(ItemChangeCategory::Customizations);
    }
    if before.preparation_notes != after.preparation_notes {
        changes.insert(ItemChangeCategory::Notes);
    }
    if before.preparation_status != after.preparation_status {
        changes.insert(ItemChangeCategory::PreparationStatus);
    }

    changes
}

/// 顺序无关的列表比较
fn same_elements(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a: Vec<&String> = a.iter().collect();
    let mut b: Vec<&String> = b.iter().collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

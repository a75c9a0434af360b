//! 历史格式化 / 丰富
//!
//! 读取时把 [`ChangeRecord`] 转换为 [`EnrichedChangeRecord`]：
//! 1. 当前页所有操作人 id 去重后一次批量查询
//! 2. diff 渲染为本地化展示树 (summary + sections)
//!
//! 操作人查询失败不影响整页返回，只把对应记录的操作人标记为未知。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono_tz::Tz;
use shared::history::{
    ActorInfo, ChangeKind, ChangeRecord, ConsolidatedDiff, EnrichedChangeRecord, FieldChange,
    FieldValue, FormattedChanges, FormattedEntry, FormattedSection, ItemChangeCategory,
    ModifiedItem, SectionKind,
};
use shared::order::ItemSnapshot;

use super::actors::ActorDirectory;
use super::labels;
use crate::core::Config;
use crate::utils::time::format_millis;

/// 历史格式化器
#[derive(Clone)]
pub struct HistoryFormatter {
    directory: Arc<dyn ActorDirectory>,
    timezone: Tz,
    currency_symbol: String,
}

impl std::fmt::Debug for HistoryFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryFormatter")
            .field("timezone", &self.timezone)
            .field("currency_symbol", &self.currency_symbol)
            .finish_non_exhaustive()
    }
}

impl HistoryFormatter {
    pub fn new(
        directory: Arc<dyn ActorDirectory>,
        timezone: Tz,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            timezone,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn from_config(directory: Arc<dyn ActorDirectory>, config: &Config) -> Self {
        Self::new(directory, config.timezone, config.currency_symbol.clone())
    }

    /// 丰富一页记录（顺序不变，条数不变）
    pub async fn enrich(&self, records: Vec<ChangeRecord>) -> Vec<EnrichedChangeRecord> {
        let actors = self.resolve_actors(&records).await;

        records
            .into_iter()
            .map(|record| {
                let actor = actors
                    .get(&record.actor_id)
                    .cloned()
                    .unwrap_or_else(|| {
                        ActorInfo::unknown(&record.actor_id, labels::UNKNOWN_ACTOR)
                    });
                let formatted_changes = self.format_changes(&record);
                EnrichedChangeRecord {
                    record,
                    actor,
                    formatted_changes,
                }
            })
            .collect()
    }

    /// 一次批量查询；失败时返回空表
    async fn resolve_actors(&self, records: &[ChangeRecord]) -> HashMap<String, ActorInfo> {
        let mut seen = HashSet::new();
        let ids: Vec<String> = records
            .iter()
            .filter(|r| seen.insert(r.actor_id.as_str()))
            .map(|r| r.actor_id.clone())
            .collect();
        if ids.is_empty() {
            return HashMap::new();
        }

        match self.directory.find_by_ids(&ids).await {
            Ok(found) => {
                if found.len() < ids.len() {
                    tracing::debug!(
                        requested = ids.len(),
                        resolved = found.len(),
                        "Some history actors could not be resolved"
                    );
                }
                found
                    .into_iter()
                    .map(|identity| (identity.id.clone(), ActorInfo::from(identity)))
                    .collect()
            }
            Err(e) => {
                tracing::warn!(actors = ids.len(), "Actor lookup failed: {}", e);
                HashMap::new()
            }
        }
    }

    /// 渲染单条记录的展示树
    pub fn format_changes(&self, record: &ChangeRecord) -> FormattedChanges {
        FormattedChanges {
            summary: labels::operation_summary(record.operation).to_string(),
            sections: record
                .diff
                .as_ref()
                .map(|diff| self.format_sections(diff))
                .unwrap_or_default(),
        }
    }

    fn format_sections(&self, diff: &ConsolidatedDiff) -> Vec<FormattedSection> {
        let order: Vec<FormattedEntry> = diff
            .order
            .iter()
            .map(|c| self.field_entry(c, c.field.as_str(), labels::order_field(c.field)))
            .collect();
        let delivery: Vec<FormattedEntry> = diff
            .delivery_info
            .iter()
            .map(|c| self.field_entry(c, c.field.as_str(), labels::delivery_field(c.field)))
            .collect();
        let added: Vec<FormattedEntry> =
            diff.items.added.iter().map(|i| self.item_entry(i)).collect();
        let modified: Vec<FormattedEntry> = diff
            .items
            .modified
            .iter()
            .map(|m| self.modified_entry(m))
            .collect();
        let removed: Vec<FormattedEntry> =
            diff.items.removed.iter().map(|i| self.item_entry(i)).collect();

        [
            (SectionKind::Order, order),
            (SectionKind::DeliveryInfo, delivery),
            (SectionKind::AddedItems, added),
            (SectionKind::ModifiedItems, modified),
            (SectionKind::RemovedItems, removed),
        ]
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(kind, entries)| FormattedSection {
            kind,
            title: labels::section_title(kind).to_string(),
            entries,
        })
        .collect()
    }

    fn field_entry<F>(&self, change: &FieldChange<F>, key: &str, label: &str) -> FormattedEntry {
        let before = change.before.as_ref().map(|v| self.render_value(v));
        let after = change.after.as_ref().map(|v| self.render_value(v));
        let text = match change.kind {
            ChangeKind::Added => format!("Se agregó {label}: {}", after.as_deref().unwrap_or("")),
            ChangeKind::Removed => {
                format!("Se eliminó {label} (antes: {})", before.as_deref().unwrap_or(""))
            }
            ChangeKind::Changed => format!(
                "{label} cambió de {} a {}",
                before.as_deref().unwrap_or(""),
                after.as_deref().unwrap_or("")
            ),
        };
        FormattedEntry::Field {
            field: key.to_string(),
            label: label.to_string(),
            kind: change.kind,
            before,
            after,
            text,
        }
    }

    fn render_value(&self, value: &FieldValue) -> String {
        match value {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Status(status) => labels::order_status(*status).to_string(),
            FieldValue::OrderType(order_type) => labels::order_type(*order_type).to_string(),
            FieldValue::Timestamp(ts) => {
                format_millis(*ts, self.timezone).unwrap_or_else(|| ts.to_string())
            }
            FieldValue::Flag(flag) => labels::boolean(*flag).to_string(),
        }
    }

    fn item_entry(&self, item: &ItemSnapshot) -> FormattedEntry {
        FormattedEntry::Item {
            id: item.id.clone(),
            description: describe_item(item),
        }
    }

    fn modified_entry(&self, item: &ModifiedItem) -> FormattedEntry {
        FormattedEntry::ModifiedItem {
            id: item.id.clone(),
            before: describe_item(&item.before),
            after: describe_item(&item.after),
            changes: item
                .changes
                .iter()
                .map(|c| self.change_line(*c, &item.before, &item.after))
                .collect(),
        }
    }

    /// "Precio: $10.00 → $12.00"
    fn change_line(
        &self,
        category: ItemChangeCategory,
        before: &ItemSnapshot,
        after: &ItemSnapshot,
    ) -> String {
        let (from, to) = match category {
            ItemChangeCategory::Product => {
                (before.product_name.clone(), after.product_name.clone())
            }
            ItemChangeCategory::Variant => (
                or_placeholder(before.variant_name.as_deref(), labels::NO_VARIANT),
                or_placeholder(after.variant_name.as_deref(), labels::NO_VARIANT),
            ),
            ItemChangeCategory::Price => (
                labels::money(before.final_price, &self.currency_symbol),
                labels::money(after.final_price, &self.currency_symbol),
            ),
            ItemChangeCategory::Modifiers => (
                join_or(&before.modifiers, labels::NO_MODIFIERS),
                join_or(&after.modifiers, labels::NO_MODIFIERS),
            ),
            ItemChangeCategory::Customizations => (
                join_or(&before.customizations, labels::NO_CUSTOMIZATION),
                join_or(&after.customizations, labels::NO_CUSTOMIZATION),
            ),
            ItemChangeCategory::Notes => (
                or_placeholder(before.preparation_notes.as_deref(), labels::NO_NOTES),
                or_placeholder(after.preparation_notes.as_deref(), labels::NO_NOTES),
            ),
            ItemChangeCategory::PreparationStatus => (
                labels::preparation_status(before.preparation_status).to_string(),
                labels::preparation_status(after.preparation_status).to_string(),
            ),
        };
        format!("{}: {from} → {to}", labels::item_category(category))
    }
}

/// `<variante ?? producto>[ - Modificadores: a, b][ (personalización)][ - Notas: ...]`
pub fn describe_item(item: &ItemSnapshot) -> String {
    let mut description = item.display_name().to_string();
    if !item.modifiers.is_empty() {
        description.push_str(" - Modificadores: ");
        description.push_str(&item.modifiers.join(", "));
    }
    if !item.customizations.is_empty() {
        description.push_str(&format!(" ({})", item.customizations.join(", ")));
    }
    if let Some(notes) = &item.preparation_notes {
        description.push_str(" - Notas: ");
        description.push_str(notes);
    }
    description
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value.unwrap_or(placeholder).to_string()
}

fn join_or(values: &[String], placeholder: &str) -> String {
    if values.is_empty() {
        placeholder.to_string()
    } else {
        values.join(", ")
    }
}

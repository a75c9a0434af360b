//! Pizza customization formatting
//!
//! Flattens half/flavor/ingredient selections into one compact string such as
//! `"Hawaiana / Mexicana - con Chile"`. The snapshot builder stores this string
//! on the item so later comparisons are plain string comparisons.

use serde::{Deserialize, Serialize};

use super::types::{CustomizationAction, CustomizationType, PizzaHalf};

/// Halves are rendered in this order, joined with `" / "`
const HALVES: [PizzaHalf; 2] = [PizzaHalf::Half1, PizzaHalf::Half2];

/// One resolved customization selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PizzaSelection {
    pub customization_id: String,
    pub half: PizzaHalf,
    pub action: CustomizationAction,
    #[serde(rename = "type")]
    pub customization_type: CustomizationType,
    pub name: String,
}

impl PizzaSelection {
    pub fn flavor(half: PizzaHalf, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            customization_id: name.to_lowercase(),
            half,
            action: CustomizationAction::Add,
            customization_type: CustomizationType::Flavor,
            name,
        }
    }

    pub fn ingredient(half: PizzaHalf, action: CustomizationAction, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            customization_id: name.to_lowercase(),
            half,
            action,
            customization_type: CustomizationType::Ingredient,
            name,
        }
    }
}

/// Format a pizza's selections
///
/// A non-empty `FULL` group is the whole result; otherwise both halves are
/// formatted independently and joined with `" / "`. No selections yields `""`.
pub fn format_pizza_customizations(selections: &[PizzaSelection]) -> String {
    let full = format_half(selections, PizzaHalf::Full);
    if !full.is_empty() {
        return full;
    }

    HALVES
        .iter()
        .map(|half| format_half(selections, *half))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Format the selections of one half: flavors, then `con ...`, then `sin ...`
fn format_half(selections: &[PizzaSelection], half: PizzaHalf) -> String {
    let mut flavors = Vec::new();
    let mut added = Vec::new();
    let mut removed = Vec::new();

    for selection in selections.iter().filter(|s| s.half == half) {
        let name = selection.name.trim();
        if name.is_empty() {
            continue;
        }
        match (selection.customization_type, selection.action) {
            (CustomizationType::Flavor, _) => flavors.push(name),
            (CustomizationType::Ingredient, CustomizationAction::Add) => added.push(name),
            (CustomizationType::Ingredient, CustomizationAction::Remove) => removed.push(name),
        }
    }

    let mut parts = Vec::with_capacity(3);
    if !flavors.is_empty() {
        parts.push(flavors.join(" - "));
    }
    if !added.is_empty() {
        parts.push(format!("con {}", added.join(", ")));
    }
    if !removed.is_empty() {
        parts.push(format!("sin {}", removed.join(", ")));
    }
    parts.join(" - ")
}

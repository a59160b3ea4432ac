use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{Character, Inventory, ItemType};

pub const BASE_ENCUMBERED: f64 = 75.0;
pub const BASE_HEAVY_ENCUMBERED: f64 = 150.0;
pub const BASE_CAPACITY: f64 = 300.0;

const MIN_ENCUMBERED: f64 = 40.0;
const MIN_HEAVY_ENCUMBERED: f64 = 60.0;
const MIN_CAPACITY: f64 = 100.0;

const POTION_WEIGHT: f64 = 0.5;
const RING_WEIGHT: f64 = 0.1;
const SCROLL_WEIGHT: f64 = 0.1;
const COINS_PER_POUND: f64 = 50.0;
const HEAVIEST_SHOWN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncumbranceThresholds {
    pub base_encumbered: f64,
    pub base_heavy_encumbered: f64,
    pub maximum_capacity: f64,
}

/// (encumbered shift, capacity shift) in pounds.
fn strength_shift(strength: i32) -> (i32, i32) {
    match strength {
        i32::MIN..=6 => (-25, -100),
        7..=8 => (-15, -50),
        9..=12 => (0, 0),
        13..=14 => (15, 50),
        15..=16 => (25, 100),
        17 => (35, 150),
        _ => (50, 200),
    }
}

fn constitution_shift(constitution: i32) -> (i32, i32) {
    match constitution {
        i32::MIN..=6 => (-10, -25),
        7..=8 => (-5, -15),
        9..=12 => (0, 0),
        13..=14 => (5, 15),
        15..=16 => (10, 25),
        _ => (15, 35),
    }
}

pub fn compute_thresholds(strength: i32, constitution: i32) -> EncumbranceThresholds {
    let (str_shift, str_cap) = strength_shift(strength);
    let (con_shift, con_cap) = constitution_shift(constitution);
    let shift = (str_shift + con_shift) as f64;

    let thresholds = EncumbranceThresholds {
        base_encumbered: (BASE_ENCUMBERED + shift).max(MIN_ENCUMBERED),
        base_heavy_encumbered: (BASE_HEAVY_ENCUMBERED + 2.0 * shift).max(MIN_HEAVY_ENCUMBERED),
        maximum_capacity: (BASE_CAPACITY + (str_cap + con_cap) as f64).max(MIN_CAPACITY),
    };
    tracing::trace!(strength, constitution, ?thresholds, "encumbrance thresholds");
    thresholds
}

/// Ordered lightest to heaviest, so `>=` comparisons read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncumbranceStatus {
    Unencumbered,
    Encumbered,
    HeavilyEncumbered,
    Overloaded,
}

/// Strictly greater than each threshold moves to the next tier.
pub fn classify(current_weight: f64, thresholds: &EncumbranceThresholds) -> EncumbranceStatus {
    if current_weight > thresholds.maximum_capacity {
        EncumbranceStatus::Overloaded
    } else if current_weight > thresholds.base_heavy_encumbered {
        EncumbranceStatus::HeavilyEncumbered
    } else if current_weight > thresholds.base_encumbered {
        EncumbranceStatus::Encumbered
    } else {
        EncumbranceStatus::Unencumbered
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Penalties {
    pub movement_penalty: i32,
    pub ac_penalty: i32,
}

pub fn penalties_for(status: EncumbranceStatus) -> Penalties {
    let (movement_penalty, ac_penalty) = match status {
        EncumbranceStatus::Unencumbered => (0, 0),
        EncumbranceStatus::Encumbered => (-10, -1),
        EncumbranceStatus::HeavilyEncumbered => (-20, -2),
        EncumbranceStatus::Overloaded => (-30, -3),
    };
    Penalties {
        movement_penalty,
        ac_penalty,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub current_weight: f64,
    pub maximum_capacity: f64,
    pub weight_remaining: f64,
    pub percent_full: u32, // 0..=100
}

impl LoadSummary {
    pub fn new(current_weight: f64, thresholds: &EncumbranceThresholds) -> Self {
        let capacity = thresholds.maximum_capacity;
        let percent_full = if capacity > 0.0 {
            ((current_weight / capacity) * 100.0).clamp(0.0, 100.0) as u32
        } else {
            0
        };
        Self {
            current_weight,
            maximum_capacity: capacity,
            weight_remaining: capacity - current_weight,
            percent_full,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedItem {
    pub id: i64,
    pub name: String,
    pub item_type: ItemType,
    pub weight: f64,
    pub total_weight: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightBreakdown {
    pub total_weight: f64,
    pub weight_by_type: IndexMap<&'static str, f64>,
    pub heaviest_items: Vec<WeightedItem>,
}

fn unit_weight(item_type: ItemType, listed: f64) -> f64 {
    match item_type {
        ItemType::Potion => POTION_WEIGHT,
        ItemType::Ring => RING_WEIGHT,
        ItemType::SpellScroll => SCROLL_WEIGHT,
        _ => listed,
    }
}

/// Sum carried weight by item group, coins included.
pub fn weigh_inventory(inventory: &Inventory) -> WeightBreakdown {
    let mut weight_by_type: IndexMap<&'static str, f64> = IndexMap::new();
    let mut weighted = Vec::new();
    let mut total_weight = 0.0;

    for item in &inventory.items {
        let weight = unit_weight(item.item_type, item.details.weight);
        let item_total = weight * item.quantity as f64;
        *weight_by_type.entry(item.item_type.group()).or_insert(0.0) += item_total;
        total_weight += item_total;
        if weight > 0.0 {
            weighted.push(WeightedItem {
                id: item.id,
                name: item.details.name.clone(),
                item_type: item.item_type,
                weight,
                total_weight: item_total,
                quantity: item.quantity,
            });
        }
    }

    if let Some(treasure) = &inventory.treasure {
        let coins = treasure.total_coins() as f64 / COINS_PER_POUND;
        weight_by_type.insert("treasure", coins);
        total_weight += coins;
    }

    // Stable sort keeps inventory order among equal weights.
    weighted.sort_by(|a, b| b.total_weight.total_cmp(&a.total_weight));
    weighted.truncate(HEAVIEST_SHOWN);

    WeightBreakdown {
        total_weight,
        weight_by_type,
        heaviest_items: weighted,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncumbranceReport {
    pub thresholds: EncumbranceThresholds,
    pub status: EncumbranceStatus,
    pub load: LoadSummary,
    pub penalties: Penalties,
    #[serde(flatten)]
    pub breakdown: WeightBreakdown,
}

pub fn encumbrance_report(character: &Character, inventory: &Inventory) -> EncumbranceReport {
    let thresholds = compute_thresholds(
        character.abilities.strength,
        character.abilities.constitution,
    );
    let breakdown = weigh_inventory(inventory);
    let status = classify(breakdown.total_weight, &thresholds);
    tracing::debug!(
        character = %character.name,
        weight = breakdown.total_weight,
        ?status,
        "encumbrance"
    );
    EncumbranceReport {
        thresholds,
        status,
        load: LoadSummary::new(breakdown.total_weight, &thresholds),
        penalties: penalties_for(status),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_scores_keep_base_thresholds() {
        let t = compute_thresholds(10, 10);
        assert_eq!(t.base_encumbered, BASE_ENCUMBERED);
        assert_eq!(t.base_heavy_encumbered, BASE_HEAVY_ENCUMBERED);
        assert_eq!(t.maximum_capacity, BASE_CAPACITY);
    }

    #[test]
    fn fixed_weights_override_listed_weight() {
        assert_eq!(unit_weight(ItemType::Potion, 3.0), 0.5);
        assert_eq!(unit_weight(ItemType::Ring, 0.0), 0.1);
        assert_eq!(unit_weight(ItemType::Weapon, 4.0), 4.0);
    }
}

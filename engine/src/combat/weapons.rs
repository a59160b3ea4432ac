use serde::{Deserialize, Serialize};

use crate::combat::mastery::{bonus_for, enchantment_bonus, MasteryLevel};
use crate::combat::rate::{AttackRate, RateLadder};
use crate::model::{CombatAdjustments, InventoryItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponCategory {
    #[default]
    Melee,
    Ranged,
    Hurled,
}

impl WeaponCategory {
    /// Unknown categories are treated as melee.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "ranged" => WeaponCategory::Ranged,
            "hurled" => WeaponCategory::Hurled,
            _ => WeaponCategory::Melee,
        }
    }

    /// Ranged and hurled weapons use the missile modifier and skip damage adjustment.
    pub fn is_missile(self) -> bool {
        matches!(self, WeaponCategory::Ranged | WeaponCategory::Hurled)
    }

    pub fn rate_label(self) -> &'static str {
        if self.is_missile() {
            "rate of fire"
        } else {
            "attack rate"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponBase {
    pub name: String,
    pub category: WeaponCategory,
    #[serde(default)]
    pub base_to_hit: i32,
    pub damage: String,
    #[serde(default)]
    pub rate_of_fire: Option<AttackRate>,
    #[serde(default)]
    pub enchantment: i32,
}

impl WeaponBase {
    pub fn from_item(item: &InventoryItem) -> Self {
        let details = &item.details;
        Self {
            name: details.name.clone(),
            category: details.category.unwrap_or_default(),
            base_to_hit: 0,
            damage: details.damage.clone().unwrap_or_default(),
            rate_of_fire: details.rate_of_fire,
            enchantment: enchantment_bonus(&details.name),
        }
    }

    /// Missile weapons fire at their listed rate (1/1 if unlisted); melee is always 1/1.
    pub fn base_attack_rate(&self) -> AttackRate {
        if self.category.is_missile() {
            self.rate_of_fire.unwrap_or_default()
        } else {
            AttackRate::ONE_PER_ROUND
        }
    }
}

/// Strength/dexterity-derived attack terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttackModifiers {
    pub melee: i32,
    pub damage: i32,
    pub ranged: i32,
}

impl From<&CombatAdjustments> for AttackModifiers {
    fn from(adj: &CombatAdjustments) -> Self {
        Self {
            melee: adj.melee,
            damage: adj.damage,
            ranged: adj.ranged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedWeaponStats {
    pub name: String,
    pub category: WeaponCategory,
    pub base_to_hit: i32,
    pub to_hit_bonus: i32,
    pub final_to_hit: i32,
    pub base_damage: String,
    pub damage_bonus: i32,
    pub final_damage: String,
    pub base_attack_rate: AttackRate,
    pub improved_attack_rate: bool,
    pub final_attack_rate: AttackRate,
    pub rate_label: String,
    pub mastery: Option<MasteryLevel>,
    pub critical_improved: bool,
}

impl DerivedWeaponStats {
    /// Advance the final rate one rung when the improved flag is set.
    pub fn with_rate_step(mut self, ladder: &RateLadder) -> Self {
        if self.improved_attack_rate {
            self.final_attack_rate = ladder.step(self.final_attack_rate);
        }
        self
    }
}

pub fn resolve_weapon_stats(
    weapon: &WeaponBase,
    mods: &AttackModifiers,
    mastery: Option<MasteryLevel>,
) -> DerivedWeaponStats {
    let missile = weapon.category.is_missile();
    let bonus = bonus_for(mastery);

    let hit_modifier = if missile { mods.ranged } else { mods.melee };
    let damage_modifier = if missile { 0 } else { mods.damage };

    let to_hit_bonus = hit_modifier + weapon.enchantment + bonus.to_hit;
    let damage_bonus = damage_modifier + weapon.enchantment + bonus.damage;
    let base_attack_rate = weapon.base_attack_rate();

    let stats = DerivedWeaponStats {
        name: weapon.name.clone(),
        category: weapon.category,
        base_to_hit: weapon.base_to_hit,
        to_hit_bonus,
        final_to_hit: weapon.base_to_hit + to_hit_bonus,
        base_damage: weapon.damage.clone(),
        damage_bonus,
        final_damage: format_damage(&weapon.damage, damage_bonus),
        base_attack_rate,
        improved_attack_rate: bonus.improved_rate,
        final_attack_rate: base_attack_rate,
        rate_label: weapon.category.rate_label().to_string(),
        mastery,
        critical_improved: bonus.critical_improved,
    };
    tracing::trace!(
        weapon = %stats.name,
        to_hit = stats.final_to_hit,
        damage = %stats.final_damage,
        "weapon stats"
    );
    stats
}

/// "1d8" + 2 -> "1d8+2"; a zero bonus leaves the dice untouched.
pub fn format_damage(base: &str, bonus: i32) -> String {
    match bonus {
        0 => base.to_string(),
        b if b > 0 => format!("{}+{}", base, b),
        b => format!("{}{}", base, b),
    }
}

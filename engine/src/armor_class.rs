use serde::{Deserialize, Serialize};

use crate::config::RulesConfig;
use crate::encumbrance::{penalties_for, EncumbranceStatus};
use crate::model::{Character, CharacterClass, Inventory, ItemType};

/// Unarmoured base AC.
pub const BASE_AC: i32 = 9;

/// Terms of the AC formula. Lower final AC is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcInputs {
    pub base_ac: i32,
    pub armor_ac: Option<i32>,
    pub shield_bonus: i32,
    pub dexterity_modifier: i32,
    pub natural_ac: i32,
    pub other_bonuses: i32,
    /// The (non-positive) encumbrance AC penalty; subtracting it raises AC.
    pub encumbrance_penalty: i32,
}

impl Default for AcInputs {
    fn default() -> Self {
        Self {
            base_ac: BASE_AC,
            armor_ac: None,
            shield_bonus: 0,
            dexterity_modifier: 0,
            natural_ac: 0,
            other_bonuses: 0,
            encumbrance_penalty: 0,
        }
    }
}

/// `(armor ?? base) - shield - dex - natural - other - encumbrance`.
pub fn resolve_ac(inputs: &AcInputs) -> i32 {
    inputs.armor_ac.unwrap_or(inputs.base_ac)
        - inputs.shield_bonus
        - inputs.dexterity_modifier
        - inputs.natural_ac
        - inputs.other_bonuses
        - inputs.encumbrance_penalty
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcBreakdown {
    pub base_ac: i32,
    pub armor_ac: Option<i32>,
    pub shield_bonus: i32,
    pub dexterity_mod: i32,
    pub natural_ac: i32,
    pub agile_bonus: i32,
    pub other_bonuses: i32,
    pub encumbrance_penalty: i32,
    pub final_ac: i32,
    pub armor_equipped: Option<String>,
    pub shield_equipped: Option<String>,
}

/// AC from the equipped armour and shield, class features, and load.
pub fn armor_class_for(
    character: &Character,
    inventory: &Inventory,
    status: EncumbranceStatus,
    rules: &RulesConfig,
) -> AcBreakdown {
    let armor = inventory.equipped_one(ItemType::Armor);
    let shield = inventory.equipped_one(ItemType::Shield);

    // Thieves fight better unarmoured, as long as they are not weighed down.
    let agile_bonus = if character.class == CharacterClass::Thief
        && armor.is_none()
        && status < EncumbranceStatus::HeavilyEncumbered
    {
        rules.thief_agile_bonus
    } else {
        0
    };

    let inputs = AcInputs {
        base_ac: rules.base_ac,
        armor_ac: armor.and_then(|a| a.details.ac),
        shield_bonus: shield.map(|s| s.details.defense_modifier).unwrap_or(0),
        dexterity_modifier: character.adjustments.defence,
        natural_ac: character.natural_ac,
        other_bonuses: character.other_ac_bonus + agile_bonus,
        encumbrance_penalty: penalties_for(status).ac_penalty,
    };
    let final_ac = resolve_ac(&inputs);
    tracing::debug!(character = %character.name, final_ac, ?inputs, "armor class");

    AcBreakdown {
        base_ac: inputs.base_ac,
        armor_ac: inputs.armor_ac,
        shield_bonus: inputs.shield_bonus,
        dexterity_mod: inputs.dexterity_modifier,
        natural_ac: inputs.natural_ac,
        agile_bonus,
        other_bonuses: character.other_ac_bonus,
        encumbrance_penalty: inputs.encumbrance_penalty,
        final_ac,
        armor_equipped: armor.map(|a| a.details.name.clone()),
        shield_equipped: shield.map(|s| s.details.name.clone()),
    }
}

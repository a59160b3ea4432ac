use serde::Serialize;

use crate::abilities::AbilityModifiers;
use crate::armor_class::{armor_class_for, AcBreakdown};
use crate::combat::mastery::{mastery_progress, MasteryProgress};
use crate::combat::rate::AttackRate;
use crate::combat::weapons::{
    resolve_weapon_stats, AttackModifiers, DerivedWeaponStats, WeaponBase, WeaponCategory,
};
use crate::config::RulesConfig;
use crate::encumbrance::{encumbrance_report, EncumbranceReport};
use crate::error::Result;
use crate::ingest::snapshot_from_json;
use crate::model::{CharacterClass, ItemType, Snapshot, WeightClass};
use crate::progression::NextLevel;

/// Everything the sheet shows in its combat and encumbrance panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedCombatStats {
    pub modifiers: AbilityModifiers,
    pub encumbrance: EncumbranceReport,
    pub armor_class: AcBreakdown,
    pub final_ac: i32,
    pub weapons: Vec<DerivedWeaponStats>,
    pub movement_rate: i32,
    pub next_level: Option<NextLevel>,
    pub mastery: MasteryProgress,
    pub log: Vec<String>,
}

pub fn derive_sheet(snapshot: &Snapshot, rules: &RulesConfig) -> DerivedCombatStats {
    let character = &snapshot.character;
    let inventory = &snapshot.inventory;
    let mut log = Vec::new();

    let modifiers = AbilityModifiers::from_scores(&character.abilities);

    let encumbrance = encumbrance_report(character, inventory);
    log.push(format!(
        "[ENC][{}] {:.1} lb ({}%) -> {:?}",
        character.name,
        encumbrance.load.current_weight,
        encumbrance.load.percent_full,
        encumbrance.status
    ));

    let armor_class = armor_class_for(character, inventory, encumbrance.status, rules);
    log.push(format!(
        "[AC][{}] {} - shield {} - dex {} - natural {} - agile {} - other {} - enc {} = {}",
        character.name,
        armor_class.armor_ac.unwrap_or(armor_class.base_ac),
        armor_class.shield_bonus,
        armor_class.dexterity_mod,
        armor_class.natural_ac,
        armor_class.agile_bonus,
        armor_class.other_bonuses,
        armor_class.encumbrance_penalty,
        armor_class.final_ac
    ));

    let mods = AttackModifiers::from(&character.adjustments);
    let fighter_step =
        character.class.is_fighter_type() && character.level >= rules.fighter_rate_level;
    let weapons: Vec<DerivedWeaponStats> = inventory
        .equipped(ItemType::Weapon)
        .map(|item| {
            let base = WeaponBase::from_item(item);
            let mastery = snapshot.masteries.level_for(&base.name);
            let mut stats = resolve_weapon_stats(&base, &mods, mastery)
                .with_rate_step(&rules.attack_rate_ladder);
            // Does not stack with a mastery step.
            if fighter_step
                && stats.category == WeaponCategory::Melee
                && stats.final_attack_rate == AttackRate::ONE_PER_ROUND
            {
                stats.final_attack_rate = rules.attack_rate_ladder.step(stats.final_attack_rate);
                stats.improved_attack_rate = true;
            }
            log.push(format!(
                "[WPN][{}] {}: to-hit {:+}, damage {}, {} {}",
                character.name,
                stats.name,
                stats.final_to_hit,
                stats.final_damage,
                stats.rate_label,
                stats.final_attack_rate
            ));
            stats
        })
        .collect();

    let movement_rate = movement_for(snapshot, rules, encumbrance.penalties.movement_penalty);
    log.push(format!("[MV][{}] {} ft/round", character.name, movement_rate));

    let next_level = rules
        .level_table(character.class)
        .and_then(|table| table.next_level(character.experience_points));
    match next_level {
        Some(next) => log.push(format!(
            "[XP][{}] {} xp, {} more for level {}",
            character.name, character.experience_points, next.xp_needed, next.level
        )),
        None => log.push(format!(
            "[XP][{}] {} xp, no further level",
            character.name, character.experience_points
        )),
    }

    tracing::debug!(
        character = %character.name,
        final_ac = armor_class.final_ac,
        movement_rate,
        weapons = weapons.len(),
        "derived sheet"
    );

    DerivedCombatStats {
        modifiers,
        final_ac: armor_class.final_ac,
        encumbrance,
        armor_class,
        weapons,
        movement_rate,
        next_level,
        mastery: mastery_progress(character.class, character.level),
        log,
    }
}

/// Armour sets the base rate; barbarians run faster unless in medium or heavy armour.
fn movement_for(snapshot: &Snapshot, rules: &RulesConfig, penalty: i32) -> i32 {
    let armor = snapshot.inventory.equipped_one(ItemType::Armor);
    let restrictive = armor
        .and_then(|a| a.details.weight_class)
        .is_some_and(|w| matches!(w, WeightClass::Medium | WeightClass::Heavy));

    let base = if snapshot.character.class == CharacterClass::Barbarian && !restrictive {
        rules.run_movement
    } else {
        armor
            .and_then(|a| a.details.movement_rate)
            .unwrap_or(rules.base_movement)
    };
    (base + penalty).max(0)
}

/// Parse a JSON snapshot and derive it in one step.
pub fn derive_sheet_from_json(text: &str, rules: &RulesConfig) -> Result<DerivedCombatStats> {
    let snapshot = snapshot_from_json(text)?;
    Ok(derive_sheet(&snapshot, rules))
}

use sheet_engine::combat::mastery::{
    base_weapon_name, enchantment_bonus, mastery_progress, mastery_slots, WeaponMastery,
};
use sheet_engine::combat::weapons::{format_damage, WeaponCategory};
use sheet_engine::{
    resolve_weapon_stats, AttackModifiers, AttackRate, CharacterClass, EngineError, MasteryBook,
    MasteryLevel, RateLadder, WeaponBase,
};

fn weapon(name: &str, category: WeaponCategory, damage: &str) -> WeaponBase {
    WeaponBase {
        name: name.to_string(),
        category,
        base_to_hit: 0,
        damage: damage.to_string(),
        rate_of_fire: None,
        enchantment: enchantment_bonus(name),
    }
}

const MODS: AttackModifiers = AttackModifiers {
    melee: 1,
    damage: 2,
    ranged: 3,
};

#[test]
fn unmastered_melee_adds_only_strength_terms() {
    let stats = resolve_weapon_stats(&weapon("Mace", WeaponCategory::Melee, "1d6"), &MODS, None);
    assert_eq!(stats.final_to_hit, 1);
    assert_eq!(stats.final_damage, "1d6+2");
    assert_eq!(stats.final_attack_rate, AttackRate::ONE_PER_ROUND);
    assert!(!stats.improved_attack_rate);
    assert!(!stats.critical_improved);
    assert_eq!(stats.rate_label, "attack rate");
}

#[test]
fn missile_weapons_skip_damage_adjustment() {
    let bow = WeaponBase {
        rate_of_fire: Some(AttackRate::new(2, 1)),
        ..weapon("Long Bow", WeaponCategory::Ranged, "1d6")
    };
    let stats = resolve_weapon_stats(&bow, &MODS, None);
    assert_eq!(stats.to_hit_bonus, 3);
    assert_eq!(stats.damage_bonus, 0);
    assert_eq!(stats.final_damage, "1d6");
    assert_eq!(stats.base_attack_rate, AttackRate::new(2, 1));
    assert_eq!(stats.rate_label, "rate of fire");

    let dagger = resolve_weapon_stats(
        &weapon("Dagger", WeaponCategory::Hurled, "1d4"),
        &MODS,
        None,
    );
    assert_eq!(dagger.final_damage, "1d4");
}

#[test]
fn enchantment_and_grand_mastery_stack() {
    let sword = weapon("Long Sword +1", WeaponCategory::Melee, "1d8");
    let stats = resolve_weapon_stats(&sword, &MODS, Some(MasteryLevel::GrandMastery))
        .with_rate_step(&RateLadder::default());
    assert_eq!(stats.to_hit_bonus, 1 + 1 + 2);
    assert_eq!(stats.final_damage, "1d8+5");
    assert_eq!(stats.final_attack_rate, AttackRate::new(3, 2));
    assert!(stats.critical_improved);
}

#[test]
fn mastered_does_not_step_rate() {
    let stats = resolve_weapon_stats(
        &weapon("Spear", WeaponCategory::Melee, "1d6"),
        &MODS,
        Some(MasteryLevel::Mastered),
    )
    .with_rate_step(&RateLadder::default());
    assert_eq!(stats.final_to_hit, 2);
    assert_eq!(stats.final_attack_rate, AttackRate::ONE_PER_ROUND);
}

#[test]
fn custom_ladder_controls_grand_mastery_step() {
    let ladder = RateLadder(vec![AttackRate::new(1, 1), AttackRate::new(2, 1)]);
    let stats = resolve_weapon_stats(
        &weapon("Axe", WeaponCategory::Melee, "1d8"),
        &MODS,
        Some(MasteryLevel::GrandMastery),
    )
    .with_rate_step(&ladder);
    assert_eq!(stats.final_attack_rate, AttackRate::new(2, 1));
}

#[test]
fn negative_bonus_formats_with_minus() {
    assert_eq!(format_damage("2d4", -1), "2d4-1");
    assert_eq!(format_damage("2d4", 0), "2d4");
}

#[test]
fn weapon_names_reduce_to_base() {
    assert_eq!(base_weapon_name("Long Sword +2 of Fire"), "Long Sword");
    assert_eq!(base_weapon_name("Dagger of Venom"), "Dagger");
    assert_eq!(enchantment_bonus("Long Sword +2 of Fire"), 2);
    assert_eq!(enchantment_bonus("Club"), 0);
}

#[test]
fn mastery_book_matches_enchanted_names() {
    let book = MasteryBook::new(vec![WeaponMastery {
        weapon_base_name: "Long Sword".into(),
        mastery_level: MasteryLevel::Mastered,
    }])
    .unwrap();
    assert_eq!(book.level_for("Long Sword +1"), Some(MasteryLevel::Mastered));
    assert_eq!(book.level_for("Short Sword"), None);
}

#[test]
fn second_grand_mastery_is_rejected() {
    let err = MasteryBook::new(vec![
        WeaponMastery {
            weapon_base_name: "Long Sword".into(),
            mastery_level: MasteryLevel::GrandMastery,
        },
        WeaponMastery {
            weapon_base_name: "Spear".into(),
            mastery_level: MasteryLevel::GrandMastery,
        },
    ])
    .unwrap_err();
    assert!(matches!(err, EngineError::DuplicateGrandMastery { .. }));
    insta::assert_snapshot!(
        err.to_string(),
        @"only one grand mastery is allowed: 'Long Sword' and 'Spear'"
    );
}

#[test]
fn mastery_slots_by_level() {
    assert_eq!(mastery_slots(CharacterClass::Fighter, 1), 2);
    assert_eq!(mastery_slots(CharacterClass::Ranger, 4), 3);
    assert_eq!(mastery_slots(CharacterClass::Paladin, 8), 4);
    assert_eq!(mastery_slots(CharacterClass::Barbarian, 12), 5);
    assert_eq!(mastery_slots(CharacterClass::Magician, 12), 0);

    let progress = mastery_progress(CharacterClass::Fighter, 5);
    assert!(progress.level_4_unlock && progress.grand_mastery_available);
    assert!(!progress.level_8_unlock);
}

use sheet_engine::ingest::character_from_json;
use sheet_engine::model::EquipmentSlot;
use sheet_engine::{snapshot_from_json, CharacterClass, EngineError, ItemType, MasteryLevel};

const FIGHTER: &str = include_str!("fixtures/fighter.json");

#[test]
fn fixture_normalizes() {
    let snapshot = snapshot_from_json(FIGHTER).unwrap();
    let c = &snapshot.character;
    assert_eq!(c.class, CharacterClass::Fighter);
    assert_eq!((c.hit_points.current, c.hit_points.max), (38, 44));
    // Missing adjustments come from the ability table.
    assert_eq!(c.adjustments.melee, 1);
    assert_eq!(c.adjustments.damage, 2);
    assert_eq!(c.adjustments.ranged, 1);
    assert_eq!(c.adjustments.defence, 0);

    assert_eq!(snapshot.inventory.items.len(), 7);
    assert_eq!(snapshot.masteries.len(), 2);
    assert_eq!(
        snapshot.masteries.level_for("Long Sword +1"),
        Some(MasteryLevel::GrandMastery)
    );
}

#[test]
fn equipped_items_without_slot_get_a_default() {
    let snapshot = snapshot_from_json(FIGHTER).unwrap();
    let bow = &snapshot.inventory.items[1];
    assert_eq!(bow.slot, Some(EquipmentSlot::MainHand));
    let rope = &snapshot.inventory.items[5];
    assert_eq!(rope.slot, None);
}

#[test]
fn pascal_case_fields_are_accepted() {
    let c = character_from_json(
        r#"{
            "Name": "Orm", "Class": "Berserker", "Level": 3,
            "Strength": 18, "Dexterity": 9, "Constitution": 16,
            "Intelligence": 8, "Wisdom": 11, "Charisma": 7,
            "HitPoints": 21, "ExperiencePoints": 4500,
            "MeleeModifier": 3, "DefenceAdjustment": -1,
            "Abilities": { "natural_ac": 2 }
        }"#,
    )
    .unwrap();
    assert_eq!(c.name, "Orm");
    assert_eq!(c.class, CharacterClass::Berserker);
    assert_eq!((c.hit_points.current, c.hit_points.max), (21, 21));
    assert_eq!(c.adjustments.melee, 3);
    assert_eq!(c.adjustments.damage, 3);
    assert_eq!(c.adjustments.defence, -1);
    assert_eq!(c.natural_ac, 2);
}

#[test]
fn unknown_class_becomes_other() {
    let c = character_from_json(r#"{ "name": "X", "class": "Bard" }"#).unwrap();
    assert_eq!(c.class, CharacterClass::Other);
    assert_eq!(c.level, 1);
}

#[test]
fn bad_records_are_rejected() {
    let negative_weight = r#"{
        "character": { "name": "A" },
        "inventory": { "items": [
            { "item_type": "equipment", "item_details": { "name": "Ghost", "weight": -1 } }
        ] }
    }"#;
    assert!(matches!(
        snapshot_from_json(negative_weight),
        Err(EngineError::NegativeWeight { .. })
    ));

    let unknown_type = r#"{
        "character": { "name": "A" },
        "inventory": { "items": [ { "item_type": "wand" } ] }
    }"#;
    assert!(matches!(
        snapshot_from_json(unknown_type),
        Err(EngineError::UnknownItemType(t)) if t == "wand"
    ));

    let zero_quantity = r#"{
        "character": { "name": "A" },
        "inventory": { "items": [ { "item_type": "potion", "quantity": 0 } ] }
    }"#;
    assert!(matches!(
        snapshot_from_json(zero_quantity),
        Err(EngineError::InvalidDelta { field: "quantity", .. })
    ));

    let bad_mastery = r#"{
        "character": { "name": "A" },
        "weapon_masteries": [ { "weapon_base_name": "Axe", "mastery_level": "expert" } ]
    }"#;
    assert!(matches!(
        snapshot_from_json(bad_mastery),
        Err(EngineError::UnknownMasteryLevel(_))
    ));

    assert!(matches!(
        character_from_json(r#"{ "name": "A", "experience_points": -5 }"#),
        Err(EngineError::InvalidDelta { .. })
    ));
    assert!(matches!(
        snapshot_from_json("not json"),
        Err(EngineError::Json { what: "snapshot", .. })
    ));
}

#[test]
fn item_types_accept_aliases() {
    assert_eq!(ItemType::parse("Armour"), Some(ItemType::Armor));
    assert_eq!(ItemType::parse("spell_scroll"), Some(ItemType::SpellScroll));
}

#[test]
fn oversized_counts_are_rejected_not_truncated() {
    let huge_quantity = r#"{
        "character": { "name": "A" },
        "inventory": { "items": [ { "item_type": "potion", "quantity": 4294967296 } ] }
    }"#;
    assert!(matches!(
        snapshot_from_json(huge_quantity),
        Err(EngineError::InvalidDelta { field: "quantity", value: 4294967296 })
    ));

    assert!(matches!(
        character_from_json(r#"{ "name": "A", "level": 4294967297 }"#),
        Err(EngineError::InvalidDelta { field: "level", value: 4294967297 })
    ));
}

#[test]
fn free_text_rate_of_fire_is_ignored() {
    let snapshot = snapshot_from_json(
        r#"{
            "character": { "name": "A" },
            "inventory": { "items": [ {
                "item_type": "weapon",
                "is_equipped": true,
                "item_details": { "name": "Sling", "damage": "1d4", "rate_of_fire": "2" }
            } ] }
        }"#,
    )
    .unwrap();
    assert_eq!(snapshot.inventory.items[0].details.rate_of_fire, None);
}

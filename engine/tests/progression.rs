use sheet_engine::progression::{set_xp, NextLevel};
use sheet_engine::{
    apply_xp, CharacterClass, EngineError, LevelTable, LevelThreshold, RulesConfig, XpOutcome,
};

fn table() -> LevelTable {
    LevelTable::new(vec![
        LevelThreshold { level: 1, xp: 0 },
        LevelThreshold { level: 2, xp: 100 },
        LevelThreshold { level: 3, xp: 300 },
    ])
    .unwrap()
}

#[test]
fn crossing_a_threshold_levels_up() {
    let outcome = apply_xp(90, 10, &table()).unwrap();
    assert_eq!(
        outcome,
        XpOutcome {
            new_xp: 100,
            new_level: 2,
            leveled_up: true
        }
    );
}

#[test]
fn staying_inside_a_level_does_not_level_up() {
    let outcome = apply_xp(100, 50, &table()).unwrap();
    assert_eq!(outcome.new_level, 2);
    assert!(!outcome.leveled_up);

    let past_top = apply_xp(290, 5000, &table()).unwrap();
    assert_eq!(past_top.new_level, 3);
}

#[test]
fn non_positive_awards_are_rejected() {
    for delta in [0, -5] {
        assert!(matches!(
            apply_xp(10, delta, &table()),
            Err(EngineError::InvalidDelta { .. })
        ));
    }
    assert!(set_xp(-1, &table()).is_err());
    assert_eq!(set_xp(300, &table()).unwrap().new_level, 3);
}

#[test]
fn next_level_reports_remaining_xp() {
    assert_eq!(
        table().next_level(150),
        Some(NextLevel {
            level: 3,
            xp_threshold: 300,
            xp_needed: 150
        })
    );
    assert_eq!(table().next_level(300), None);
}

#[test]
fn malformed_tables_are_rejected() {
    assert!(LevelTable::new(vec![]).is_err());
    let descending = LevelTable::new(vec![
        LevelThreshold { level: 2, xp: 100 },
        LevelThreshold { level: 1, xp: 0 },
    ]);
    assert!(matches!(descending, Err(EngineError::LevelTable(_))));
}

#[test]
fn builtin_tables_cover_every_class() {
    let rules = RulesConfig::builtin("default").unwrap();
    let fighter = rules.level_table(CharacterClass::Fighter).unwrap();
    assert_eq!(fighter.level_for(70_000), 7);
    assert!(rules.level_table(CharacterClass::Cleric).is_some());
    assert!(rules.level_table(CharacterClass::Other).is_none());
}

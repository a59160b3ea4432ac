use sheet_engine::abilities::{checked_lookup, MAX_SCORE, MIN_SCORE};
use sheet_engine::{
    lookup, modifier_for, Ability, AbilityModifiers, AbilityScores, EngineError, Modifier,
};

#[test]
fn strength_column_matches_table() {
    let expected = [
        (3, -2),
        (4, -1),
        (6, -1),
        (7, 0),
        (12, 0),
        (15, 1),
        (17, 1),
        (18, 2),
    ];
    for (score, melee) in expected {
        assert_eq!(lookup(Modifier::Melee, score), melee, "score {score}");
    }
    assert_eq!(lookup(Modifier::Damage, 18), 3);
    assert_eq!(lookup(Modifier::Damage, 13), 1);
}

#[test]
fn reaction_and_languages_extremes() {
    assert_eq!(lookup(Modifier::Reaction, 3), -3);
    assert_eq!(lookup(Modifier::Reaction, 18), 3);
    assert_eq!(lookup(Modifier::Languages, 3), 0);
    assert_eq!(lookup(Modifier::Languages, 18), 3);
}

#[test]
fn out_of_range_clamps_but_strict_lookup_rejects() {
    assert_eq!(lookup(Modifier::Melee, 25), lookup(Modifier::Melee, MAX_SCORE));
    assert_eq!(lookup(Modifier::Melee, 1), lookup(Modifier::Melee, MIN_SCORE));

    match checked_lookup(Modifier::Ranged, 19) {
        Err(EngineError::OutOfRange { score, min, max, .. }) => {
            assert_eq!((score, min, max), (19, 3, 18));
        }
        other => panic!("expected OutOfRange, got {other:?}"),
    }
    assert_eq!(checked_lookup(Modifier::Ranged, 16).unwrap(), 1);
}

#[test]
fn primary_modifiers_follow_ability() {
    assert_eq!(modifier_for(Ability::Str, 18), lookup(Modifier::Melee, 18));
    assert_eq!(modifier_for(Ability::Dex, 17), lookup(Modifier::Ranged, 17));
    assert_eq!(modifier_for(Ability::Con, 15), lookup(Modifier::HitPoints, 15));
}

#[test]
fn average_scores_have_no_modifiers() {
    assert_eq!(
        AbilityModifiers::from_scores(&AbilityScores::default()),
        AbilityModifiers::default()
    );
}

#[test]
fn abilities_display_as_sheet_labels() {
    let labels: Vec<String> = Ability::ALL.iter().map(|a| a.to_string()).collect();
    assert_eq!(labels, ["STR", "DEX", "CON", "INT", "WIS", "CHA"]);
}

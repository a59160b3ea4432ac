use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    /// The modifier shown first on the sheet for this ability.
    pub fn primary_modifier(self) -> Modifier {
        match self {
            Ability::Str => Modifier::Melee,
            Ability::Dex => Modifier::Ranged,
            Ability::Con => Modifier::HitPoints,
            Ability::Int => Modifier::Languages,
            Ability::Wis => Modifier::Willpower,
            Ability::Cha => Modifier::Reaction,
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Ability::Str => "STR",
            Ability::Dex => "DEX",
            Ability::Con => "CON",
            Ability::Int => "INT",
            Ability::Wis => "WIS",
            Ability::Cha => "CHA",
        };
        f.write_str(s)
    }
}

/// A single column of the ability table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Melee,
    Damage,
    Ranged,
    Defence,
    HitPoints,
    PoisonRadiation,
    Languages,
    Willpower,
    Reaction,
}

impl Modifier {
    pub fn ability(self) -> Ability {
        match self {
            Modifier::Melee | Modifier::Damage => Ability::Str,
            Modifier::Ranged | Modifier::Defence => Ability::Dex,
            Modifier::HitPoints | Modifier::PoisonRadiation => Ability::Con,
            Modifier::Languages => Ability::Int,
            Modifier::Willpower => Ability::Wis,
            Modifier::Reaction => Ability::Cha,
        }
    }

    fn row(self) -> &'static [i32; BAND_COUNT] {
        match self {
            Modifier::Melee => &[-2, -1, 0, 0, 0, 1, 1, 2],
            Modifier::Damage => &[-2, -1, -1, 0, 1, 1, 2, 3],
            Modifier::Ranged => &[-2, -1, -1, 0, 1, 1, 2, 2],
            Modifier::Defence => &[-2, -1, 0, 0, 0, 1, 1, 2],
            Modifier::HitPoints => &[-1, -1, 0, 0, 1, 1, 2, 2],
            Modifier::PoisonRadiation => &[-2, -1, 0, 0, 0, 1, 1, 2],
            Modifier::Languages => &[0, 0, 0, 0, 1, 1, 2, 3],
            Modifier::Willpower => &[-2, -1, 0, 0, 0, 1, 1, 2],
            Modifier::Reaction => &[-3, -2, -1, 0, 1, 1, 2, 3],
        }
    }
}

pub const MIN_SCORE: i32 = 3;
pub const MAX_SCORE: i32 = 18;

const BAND_COUNT: usize = 8;

// Inclusive upper bound of each score band: 3, 4-6, 7-8, 9-12, 13-14, 15-16, 17, 18.
const BAND_UPPER: [i32; BAND_COUNT] = [3, 6, 8, 12, 14, 16, 17, 18];

fn band_index(score: i32) -> usize {
    let clamped = score.clamp(MIN_SCORE, MAX_SCORE);
    BAND_UPPER
        .iter()
        .position(|&upper| clamped <= upper)
        .unwrap_or(BAND_COUNT - 1)
}

/// Look up one modifier column. Scores outside 3..=18 use the nearest band.
pub fn lookup(modifier: Modifier, score: i32) -> i32 {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        tracing::debug!(?modifier, score, "ability score outside table, clamping");
    }
    modifier.row()[band_index(score)]
}

/// Strict lookup: rejects scores the table does not define.
pub fn checked_lookup(modifier: Modifier, score: i32) -> Result<i32> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(EngineError::OutOfRange {
            modifier,
            score,
            min: MIN_SCORE,
            max: MAX_SCORE,
        });
    }
    Ok(modifier.row()[band_index(score)])
}

/// Primary modifier for an ability score (STR melee, DEX ranged, CON hit points, ...).
pub fn modifier_for(ability: Ability, score: i32) -> i32 {
    lookup(ability.primary_modifier(), score)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    pub fn score(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.strength,
            Ability::Dex => self.dexterity,
            Ability::Con => self.constitution,
            Ability::Int => self.intelligence,
            Ability::Wis => self.wisdom,
            Ability::Cha => self.charisma,
        }
    }

    pub fn modifier(&self, modifier: Modifier) -> i32 {
        lookup(modifier, self.score(modifier.ability()))
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

/// Every table column for a full set of scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityModifiers {
    pub melee: i32,
    pub damage: i32,
    pub ranged: i32,
    pub defence: i32,
    pub hit_points: i32,
    pub poison_radiation: i32,
    pub languages: i32,
    pub willpower: i32,
    pub reaction: i32,
}

impl AbilityModifiers {
    pub fn from_scores(scores: &AbilityScores) -> Self {
        Self {
            melee: scores.modifier(Modifier::Melee),
            damage: scores.modifier(Modifier::Damage),
            ranged: scores.modifier(Modifier::Ranged),
            defence: scores.modifier(Modifier::Defence),
            hit_points: scores.modifier(Modifier::HitPoints),
            poison_radiation: scores.modifier(Modifier::PoisonRadiation),
            languages: scores.modifier(Modifier::Languages),
            willpower: scores.modifier(Modifier::Willpower),
            reaction: scores.modifier(Modifier::Reaction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(band_index(3), 0);
        assert_eq!(band_index(4), 1);
        assert_eq!(band_index(6), 1);
        assert_eq!(band_index(9), 3);
        assert_eq!(band_index(12), 3);
        assert_eq!(band_index(17), 6);
        assert_eq!(band_index(18), 7);
    }

    #[test]
    fn out_of_range_scores_clamp() {
        assert_eq!(band_index(-4), 0);
        assert_eq!(band_index(25), 7);
    }
}

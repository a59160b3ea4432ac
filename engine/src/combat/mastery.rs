use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::model::CharacterClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLevel {
    Mastered,
    GrandMastery,
}

impl MasteryLevel {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mastered" => Ok(MasteryLevel::Mastered),
            "grand_mastery" => Ok(MasteryLevel::GrandMastery),
            _ => Err(EngineError::UnknownMasteryLevel(s.to_string())),
        }
    }

    pub fn bonus(self) -> MasteryBonus {
        match self {
            MasteryLevel::Mastered => MasteryBonus {
                to_hit: 1,
                damage: 1,
                improved_rate: false,
                critical_improved: false,
            },
            MasteryLevel::GrandMastery => MasteryBonus {
                to_hit: 2,
                damage: 2,
                improved_rate: true,
                critical_improved: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MasteryBonus {
    pub to_hit: i32,
    pub damage: i32,
    pub improved_rate: bool,
    pub critical_improved: bool,
}

/// No mastery is an all-zero bonus.
pub fn bonus_for(level: Option<MasteryLevel>) -> MasteryBonus {
    level.map(MasteryLevel::bonus).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponMastery {
    pub weapon_base_name: String,
    pub mastery_level: MasteryLevel,
}

/// A character's masteries keyed by weapon base name. Holds at most one
/// grand mastery.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<WeaponMastery>", into = "Vec<WeaponMastery>")]
pub struct MasteryBook {
    entries: IndexMap<String, MasteryLevel>,
}

impl MasteryBook {
    pub fn new(masteries: Vec<WeaponMastery>) -> Result<Self> {
        let mut entries = IndexMap::new();
        let mut grand: Option<String> = None;
        for m in masteries {
            let name = m.weapon_base_name.trim().to_string();
            if m.mastery_level == MasteryLevel::GrandMastery {
                if let Some(first) = &grand {
                    if *first != name {
                        return Err(EngineError::DuplicateGrandMastery {
                            first: first.clone(),
                            second: name,
                        });
                    }
                }
                grand = Some(name.clone());
            }
            entries.insert(name, m.mastery_level);
        }
        Ok(Self { entries })
    }

    /// Mastery for a weapon, matched on its base name ("Long Sword +1" uses "Long Sword").
    pub fn level_for(&self, weapon_name: &str) -> Option<MasteryLevel> {
        self.entries.get(base_weapon_name(weapon_name)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<WeaponMastery>> for MasteryBook {
    type Error = EngineError;

    fn try_from(masteries: Vec<WeaponMastery>) -> Result<Self> {
        MasteryBook::new(masteries)
    }
}

impl From<MasteryBook> for Vec<WeaponMastery> {
    fn from(book: MasteryBook) -> Self {
        book.entries
            .into_iter()
            .map(|(weapon_base_name, mastery_level)| WeaponMastery {
                weapon_base_name,
                mastery_level,
            })
            .collect()
    }
}

const NAME_SUFFIXES: [&str; 8] = [
    " of Slaying",
    " of Fire",
    " of Frost",
    " of Lightning",
    " of Venom",
    " of Speed",
    " of Accuracy",
    " of Power",
];

/// Strip enchantment and named-property suffixes: "Spear +2 of Frost" -> "Spear".
pub fn base_weapon_name(name: &str) -> &str {
    let mut base = match name.find(" +") {
        Some(idx) => &name[..idx],
        None => name,
    };
    for suffix in NAME_SUFFIXES {
        if let Some(idx) = base.find(suffix) {
            base = &base[..idx];
            break;
        }
    }
    base.trim()
}

/// The `+N` in a magic weapon's name, or 0.
pub fn enchantment_bonus(name: &str) -> i32 {
    let Some(idx) = name.find(" +") else {
        return 0;
    };
    let rest = &name[idx + 2..];
    let digits: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

pub fn can_master(class: CharacterClass) -> bool {
    class.is_fighter_type()
}

/// Mastery slots: two to start, one more at levels 4, 8 and 12.
pub fn mastery_slots(class: CharacterClass, level: u32) -> u32 {
    if !can_master(class) {
        return 0;
    }
    match level {
        0 => 0,
        1..=3 => 2,
        4..=7 => 3,
        8..=11 => 4,
        _ => 5,
    }
}

pub fn can_have_grand_mastery(level: u32) -> bool {
    level >= 4
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MasteryProgress {
    pub base_masteries: u32,
    pub level_4_unlock: bool,
    pub level_8_unlock: bool,
    pub level_12_unlock: bool,
    pub grand_mastery_available: bool,
}

pub fn mastery_progress(class: CharacterClass, level: u32) -> MasteryProgress {
    if !can_master(class) {
        return MasteryProgress::default();
    }
    MasteryProgress {
        base_masteries: 2,
        level_4_unlock: level >= 4,
        level_8_unlock: level >= 8,
        level_12_unlock: level >= 12,
        grand_mastery_available: can_have_grand_mastery(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_names_strip_bonus_and_suffix() {
        assert_eq!(base_weapon_name("Long Sword"), "Long Sword");
        assert_eq!(base_weapon_name("Long Sword +1"), "Long Sword");
        assert_eq!(base_weapon_name("Spear of Frost"), "Spear");
        assert_eq!(base_weapon_name("Dagger +2 of Venom"), "Dagger");
    }

    #[test]
    fn enchantment_reads_leading_digits() {
        assert_eq!(enchantment_bonus("Long Sword"), 0);
        assert_eq!(enchantment_bonus("Long Sword +1"), 1);
        assert_eq!(enchantment_bonus("Battle Axe +3 of Power"), 3);
        assert_eq!(enchantment_bonus("Odd +x"), 0);
    }
}

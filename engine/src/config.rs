use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::armor_class::BASE_AC;
use crate::combat::rate::RateLadder;
use crate::content::{builtin_level_tables, builtin_rules};
use crate::error::{EngineError, Result};
use crate::life::HpPolicy;
use crate::model::CharacterClass;
use crate::progression::LevelTable;

pub const DEFAULT_MOVEMENT: i32 = 40;
pub const RUN_MOVEMENT: i32 = 50;
pub const FIGHTER_RATE_LEVEL: u32 = 7;
pub const THIEF_AGILE_BONUS: i32 = 1;

/// Game-rule constants the engine does not hard-code. Missing keys in a
/// rules file fall back to [`RulesConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub base_ac: i32,
    pub base_movement: i32,
    /// Barbarian movement when not in medium or heavy armour.
    pub run_movement: i32,
    pub hp: HpPolicy,
    pub attack_rate_ladder: RateLadder,
    /// Level at which fighter-type classes gain a melee rate step.
    pub fighter_rate_level: u32,
    pub thief_agile_bonus: i32,
    pub level_tables: IndexMap<CharacterClass, LevelTable>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            base_ac: BASE_AC,
            base_movement: DEFAULT_MOVEMENT,
            run_movement: RUN_MOVEMENT,
            hp: HpPolicy::default(),
            attack_rate_ladder: RateLadder::default(),
            fighter_rate_level: FIGHTER_RATE_LEVEL,
            thief_agile_bonus: THIEF_AGILE_BONUS,
            level_tables: IndexMap::new(),
        }
    }
}

impl RulesConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| EngineError::Json {
            what: "rules",
            source,
        })
    }

    /// One of the bundled presets, with the bundled level tables filled in
    /// when the preset has none.
    pub fn builtin(name: &str) -> Result<Self> {
        let presets = builtin_rules();
        let text = presets
            .get(name)
            .ok_or_else(|| EngineError::UnknownRules(name.to_string()))?;
        Self::from_yaml_str(text)?.with_builtin_level_tables()
    }

    /// Fill in the bundled level tables if none were configured.
    pub fn with_builtin_level_tables(mut self) -> Result<Self> {
        if self.level_tables.is_empty() {
            self.level_tables = serde_yaml::from_str(builtin_level_tables())?;
        }
        Ok(self)
    }

    pub fn level_table(&self, class: CharacterClass) -> Option<&LevelTable> {
        self.level_tables.get(&class)
    }
}

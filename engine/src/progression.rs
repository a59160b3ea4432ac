use serde::{Deserialize, Serialize};

use crate::error::{invalid, EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThreshold {
    pub level: u32,
    pub xp: u64,
}

/// Experience thresholds for one class, ascending by level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelThreshold>", into = "Vec<LevelThreshold>")]
pub struct LevelTable {
    entries: Vec<LevelThreshold>,
}

impl LevelTable {
    pub fn new(entries: Vec<LevelThreshold>) -> Result<Self> {
        if entries.is_empty() {
            return Err(EngineError::LevelTable("no levels".into()));
        }
        for pair in entries.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if b.level <= a.level {
                return Err(EngineError::LevelTable(format!(
                    "level {} follows level {}",
                    b.level, a.level
                )));
            }
            if b.xp < a.xp {
                return Err(EngineError::LevelTable(format!(
                    "level {} needs {} XP, less than level {} ({})",
                    b.level, b.xp, a.level, a.xp
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LevelThreshold] {
        &self.entries
    }

    /// Highest level whose threshold is <= `xp`. Below the first threshold
    /// the first level is returned.
    pub fn level_for(&self, xp: u64) -> u32 {
        let mut level = self.entries[0].level;
        for entry in &self.entries {
            if entry.xp > xp {
                break;
            }
            level = entry.level;
        }
        level
    }

    /// The next level above what `xp` already grants, or None at the top.
    pub fn next_level(&self, xp: u64) -> Option<NextLevel> {
        self.entries
            .iter()
            .find(|e| e.xp > xp)
            .map(|e| NextLevel {
                level: e.level,
                xp_threshold: e.xp,
                xp_needed: e.xp - xp,
            })
    }
}

impl TryFrom<Vec<LevelThreshold>> for LevelTable {
    type Error = EngineError;

    fn try_from(entries: Vec<LevelThreshold>) -> Result<Self> {
        LevelTable::new(entries)
    }
}

impl From<LevelTable> for Vec<LevelThreshold> {
    fn from(table: LevelTable) -> Self {
        table.entries
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextLevel {
    pub level: u32,
    pub xp_threshold: u64,
    pub xp_needed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpOutcome {
    pub new_xp: u64,
    pub new_level: u32,
    pub leveled_up: bool,
}

/// Award experience. `delta` must be positive.
pub fn apply_xp(current: u64, delta: i64, table: &LevelTable) -> Result<XpOutcome> {
    if delta <= 0 {
        return Err(invalid("experience delta", delta));
    }
    let new_xp = current.saturating_add(delta as u64);
    let before = table.level_for(current);
    let new_level = table.level_for(new_xp);
    if new_level > before {
        tracing::debug!(current, new_xp, before, new_level, "level up");
    }
    Ok(XpOutcome {
        new_xp,
        new_level,
        leveled_up: new_level > before,
    })
}

/// Replace the XP total outright; negative totals are rejected.
pub fn set_xp(value: i64, table: &LevelTable) -> Result<XpOutcome> {
    if value < 0 {
        return Err(invalid("experience points", value));
    }
    let new_xp = value as u64;
    let new_level = table.level_for(new_xp);
    Ok(XpOutcome {
        new_xp,
        new_level,
        leveled_up: false,
    })
}

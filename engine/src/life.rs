use serde::{Deserialize, Serialize};

use crate::error::{invalid, Result};

/// Results below this are clamped unless the caller picks another floor.
pub const DEFAULT_HP_FLOOR: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: i32, // may be <= 0
    pub max: i32,
    #[serde(default)]
    pub temporary: i32,
}

impl HitPoints {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            temporary: 0,
        }
    }

    /// Apply a damage/heal/temporary change and return the new pool.
    pub fn apply(self, change: HpChange, policy: &HpPolicy) -> HitPoints {
        let mut next = self;
        match change {
            HpChange::Damage(amount) => {
                let mut remaining = i64::from(amount);
                if next.temporary > 0 {
                    let absorbed = remaining.min(i64::from(next.temporary));
                    next.temporary -= absorbed as i32;
                    remaining -= absorbed;
                }
                if remaining > 0 {
                    let delta = i32::try_from(-remaining).unwrap_or(i32::MIN);
                    next.current = apply_hp_delta(next.current, delta, policy.floor);
                }
                tracing::debug!(
                    amount,
                    before = self.current,
                    after = next.current,
                    temporary = next.temporary,
                    "damage applied"
                );
            }
            HpChange::Heal(amount) => {
                let amount = i32::try_from(amount).unwrap_or(i32::MAX);
                let healed = apply_hp_delta(next.current, amount, policy.floor);
                next.current = if policy.clamp_heal_to_max {
                    // Never pull an already-over-max value down.
                    healed.min(next.max.max(next.current))
                } else {
                    healed
                };
                tracing::debug!(amount, before = self.current, after = next.current, "healed");
            }
            HpChange::Temporary(amount) => {
                let amount = i32::try_from(amount).unwrap_or(i32::MAX);
                next.temporary = next.temporary.saturating_add(amount);
            }
        }
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HpChange {
    Damage(u32),
    Heal(u32),
    Temporary(u32),
}

impl HpChange {
    /// Signed delta as the sheet sends it: negative damages, positive heals
    /// (or grants temporary HP when `temporary` is set).
    pub fn from_delta(delta: i32, temporary: bool) -> Option<Self> {
        match delta {
            0 => None,
            d if d < 0 => Some(HpChange::Damage(d.unsigned_abs())),
            d if temporary => Some(HpChange::Temporary(d as u32)),
            d => Some(HpChange::Heal(d as u32)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HpPolicy {
    pub floor: i32,
    pub clamp_heal_to_max: bool,
}

impl Default for HpPolicy {
    fn default() -> Self {
        Self {
            floor: DEFAULT_HP_FLOOR,
            clamp_heal_to_max: false,
        }
    }
}

/// `max(floor, current + delta)`. No ceiling.
pub fn apply_hp_delta(current: i32, delta: i32, floor: i32) -> i32 {
    current.saturating_add(delta).max(floor)
}

/// Direct set from the sheet's HP field.
pub fn set_hp(value: i32) -> Result<i32> {
    if value < 0 {
        return Err(invalid("hit points", value));
    }
    Ok(value)
}

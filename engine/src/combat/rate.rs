use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Attacks per round as a fraction, e.g. `3/2` is three attacks every two rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttackRate {
    pub attacks: u32,
    pub rounds: u32,
}

impl AttackRate {
    pub const ONE_PER_ROUND: AttackRate = AttackRate::new(1, 1);

    pub const fn new(attacks: u32, rounds: u32) -> Self {
        Self { attacks, rounds }
    }
}

impl Default for AttackRate {
    fn default() -> Self {
        Self::ONE_PER_ROUND
    }
}

impl fmt::Display for AttackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.attacks, self.rounds)
    }
}

impl FromStr for AttackRate {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || EngineError::AttackRate(s.to_string());
        let (a, r) = s.trim().split_once('/').ok_or_else(bad)?;
        let attacks = a.trim().parse::<u32>().map_err(|_| bad())?;
        let rounds = r.trim().parse::<u32>().map_err(|_| bad())?;
        if attacks == 0 || rounds == 0 {
            return Err(bad());
        }
        Ok(Self { attacks, rounds })
    }
}

impl TryFrom<String> for AttackRate {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AttackRate> for String {
    fn from(rate: AttackRate) -> Self {
        rate.to_string()
    }
}

/// Ordered attack-rate progression. An improved rate moves one rung up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateLadder(pub Vec<AttackRate>);

impl RateLadder {
    /// Next rung above `rate`; rates not on the ladder (and the top rung) are unchanged.
    pub fn step(&self, rate: AttackRate) -> AttackRate {
        self.0
            .iter()
            .position(|r| *r == rate)
            .and_then(|idx| self.0.get(idx + 1))
            .copied()
            .unwrap_or(rate)
    }
}

impl Default for RateLadder {
    fn default() -> Self {
        RateLadder(vec![
            AttackRate::new(1, 2),
            AttackRate::new(1, 1),
            AttackRate::new(3, 2),
            AttackRate::new(2, 1),
            AttackRate::new(5, 2),
            AttackRate::new(3, 1),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays() {
        let r: AttackRate = "3/2".parse().unwrap();
        assert_eq!(r, AttackRate::new(3, 2));
        assert_eq!(r.to_string(), "3/2");
        assert!("three".parse::<AttackRate>().is_err());
        assert!("0/1".parse::<AttackRate>().is_err());
    }

    #[test]
    fn ladder_steps_once_and_stops_at_top() {
        let ladder = RateLadder::default();
        assert_eq!(ladder.step(AttackRate::new(1, 1)), AttackRate::new(3, 2));
        assert_eq!(ladder.step(AttackRate::new(3, 1)), AttackRate::new(3, 1));
        assert_eq!(ladder.step(AttackRate::new(7, 3)), AttackRate::new(7, 3));
    }
}

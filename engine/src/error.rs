use thiserror::Error;

use crate::abilities::Modifier;

/// Everything the engine can reject. Table lookups clamp by default and only
/// the strict variants produce [`EngineError::OutOfRange`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{modifier:?} score {score} is outside the table range {min}..={max}")]
    OutOfRange {
        modifier: Modifier,
        score: i32,
        min: i32,
        max: i32,
    },

    #[error("invalid {field}: {value}")]
    InvalidDelta { field: &'static str, value: i64 },

    #[error("item '{item}' has negative weight {weight}")]
    NegativeWeight { item: String, weight: f64 },

    #[error("unknown item type '{0}'")]
    UnknownItemType(String),

    #[error("unknown mastery level '{0}' (expected 'mastered' or 'grand_mastery')")]
    UnknownMasteryLevel(String),

    #[error("only one grand mastery is allowed: '{first}' and '{second}'")]
    DuplicateGrandMastery { first: String, second: String },

    #[error("no builtin rules named '{0}'")]
    UnknownRules(String),

    #[error("bad level table: {0}")]
    LevelTable(String),

    #[error("bad attack rate '{0}' (expected N/M)")]
    AttackRate(String),

    #[error("failed to parse {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse rules: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;

pub(crate) fn invalid(field: &'static str, value: impl Into<i64>) -> EngineError {
    EngineError::InvalidDelta {
        field,
        value: value.into(),
    }
}

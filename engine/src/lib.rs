//! Derived statistics for a character sheet: ability modifiers, encumbrance,
//! armour class, weapon stats, and hit point / experience bookkeeping.
//!
//! Every entry point is a pure function over a [`Snapshot`] and a
//! [`RulesConfig`]; nothing here touches files or global state.

pub mod abilities;
pub mod api;
pub mod armor_class;
pub mod combat;
pub mod config;
pub mod content;
pub mod encumbrance;
pub mod error;
pub mod ingest;
pub mod life;
pub mod model;
pub mod progression;

pub use abilities::{lookup, modifier_for, Ability, AbilityModifiers, AbilityScores, Modifier};
pub use api::{derive_sheet, derive_sheet_from_json, DerivedCombatStats};
pub use armor_class::{armor_class_for, resolve_ac, AcBreakdown, AcInputs};
pub use combat::mastery::{MasteryBook, MasteryLevel};
pub use combat::rate::{AttackRate, RateLadder};
pub use combat::weapons::{resolve_weapon_stats, AttackModifiers, DerivedWeaponStats, WeaponBase};
pub use config::RulesConfig;
pub use encumbrance::{classify, compute_thresholds, EncumbranceStatus, EncumbranceThresholds};
pub use error::{EngineError, Result};
pub use ingest::snapshot_from_json;
pub use life::{apply_hp_delta, HitPoints, HpChange, HpPolicy};
pub use model::{Character, CharacterClass, Inventory, InventoryItem, ItemType, Snapshot};
pub use progression::{apply_xp, LevelTable, LevelThreshold, XpOutcome};

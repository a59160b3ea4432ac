//! Normalisation boundary between the backend's JSON and the canonical model.
//!
//! The backend is inconsistent about field casing (`Name` vs `name`) and
//! about which derived fields it sends. Every such fallback lives here; the
//! rest of the engine works on [`Snapshot`] only.

use serde::Deserialize;

use crate::abilities::{AbilityScores, Modifier};
use crate::combat::mastery::{MasteryBook, MasteryLevel, WeaponMastery};
use crate::combat::rate::AttackRate;
use crate::combat::weapons::WeaponCategory;
use crate::error::{invalid, EngineError, Result};
use crate::life::HitPoints;
use crate::model::{
    Character, CharacterClass, CombatAdjustments, EquipmentSlot, Inventory, InventoryItem,
    ItemDetails, ItemType, Snapshot, Treasure, WeightClass,
};

fn default_level() -> i64 {
    1
}

fn default_score() -> i32 {
    10
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassAbilitiesRecord {
    #[serde(default)]
    pub natural_ac: Option<i32>,
    #[serde(default)]
    pub ac_bonus: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterRecord {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Class")]
    pub class: String,
    #[serde(default = "default_level", alias = "Level")]
    pub level: i64,
    #[serde(default = "default_score", alias = "Strength")]
    pub strength: i32,
    #[serde(default = "default_score", alias = "Dexterity")]
    pub dexterity: i32,
    #[serde(default = "default_score", alias = "Constitution")]
    pub constitution: i32,
    #[serde(default = "default_score", alias = "Intelligence")]
    pub intelligence: i32,
    #[serde(default = "default_score", alias = "Wisdom")]
    pub wisdom: i32,
    #[serde(default = "default_score", alias = "Charisma")]
    pub charisma: i32,
    #[serde(default, alias = "HitPoints")]
    pub hit_points: Option<i32>,
    #[serde(default, alias = "CurrentHitPoints")]
    pub current_hit_points: Option<i32>,
    #[serde(default, alias = "MaxHitPoints")]
    pub max_hit_points: Option<i32>,
    #[serde(default, alias = "TemporaryHitPoints")]
    pub temporary_hit_points: Option<i32>,
    #[serde(default, alias = "ExperiencePoints")]
    pub experience_points: i64,
    #[serde(default, alias = "FightingAbility")]
    pub fighting_ability: i32,
    #[serde(default, alias = "MeleeModifier")]
    pub melee_modifier: Option<i32>,
    #[serde(default, alias = "DamageAdjustment")]
    pub damage_adjustment: Option<i32>,
    #[serde(default, alias = "RangedModifier")]
    pub ranged_modifier: Option<i32>,
    #[serde(default, alias = "DefenceAdjustment", alias = "defense_adjustment")]
    pub defence_adjustment: Option<i32>,
    #[serde(default, alias = "NaturalAC")]
    pub natural_ac: Option<i32>,
    #[serde(default, alias = "Abilities")]
    pub abilities: Option<ClassAbilitiesRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemDetailsRecord {
    #[serde(default, alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Weight")]
    pub weight: Option<f64>,
    #[serde(default, alias = "AC")]
    pub ac: Option<i32>,
    #[serde(default, alias = "DefenseModifier", alias = "defence_modifier")]
    pub defense_modifier: Option<i32>,
    #[serde(default, alias = "Damage")]
    pub damage: Option<String>,
    #[serde(default, alias = "MovementRate")]
    pub movement_rate: Option<i32>,
    #[serde(default, alias = "WeightClass")]
    pub weight_class: Option<String>,
    #[serde(default, alias = "Category")]
    pub category: Option<String>,
    #[serde(default, alias = "RateOfFire")]
    pub rate_of_fire: Option<String>,
    #[serde(default, alias = "Properties")]
    pub properties: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryItemRecord {
    #[serde(default, alias = "ID")]
    pub id: i64,
    #[serde(alias = "ItemType")]
    pub item_type: String,
    #[serde(default = "default_quantity", alias = "Quantity")]
    pub quantity: i64,
    #[serde(default, alias = "IsEquipped")]
    pub is_equipped: bool,
    #[serde(default, alias = "Slot")]
    pub slot: Option<String>,
    #[serde(default, alias = "ItemDetails", alias = "details")]
    pub item_details: ItemDetailsRecord,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreasureRecord {
    #[serde(default, alias = "GoldCoins")]
    pub gold_coins: u64,
    #[serde(default, alias = "SilverCoins")]
    pub silver_coins: u64,
    #[serde(default, alias = "CopperCoins")]
    pub copper_coins: u64,
    #[serde(default, alias = "ElectrumCoins")]
    pub electrum_coins: u64,
    #[serde(default, alias = "PlatinumCoins")]
    pub platinum_coins: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryRecord {
    #[serde(default, alias = "Items")]
    pub items: Vec<InventoryItemRecord>,
    #[serde(default, alias = "Treasure")]
    pub treasure: Option<TreasureRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MasteryRecord {
    #[serde(alias = "WeaponBaseName")]
    pub weapon_base_name: String,
    #[serde(alias = "MasteryLevel")]
    pub mastery_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotRecord {
    #[serde(alias = "Character")]
    pub character: CharacterRecord,
    #[serde(default, alias = "Inventory")]
    pub inventory: InventoryRecord,
    #[serde(default, alias = "WeaponMasteries", alias = "masteries")]
    pub weapon_masteries: Vec<MasteryRecord>,
}

impl CharacterRecord {
    pub fn normalize(self) -> Result<Character> {
        let level = u32::try_from(self.level)
            .ok()
            .filter(|level| *level >= 1)
            .ok_or_else(|| invalid("level", self.level))?;
        if self.experience_points < 0 {
            return Err(invalid("experience points", self.experience_points));
        }
        let abilities = AbilityScores {
            strength: self.strength,
            dexterity: self.dexterity,
            constitution: self.constitution,
            intelligence: self.intelligence,
            wisdom: self.wisdom,
            charisma: self.charisma,
        };
        let adjustments = CombatAdjustments {
            melee: self
                .melee_modifier
                .unwrap_or_else(|| abilities.modifier(Modifier::Melee)),
            damage: self
                .damage_adjustment
                .unwrap_or_else(|| abilities.modifier(Modifier::Damage)),
            ranged: self
                .ranged_modifier
                .unwrap_or_else(|| abilities.modifier(Modifier::Ranged)),
            defence: self
                .defence_adjustment
                .unwrap_or_else(|| abilities.modifier(Modifier::Defence)),
        };

        let current = self.current_hit_points.or(self.hit_points).unwrap_or(0);
        let max = self.max_hit_points.or(self.hit_points).unwrap_or(current);
        let temporary = self.temporary_hit_points.unwrap_or(0).max(0);

        let class_abilities = self.abilities.unwrap_or_default();
        let natural_ac = self
            .natural_ac
            .filter(|ac| *ac > 0)
            .or(class_abilities.natural_ac)
            .unwrap_or(0);

        Ok(Character {
            name: self.name,
            class: CharacterClass::parse(&self.class),
            level,
            abilities,
            hit_points: HitPoints {
                current,
                max,
                temporary,
            },
            experience_points: self.experience_points as u64,
            fighting_ability: self.fighting_ability,
            adjustments,
            natural_ac,
            other_ac_bonus: class_abilities.ac_bonus.unwrap_or(0),
        })
    }
}

impl InventoryItemRecord {
    pub fn normalize(self) -> Result<InventoryItem> {
        let item_type = ItemType::parse(&self.item_type)
            .ok_or_else(|| EngineError::UnknownItemType(self.item_type.clone()))?;
        let quantity = u32::try_from(self.quantity)
            .ok()
            .filter(|quantity| *quantity >= 1)
            .ok_or_else(|| invalid("quantity", self.quantity))?;
        let d = self.item_details;
        let weight = d.weight.unwrap_or(0.0);
        if weight < 0.0 {
            return Err(EngineError::NegativeWeight {
                item: d.name,
                weight,
            });
        }
        // Free-text rates from the backend ("2", "1 per round") are dropped, not fatal.
        let rate_of_fire = d
            .rate_of_fire
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .and_then(|r| match r.parse::<AttackRate>() {
                Ok(rate) => Some(rate),
                Err(err) => {
                    tracing::warn!(item = %d.name, %err, "ignoring rate of fire");
                    None
                }
            });
        let slot = match self.slot.as_deref().and_then(EquipmentSlot::parse) {
            Some(slot) => Some(slot),
            None if self.is_equipped => item_type.slots().first().copied(),
            None => None,
        };

        Ok(InventoryItem {
            id: self.id,
            item_type,
            quantity,
            is_equipped: self.is_equipped,
            slot,
            details: ItemDetails {
                name: d.name,
                weight,
                ac: d.ac.filter(|ac| *ac > 0),
                defense_modifier: d.defense_modifier.unwrap_or(0),
                damage: d.damage,
                movement_rate: d.movement_rate,
                weight_class: d.weight_class.as_deref().and_then(WeightClass::parse),
                category: d.category.as_deref().map(WeaponCategory::parse),
                rate_of_fire,
                properties: d.properties.unwrap_or_default(),
            },
        })
    }
}

impl InventoryRecord {
    pub fn normalize(self) -> Result<Inventory> {
        let items = self
            .items
            .into_iter()
            .map(InventoryItemRecord::normalize)
            .collect::<Result<Vec<_>>>()?;
        let treasure = self.treasure.map(|t| Treasure {
            gold_coins: t.gold_coins,
            silver_coins: t.silver_coins,
            copper_coins: t.copper_coins,
            electrum_coins: t.electrum_coins,
            platinum_coins: t.platinum_coins,
        });
        Ok(Inventory { items, treasure })
    }
}

impl SnapshotRecord {
    pub fn normalize(self) -> Result<Snapshot> {
        let masteries = self
            .weapon_masteries
            .into_iter()
            .map(|m| {
                Ok(WeaponMastery {
                    weapon_base_name: m.weapon_base_name,
                    mastery_level: MasteryLevel::parse(&m.mastery_level)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Snapshot {
            character: self.character.normalize()?,
            inventory: self.inventory.normalize()?,
            masteries: MasteryBook::new(masteries)?,
        })
    }
}

pub fn snapshot_from_json(text: &str) -> Result<Snapshot> {
    let record: SnapshotRecord = serde_json::from_str(text).map_err(|source| EngineError::Json {
        what: "snapshot",
        source,
    })?;
    record.normalize()
}

pub fn character_from_json(text: &str) -> Result<Character> {
    let record: CharacterRecord = serde_json::from_str(text).map_err(|source| EngineError::Json {
        what: "character",
        source,
    })?;
    record.normalize()
}

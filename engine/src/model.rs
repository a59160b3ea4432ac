//! Canonical snapshot types. The backend's loosely-shaped JSON is mapped onto
//! these by [`crate::ingest`]; everything downstream only sees these.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::abilities::AbilityScores;
use crate::combat::mastery::MasteryBook;
use crate::combat::rate::AttackRate;
use crate::combat::weapons::WeaponCategory;
use crate::life::HitPoints;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Fighter,
    Ranger,
    Paladin,
    Barbarian,
    Berserker,
    Cataphract,
    Huntsman,
    Thief,
    Monk,
    Magician,
    Cleric,
    #[serde(other)]
    Other,
}

impl CharacterClass {
    /// Case-insensitive; anything unrecognised becomes `Other`.
    pub fn parse(name: &str) -> Self {
        use CharacterClass::*;
        match name.trim().to_lowercase().as_str() {
            "fighter" => Fighter,
            "ranger" => Ranger,
            "paladin" => Paladin,
            "barbarian" => Barbarian,
            "berserker" => Berserker,
            "cataphract" => Cataphract,
            "huntsman" => Huntsman,
            "thief" => Thief,
            "monk" => Monk,
            "magician" => Magician,
            "cleric" => Cleric,
            _ => Other,
        }
    }

    /// Warrior classes: weapon mastery and the level 7 melee rate increase.
    pub fn is_fighter_type(self) -> bool {
        use CharacterClass::*;
        matches!(
            self,
            Fighter | Ranger | Paladin | Barbarian | Berserker | Cataphract | Huntsman
        )
    }
}

/// Combat adjustments as stored on the character. Filled from the ability
/// table when the backend omits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombatAdjustments {
    pub melee: i32,
    pub damage: i32,
    pub ranged: i32,
    pub defence: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub abilities: AbilityScores,
    pub hit_points: HitPoints,
    pub experience_points: u64,
    pub fighting_ability: i32,
    pub adjustments: CombatAdjustments,
    #[serde(default)]
    pub natural_ac: i32,
    #[serde(default)]
    pub other_ac_bonus: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Weapon,
    Armor,
    Shield,
    Potion,
    MagicItem,
    Ring,
    Ammo,
    SpellScroll,
    Container,
    Equipment,
}

impl ItemType {
    pub fn parse(s: &str) -> Option<Self> {
        use ItemType::*;
        Some(match s.trim().to_lowercase().as_str() {
            "weapon" => Weapon,
            "armor" | "armour" => Armor,
            "shield" => Shield,
            "potion" => Potion,
            "magic_item" => MagicItem,
            "ring" => Ring,
            "ammo" => Ammo,
            "spell_scroll" => SpellScroll,
            "container" => Container,
            "equipment" => Equipment,
            _ => return None,
        })
    }

    /// Label used for the weight-by-type breakdown.
    pub fn group(self) -> &'static str {
        use ItemType::*;
        match self {
            Weapon => "weapons",
            Armor => "armor",
            Shield => "shields",
            Potion => "potions",
            MagicItem => "magic_items",
            Ring => "rings",
            Ammo => "ammunition",
            SpellScroll => "scrolls",
            Container => "containers",
            Equipment => "equipment",
        }
    }

    pub fn slots(self) -> &'static [EquipmentSlot] {
        use EquipmentSlot::*;
        match self {
            ItemType::Weapon => &[MainHand, OffHand],
            ItemType::Armor => &[Body],
            ItemType::Shield => &[OffHand],
            ItemType::Ring => &[RingLeft, RingRight],
            _ => &[],
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Body,
    MainHand,
    OffHand,
    RingLeft,
    RingRight,
    Neck,
    Back,
    Belt,
    Feet,
    Hands,
}

impl EquipmentSlot {
    pub fn parse(s: &str) -> Option<Self> {
        use EquipmentSlot::*;
        Some(match s.trim().to_lowercase().as_str() {
            "head" => Head,
            "body" => Body,
            "main_hand" => MainHand,
            "off_hand" => OffHand,
            "ring_left" => RingLeft,
            "ring_right" => RingRight,
            "neck" => Neck,
            "back" => Back,
            "belt" => Belt,
            "feet" => Feet,
            "hands" => Hands,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightClass {
    Light,
    Medium,
    Heavy,
}

impl WeightClass {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(WeightClass::Light),
            "medium" => Some(WeightClass::Medium),
            "heavy" => Some(WeightClass::Heavy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemDetails {
    pub name: String,
    pub weight: f64,
    pub ac: Option<i32>,
    pub defense_modifier: i32,
    pub damage: Option<String>,
    pub movement_rate: Option<i32>,
    pub weight_class: Option<WeightClass>,
    pub category: Option<WeaponCategory>,
    pub rate_of_fire: Option<AttackRate>,
    pub properties: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub item_type: ItemType,
    pub quantity: u32,
    pub is_equipped: bool,
    pub slot: Option<EquipmentSlot>,
    pub details: ItemDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Treasure {
    pub gold_coins: u64,
    pub silver_coins: u64,
    pub copper_coins: u64,
    pub electrum_coins: u64,
    pub platinum_coins: u64,
}

impl Treasure {
    pub fn total_coins(&self) -> u64 {
        [
            self.silver_coins,
            self.copper_coins,
            self.electrum_coins,
            self.platinum_coins,
        ]
        .into_iter()
        .fold(self.gold_coins, u64::saturating_add)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<InventoryItem>,
    pub treasure: Option<Treasure>,
}

impl Inventory {
    pub fn equipped(&self, item_type: ItemType) -> impl Iterator<Item = &InventoryItem> {
        self.items
            .iter()
            .filter(move |i| i.is_equipped && i.item_type == item_type)
    }

    /// Last equipped item of the given type wins when several are flagged.
    pub fn equipped_one(&self, item_type: ItemType) -> Option<&InventoryItem> {
        self.equipped(item_type).last()
    }
}

/// Everything one derivation needs, fetched by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub character: Character,
    pub inventory: Inventory,
    pub masteries: MasteryBook,
}

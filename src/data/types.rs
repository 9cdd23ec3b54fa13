use crate::combat::types::Stat;
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quest {
    pub quest_id: String,
    pub title: String,
    pub description: String,
    pub reward_xp: u64,
    pub reward_gold: u64,
    pub required_level: u32,
    pub prerequisite: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
}

impl ItemType {
    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Weapon => "weapon",
            ItemType::Armor => "armor",
            ItemType::Consumable => "consumable",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemType {
    type Err = GameError;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "weapon" => Ok(ItemType::Weapon),
            "armor" => Ok(ItemType::Armor),
            "consumable" => Ok(ItemType::Consumable),
            other => Err(GameError::InvalidDataFormat(format!(
                "unknown item type '{}'",
                other
            ))),
        }
    }
}

/// A `stat:value` modifier, e.g. `strength:5` or `health:20`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemEffect {
    pub stat: Stat,
    pub value: i32,
}

impl ItemEffect {
    /// Weapons and armor may only carry a non-negative bonus to max health,
    /// strength or magic. Those are the effects unequipping can take off
    /// again exactly.
    pub fn is_equipment_bonus(&self) -> bool {
        self.stat != Stat::Health && self.value >= 0
    }
}

impl fmt::Display for ItemEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.stat.key(), self.value)
    }
}

impl FromStr for ItemEffect {
    type Err = GameError;

    fn from_str(input: &str) -> Result<Self> {
        let (stat, value) = input.split_once(':').ok_or_else(|| {
            GameError::InvalidDataFormat(format!("effect '{}' is not stat:value", input))
        })?;
        let value = value.trim().parse().map_err(|_| {
            GameError::InvalidDataFormat(format!("effect value '{}' is not a number", value))
        })?;
        Ok(ItemEffect {
            stat: stat.parse()?,
            value,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub item_id: String,
    pub name: String,
    pub item_type: ItemType,
    pub effect: ItemEffect,
    pub cost: u64,
    pub description: String,
}

impl Item {
    pub fn is_equipment(&self) -> bool {
        matches!(self.item_type, ItemType::Weapon | ItemType::Armor)
    }
}

/// Catalogs keyed by id. Ordered so listings are stable.
pub type QuestCatalog = BTreeMap<String, Quest>;
pub type ItemCatalog = BTreeMap<String, Item>;

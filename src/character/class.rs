use crate::core::constants::*;
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

/// Starting combat stats of a class at level 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub max_health: u32,
    pub strength: u32,
    pub magic: u32,
}

/// Stat increase applied on every level up, identical for all classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatGrowth {
    pub max_health: u32,
    pub strength: u32,
    pub magic: u32,
}

pub const LEVEL_UP_GROWTH: StatGrowth = StatGrowth {
    max_health: LEVEL_UP_MAX_HEALTH,
    strength: LEVEL_UP_STRENGTH,
    magic: LEVEL_UP_MAGIC,
};

impl CharacterClass {
    pub fn all() -> [CharacterClass; 4] {
        [
            CharacterClass::Warrior,
            CharacterClass::Mage,
            CharacterClass::Rogue,
            CharacterClass::Cleric,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Cleric => "Cleric",
        }
    }

    pub fn base_stats(&self) -> BaseStats {
        let (max_health, strength, magic) = match self {
            CharacterClass::Warrior => WARRIOR_BASE_STATS,
            CharacterClass::Mage => MAGE_BASE_STATS,
            CharacterClass::Rogue => ROGUE_BASE_STATS,
            CharacterClass::Cleric => CLERIC_BASE_STATS,
        };
        BaseStats {
            max_health,
            strength,
            magic,
        }
    }

    /// Stats a fresh character of this class would have at `level`.
    pub fn stats_at_level(&self, level: u32) -> BaseStats {
        let base = self.base_stats();
        let gained = level.saturating_sub(STARTING_LEVEL);
        BaseStats {
            max_health: base.max_health + gained * LEVEL_UP_GROWTH.max_health,
            strength: base.strength + gained * LEVEL_UP_GROWTH.strength,
            magic: base.magic + gained * LEVEL_UP_GROWTH.magic,
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts a class name in any case, or its menu number (1-4).
impl FromStr for CharacterClass {
    type Err = GameError;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "warrior" | "1" => Ok(CharacterClass::Warrior),
            "mage" | "2" => Ok(CharacterClass::Mage),
            "rogue" | "3" => Ok(CharacterClass::Rogue),
            "cleric" | "4" => Ok(CharacterClass::Cleric),
            _ => Err(GameError::InvalidCharacterClass(input.trim().to_string())),
        }
    }
}

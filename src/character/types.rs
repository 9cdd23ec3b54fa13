use super::class::CharacterClass;
use super::manager::validate_name;
use crate::combat::types::{Combatant, CombatantKind};
use crate::core::constants::*;
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};

/// A player character: combat stats plus everything the outer game tracks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    class: CharacterClass,
    pub level: u32,
    pub experience: u64,
    pub gold: u64,
    pub combatant: Combatant,
    pub inventory: Vec<String>,
    pub active_quests: Vec<String>,
    pub completed_quests: Vec<String>,
    pub equipped_weapon: Option<String>,
    pub equipped_armor: Option<String>,
    pub last_save_time: i64,
}

impl Character {
    /// A fresh level 1 character with the class's base stats.
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        let stats = class.base_stats();
        Self {
            combatant: Combatant::new(
                name,
                CombatantKind::Player(class),
                stats.max_health,
                stats.strength,
                stats.magic,
            ),
            class,
            level: STARTING_LEVEL,
            experience: 0,
            gold: STARTING_GOLD,
            inventory: Vec::new(),
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
            last_save_time: 0,
        }
    }

    /// Validates the name, parses the class name (or menu number) and
    /// creates the character.
    pub fn create(name: &str, class_name: &str) -> Result<Self> {
        validate_name(name)?;
        let class: CharacterClass = class_name.parse()?;
        Ok(Self::new(name.trim(), class))
    }

    /// Rebuilds a character from persisted parts. The combatant carries the
    /// name and its kind must match the class.
    pub(crate) fn from_parts(class: CharacterClass, combatant: Combatant) -> Self {
        let mut character = Self::new(combatant.name.clone(), class);
        character.combatant = combatant;
        character
    }

    /// The character's name, shared with its combatant so battle logs and
    /// saves always agree.
    pub fn name(&self) -> &str {
        &self.combatant.name
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    pub fn health(&self) -> u32 {
        self.combatant.health()
    }

    pub fn max_health(&self) -> u32 {
        self.combatant.max_health()
    }

    pub fn strength(&self) -> u32 {
        self.combatant.strength
    }

    pub fn magic(&self) -> u32 {
        self.combatant.magic
    }

    pub fn is_dead(&self) -> bool {
        !self.combatant.is_alive()
    }

    /// Heals up to max health and returns the amount restored. Dead
    /// characters are not healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.combatant.heal(amount)
    }

    /// Returns a dead character to half health. No-op for the living.
    pub fn revive(&mut self) -> bool {
        self.combatant.revive()
    }

    /// Adds (or with a negative amount, spends) gold and returns the new
    /// total. A negative result fails without changing the balance.
    pub fn add_gold(&mut self, amount: i64) -> Result<u64> {
        let new_total = if amount >= 0 {
            self.gold.saturating_add(amount.unsigned_abs())
        } else {
            let cost = amount.unsigned_abs();
            self.gold
                .checked_sub(cost)
                .ok_or(GameError::InsufficientResources {
                    needed: cost,
                    available: self.gold,
                })?
        };
        self.gold = new_total;
        Ok(new_total)
    }
}

use crate::character::class::CharacterClass;
use crate::core::constants::*;
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Goblin,
    Orc,
    Dragon,
}

impl EnemyKind {
    pub fn all() -> [EnemyKind; 3] {
        [EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Dragon]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "Goblin",
            EnemyKind::Orc => "Orc",
            EnemyKind::Dragon => "Dragon",
        }
    }

    /// Returns (max_health, strength, magic, experience_reward, gold_reward).
    fn stats(&self) -> (u32, u32, u32, u64, u64) {
        match self {
            EnemyKind::Goblin => GOBLIN_STATS,
            EnemyKind::Orc => ORC_STATS,
            EnemyKind::Dragon => DRAGON_STATS,
        }
    }

    /// Goblins for levels 1-2, orcs for 3-5, dragons beyond.
    pub fn for_level(level: u32) -> EnemyKind {
        if level <= GOBLIN_MAX_LEVEL {
            EnemyKind::Goblin
        } else if level <= ORC_MAX_LEVEL {
            EnemyKind::Orc
        } else {
            EnemyKind::Dragon
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnemyKind {
    type Err = GameError;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "goblin" => Ok(EnemyKind::Goblin),
            "orc" => Ok(EnemyKind::Orc),
            "dragon" => Ok(EnemyKind::Dragon),
            _ => Err(GameError::InvalidTarget(input.trim().to_string())),
        }
    }
}

/// Which ability/behavior set applies to a combatant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CombatantKind {
    Player(CharacterClass),
    Enemy(EnemyKind),
}

impl fmt::Display for CombatantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatantKind::Player(class) => class.fmt(f),
            CombatantKind::Enemy(kind) => kind.fmt(f),
        }
    }
}

/// A stat that items and level ups can modify.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Stat {
    Health,
    MaxHealth,
    Strength,
    Magic,
}

impl Stat {
    pub fn key(&self) -> &'static str {
        match self {
            Stat::Health => "health",
            Stat::MaxHealth => "max_health",
            Stat::Strength => "strength",
            Stat::Magic => "magic",
        }
    }
}

impl FromStr for Stat {
    type Err = GameError;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "health" => Ok(Stat::Health),
            "max_health" => Ok(Stat::MaxHealth),
            "strength" => Ok(Stat::Strength),
            "magic" => Ok(Stat::Magic),
            other => Err(GameError::InvalidDataFormat(format!("unknown stat '{}'", other))),
        }
    }
}

/// Shared combat shape of player characters and enemies.
///
/// `health` stays within `0..=max_health` after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Combatant {
    pub name: String,
    pub kind: CombatantKind,
    health: u32,
    max_health: u32,
    pub strength: u32,
    pub magic: u32,
}

impl Combatant {
    /// Creates a combatant at full health.
    pub fn new(
        name: impl Into<String>,
        kind: CombatantKind,
        max_health: u32,
        strength: u32,
        magic: u32,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            health: max_health,
            max_health,
            strength,
            magic,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Sets health, clamped to `max_health`.
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    /// Returns the damage actually absorbed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.health);
        self.health -= taken;
        taken
    }

    /// Heals up to `max_health` and returns the amount restored. A dead
    /// combatant is not healed; use [`Combatant::revive`] instead.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let healed = amount.min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    pub fn restore_full(&mut self) {
        self.health = self.max_health;
    }

    /// Brings a dead combatant back at half health (at least 1). Living
    /// combatants are left untouched. Returns true if a revive happened.
    pub fn revive(&mut self) -> bool {
        if self.is_alive() {
            return false;
        }
        self.health = (self.max_health / 2).max(1);
        true
    }

    /// Adds `delta` to a stat, saturating at zero. Lowering `max_health`
    /// drags `health` down with it; raising it leaves `health` alone.
    pub fn adjust_stat(&mut self, stat: Stat, delta: i32) {
        match stat {
            Stat::Health => {
                if delta >= 0 {
                    self.heal(delta.unsigned_abs());
                } else {
                    self.take_damage(delta.unsigned_abs());
                }
            }
            Stat::MaxHealth => {
                self.max_health = apply_delta(self.max_health, delta);
                self.health = self.health.min(self.max_health);
            }
            Stat::Strength => self.strength = apply_delta(self.strength, delta),
            Stat::Magic => self.magic = apply_delta(self.magic, delta),
        }
    }

    /// Level-up growth: raise the caps, then heal to the new maximum.
    pub fn grow(&mut self, max_health: u32, strength: u32, magic: u32) {
        self.max_health = self.max_health.saturating_add(max_health);
        self.strength = self.strength.saturating_add(strength);
        self.magic = self.magic.saturating_add(magic);
        self.restore_full();
    }

    /// Rebuilds a combatant from persisted values, rejecting health above
    /// the cap.
    pub fn from_parts(
        name: impl Into<String>,
        kind: CombatantKind,
        health: u32,
        max_health: u32,
        strength: u32,
        magic: u32,
    ) -> Result<Self> {
        if health > max_health {
            return Err(GameError::InvalidSaveData(format!(
                "health {} exceeds max health {}",
                health, max_health
            )));
        }
        Ok(Self {
            name: name.into(),
            kind,
            health,
            max_health,
            strength,
            magic,
        })
    }
}

fn apply_delta(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta.unsigned_abs())
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}

/// An enemy combatant plus the rewards it yields when defeated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Enemy {
    pub combatant: Combatant,
    experience_reward: u64,
    gold_reward: u64,
}

impl Enemy {
    pub fn new(kind: EnemyKind) -> Self {
        let (max_health, strength, magic, experience_reward, gold_reward) = kind.stats();
        Self {
            combatant: Combatant::new(
                kind.name(),
                CombatantKind::Enemy(kind),
                max_health,
                strength,
                magic,
            ),
            experience_reward,
            gold_reward,
        }
    }

    /// Looks up an enemy by name, failing with `InvalidTarget` for unknown
    /// kinds.
    pub fn create(kind_name: &str) -> Result<Self> {
        Ok(Self::new(kind_name.parse()?))
    }

    pub fn for_level(level: u32) -> Self {
        Self::new(EnemyKind::for_level(level))
    }

    pub fn name(&self) -> &str {
        &self.combatant.name
    }

    pub fn experience_reward(&self) -> u64 {
        self.experience_reward
    }

    pub fn gold_reward(&self) -> u64 {
        self.gold_reward
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Winner {
    Player,
    Enemy,
}

/// Rewards from a won battle. Produced at most once per battle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BattleOutcome {
    pub winner: Winner,
    pub experience_gained: u64,
    pub gold_gained: u64,
}

//! Simulation configuration.

use crate::character::class::CharacterClass;
use crate::combat::types::EnemyKind;
use crate::error::{GameError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How the simulated player picks actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimPolicy {
    /// Basic attacks only.
    BasicOnly,
    /// Use the class ability whenever it is off cooldown, attack otherwise.
    AbilityWhenReady,
}

impl fmt::Display for SimPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimPolicy::BasicOnly => f.write_str("basic"),
            SimPolicy::AbilityWhenReady => f.write_str("ability"),
        }
    }
}

impl FromStr for SimPolicy {
    type Err = GameError;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "basic" | "basic-only" => Ok(SimPolicy::BasicOnly),
            "ability" | "ability-when-ready" => Ok(SimPolicy::AbilityWhenReady),
            other => Err(GameError::InvalidDataFormat(format!(
                "unknown policy '{}'",
                other
            ))),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Battles per class/enemy matchup
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    pub classes: Vec<CharacterClass>,
    pub enemies: Vec<EnemyKind>,
    pub policy: SimPolicy,

    /// Level the simulated characters fight at
    pub player_level: u32,

    /// Flee once health drops below this percentage of max (None = never)
    pub flee_below_percent: Option<u32>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            classes: CharacterClass::all().to_vec(),
            enemies: EnemyKind::all().to_vec(),
            policy: SimPolicy::AbilityWhenReady,
            player_level: 1,
            flee_below_percent: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for a fast balance check
    pub fn quick() -> Self {
        Self {
            num_runs: 100,
            seed: Some(42),
            ..Default::default()
        }
    }

    /// Each class against the enemy it meets at `level`.
    pub fn level_matchups(level: u32) -> Self {
        Self {
            player_level: level,
            enemies: vec![EnemyKind::for_level(level)],
            ..Default::default()
        }
    }
}

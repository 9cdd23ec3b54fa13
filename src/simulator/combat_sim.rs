//! Single simulated battles driven by a fixed policy.

use super::config::SimPolicy;
use crate::character::class::CharacterClass;
use crate::combat::ability::Ability;
use crate::combat::logic::{ActionSource, Battle, BattleResolution, PlayerAction};
use crate::combat::types::{Combatant, CombatantKind, Enemy, EnemyKind};
use crate::error::{GameError, Result};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleResult {
    Won,
    Lost,
    Escaped,
}

/// What happened in one simulated battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleRecord {
    pub result: BattleResult,
    pub turns: u32,
    pub remaining_health: u32,
}

/// Picks actions according to a [`SimPolicy`].
pub struct PolicyActions {
    policy: SimPolicy,
    flee_below_percent: Option<u32>,
}

impl PolicyActions {
    pub fn new(policy: SimPolicy, flee_below_percent: Option<u32>) -> Self {
        Self {
            policy,
            flee_below_percent,
        }
    }

    fn should_flee(&self, player: &Combatant) -> bool {
        match self.flee_below_percent {
            Some(percent) => {
                (player.health() as u64) * 100 < (player.max_health() as u64) * percent as u64
            }
            None => false,
        }
    }
}

impl ActionSource for PolicyActions {
    fn choose_action(&mut self, battle: &Battle<'_>) -> PlayerAction {
        if self.should_flee(battle.player()) {
            return PlayerAction::Flee;
        }
        match self.policy {
            SimPolicy::AbilityWhenReady
                if battle.ability_cooldown() == 0
                    && Ability::for_combatant(battle.player()).is_ok() =>
            {
                PlayerAction::Ability
            }
            _ => PlayerAction::Attack,
        }
    }
}

/// A fresh combatant with the class's stats at `level`.
pub fn sim_player(class: CharacterClass, level: u32) -> Combatant {
    let stats = class.stats_at_level(level);
    Combatant::new(
        class.name(),
        CombatantKind::Player(class),
        stats.max_health,
        stats.strength,
        stats.magic,
    )
}

pub fn simulate_battle<R: Rng>(
    class: CharacterClass,
    level: u32,
    enemy: EnemyKind,
    actions: &mut PolicyActions,
    rng: &mut R,
) -> Result<BattleRecord> {
    let mut player = sim_player(class, level);
    let mut enemy = Enemy::new(enemy);

    let mut battle = Battle::new(&mut player, &mut enemy)?;
    let result = match battle.run(actions, rng) {
        Ok(BattleResolution::Victory(_)) => BattleResult::Won,
        Ok(BattleResolution::Escaped) => BattleResult::Escaped,
        Err(GameError::CharacterDead) => BattleResult::Lost,
        Err(err) => return Err(err),
    };

    Ok(BattleRecord {
        result,
        turns: battle.turn(),
        remaining_health: battle.player().health(),
    })
}

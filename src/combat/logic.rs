//! Turn-based battle between one player combatant and one scripted enemy.
//!
//! Each turn runs `AwaitingPlayerAction -> CheckEnd -> AwaitingEnemyAction
//! -> CheckEnd`, looping back to `AwaitingPlayerAction` or ending in
//! `Terminated`. The enemy always performs a basic attack.

use super::ability::{resolve_ability, Ability, AbilityEffect};
use super::damage::basic_attack_damage;
use super::types::{BattleOutcome, Combatant, Enemy, Winner};
use crate::core::constants::{ABILITY_COOLDOWN_TURNS, ESCAPE_CHANCE};
use crate::error::{GameError, Result};
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    AwaitingPlayerAction,
    AwaitingEnemyAction,
    CheckEnd,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    Ability,
    Flee,
    /// Anything unrecognized. Costs the turn and does nothing.
    Invalid(String),
}

impl PlayerAction {
    /// Maps a menu choice ("1"/"2"/"3" or a word) to an action.
    pub fn from_choice(choice: &str) -> PlayerAction {
        match choice.trim().to_lowercase().as_str() {
            "1" | "attack" | "a" => PlayerAction::Attack,
            "2" | "ability" | "special" | "s" => PlayerAction::Ability,
            "3" | "run" | "flee" | "r" => PlayerAction::Flee,
            other => PlayerAction::Invalid(other.to_string()),
        }
    }
}

/// Everything observable that happens during a battle, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    TurnStarted { turn: u32 },
    PlayerAttack { damage: u32 },
    AbilityUsed(AbilityEffect),
    TurnWasted { input: String },
    EscapeSucceeded,
    EscapeFailed,
    EnemyAttack { damage: u32 },
    EnemyDefeated,
    PlayerDefeated,
}

impl BattleEvent {
    /// One-line battle log text for the player.
    pub fn describe(&self, enemy_name: &str) -> String {
        match self {
            BattleEvent::TurnStarted { turn } => format!("--- Turn {} ---", turn),
            BattleEvent::PlayerAttack { damage } => {
                format!("You attack the {} for {} damage!", enemy_name, damage)
            }
            BattleEvent::AbilityUsed(effect) => effect.description.clone(),
            BattleEvent::TurnWasted { .. } => "Invalid choice! You lose your turn.".to_string(),
            BattleEvent::EscapeSucceeded => "You successfully escaped the battle!".to_string(),
            BattleEvent::EscapeFailed => "Escape failed! The battle continues.".to_string(),
            BattleEvent::EnemyAttack { damage } => {
                format!("The {} attacks you for {} damage!", enemy_name, damage)
            }
            BattleEvent::EnemyDefeated => format!("The {} is defeated!", enemy_name),
            BattleEvent::PlayerDefeated => format!("You were defeated by the {}...", enemy_name),
        }
    }
}

/// How a battle ended without the player dying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleResolution {
    Victory(BattleOutcome),
    Escaped,
}

/// Supplies player decisions to [`Battle::run`]. This is the blocking
/// request/response point at the system boundary (stdin, a script, an AI).
pub trait ActionSource {
    fn choose_action(&mut self, battle: &Battle<'_>) -> PlayerAction;

    /// Called for every event as the battle produces it.
    fn observe(&mut self, _event: &BattleEvent, _battle: &Battle<'_>) {}

    /// Called when an ability request was refused without using the turn.
    fn rejected(&mut self, _error: &GameError) {}
}

/// A single encounter. Borrows both combatants and mutates them in place
/// for its duration.
pub struct Battle<'a> {
    player: &'a mut Combatant,
    enemy: &'a mut Enemy,
    active: bool,
    turn: u32,
    phase: BattlePhase,
    ability_ready_turn: u32,
    log: Vec<BattleEvent>,
}

impl<'a> Battle<'a> {
    /// Fails with `CharacterDead` if the player is already at 0 health and
    /// with `InvalidTarget` if the enemy is; nothing is touched either way.
    pub fn new(player: &'a mut Combatant, enemy: &'a mut Enemy) -> Result<Self> {
        if !player.is_alive() {
            return Err(GameError::CharacterDead);
        }
        if !enemy.combatant.is_alive() {
            return Err(GameError::InvalidTarget(enemy.name().to_string()));
        }

        info!(player = %player.name, enemy = %enemy.name(), "battle started");

        Ok(Self {
            player,
            enemy,
            active: true,
            turn: 1,
            phase: BattlePhase::AwaitingPlayerAction,
            ability_ready_turn: 1,
            log: vec![BattleEvent::TurnStarted { turn: 1 }],
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn player(&self) -> &Combatant {
        &*self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &*self.enemy
    }

    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    /// Turns left before the special ability can be used again (0 = ready).
    pub fn ability_cooldown(&self) -> u32 {
        self.ability_ready_turn.saturating_sub(self.turn)
    }

    /// `Some(winner)` once either side is at 0 health.
    pub fn check_battle_end(&self) -> Option<Winner> {
        if !self.enemy.combatant.is_alive() {
            Some(Winner::Player)
        } else if !self.player.is_alive() {
            Some(Winner::Enemy)
        } else {
            None
        }
    }

    /// Play one full turn: the player's action, then (if the battle is
    /// still on) the enemy's attack.
    ///
    /// Returns `Ok(Some(_))` when the battle ended in victory or escape,
    /// `Ok(None)` when it continues, and `Err(CharacterDead)` when the player
    /// died. Ability requests that cannot be honored fail with
    /// `AbilityOnCooldown`/`AbilityUnavailable` without spending the turn.
    pub fn take_turn(
        &mut self,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<Option<BattleResolution>> {
        if !self.active {
            return Err(GameError::CombatNotActive);
        }
        if action == PlayerAction::Ability {
            Ability::for_combatant(&*self.player)?;
            let turns_remaining = self.ability_cooldown();
            if turns_remaining > 0 {
                return Err(GameError::AbilityOnCooldown { turns_remaining });
            }
        }

        if self.player_action(action, rng)? {
            self.terminate();
            info!(turn = self.turn, "player escaped");
            return Ok(Some(BattleResolution::Escaped));
        }

        self.phase = BattlePhase::CheckEnd;
        if self.check_battle_end() == Some(Winner::Player) {
            return Ok(Some(self.finish_victory()));
        }

        self.phase = BattlePhase::AwaitingEnemyAction;
        self.enemy_turn();

        self.phase = BattlePhase::CheckEnd;
        if self.check_battle_end() == Some(Winner::Enemy) {
            self.log.push(BattleEvent::PlayerDefeated);
            self.terminate();
            info!(turn = self.turn, enemy = %self.enemy.name(), "player defeated");
            return Err(GameError::CharacterDead);
        }

        self.turn += 1;
        self.phase = BattlePhase::AwaitingPlayerAction;
        self.log.push(BattleEvent::TurnStarted { turn: self.turn });
        Ok(None)
    }

    /// Drive the battle to completion, asking `actions` for each decision.
    ///
    /// A win yields the enemy's rewards; a loss is `Err(CharacterDead)`; an
    /// escape ends with no reward.
    pub fn run<A, R>(&mut self, actions: &mut A, rng: &mut R) -> Result<BattleResolution>
    where
        A: ActionSource,
        R: Rng,
    {
        if !self.active {
            return Err(GameError::CombatNotActive);
        }

        let mut seen = 0;
        loop {
            self.flush_events(&mut seen, actions);
            let action = actions.choose_action(self);
            let result = self.take_turn(action, rng);
            self.flush_events(&mut seen, actions);

            match result {
                Ok(Some(resolution)) => return Ok(resolution),
                Ok(None) => {}
                Err(err @ (GameError::AbilityOnCooldown { .. } | GameError::AbilityUnavailable(_))) => {
                    actions.rejected(&err);
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn flush_events<A: ActionSource>(&self, seen: &mut usize, actions: &mut A) {
        for event in &self.log[*seen..] {
            actions.observe(event, self);
        }
        *seen = self.log.len();
    }

    /// Resolves the player's action. Returns true if the player escaped.
    fn player_action(&mut self, action: PlayerAction, rng: &mut impl Rng) -> Result<bool> {
        match action {
            PlayerAction::Attack => {
                let damage = basic_attack_damage(&*self.player, &self.enemy.combatant);
                let dealt = self.enemy.combatant.take_damage(damage);
                debug!(turn = self.turn, damage = dealt, "player attack");
                self.log.push(BattleEvent::PlayerAttack { damage: dealt });
            }
            PlayerAction::Ability => {
                let effect = resolve_ability(&mut *self.player, &mut self.enemy.combatant, rng)?;
                self.ability_ready_turn = self.turn + 1 + ABILITY_COOLDOWN_TURNS;
                self.log.push(BattleEvent::AbilityUsed(effect));
            }
            PlayerAction::Flee => {
                if rng.gen_bool(ESCAPE_CHANCE) {
                    self.log.push(BattleEvent::EscapeSucceeded);
                    return Ok(true);
                }
                debug!(turn = self.turn, "escape failed");
                self.log.push(BattleEvent::EscapeFailed);
            }
            PlayerAction::Invalid(input) => {
                debug!(turn = self.turn, %input, "turn wasted");
                self.log.push(BattleEvent::TurnWasted { input });
            }
        }
        Ok(false)
    }

    fn enemy_turn(&mut self) {
        let damage = basic_attack_damage(&self.enemy.combatant, &*self.player);
        let dealt = self.player.take_damage(damage);
        debug!(turn = self.turn, damage = dealt, "enemy attack");
        self.log.push(BattleEvent::EnemyAttack { damage: dealt });
    }

    fn finish_victory(&mut self) -> BattleResolution {
        self.log.push(BattleEvent::EnemyDefeated);
        self.terminate();
        let outcome = BattleOutcome {
            winner: Winner::Player,
            experience_gained: self.enemy.experience_reward(),
            gold_gained: self.enemy.gold_reward(),
        };
        info!(
            turn = self.turn,
            enemy = %self.enemy.name(),
            experience = outcome.experience_gained,
            gold = outcome.gold_gained,
            "battle won"
        );
        BattleResolution::Victory(outcome)
    }

    fn terminate(&mut self) {
        self.active = false;
        self.phase = BattlePhase::Terminated;
    }
}

/// Replays a fixed list of actions, then falls back to basic attacks.
#[derive(Debug, Clone, Default)]
pub struct ScriptedActions {
    script: std::collections::VecDeque<PlayerAction>,
}

impl ScriptedActions {
    pub fn new(actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        Self {
            script: actions.into_iter().collect(),
        }
    }
}

impl ActionSource for ScriptedActions {
    fn choose_action(&mut self, _battle: &Battle<'_>) -> PlayerAction {
        self.script.pop_front().unwrap_or(PlayerAction::Attack)
    }
}

//! Class special abilities.

use super::damage::{attack_damage, AttackStat};
use super::types::{Combatant, CombatantKind};
use crate::character::class::CharacterClass;
use crate::core::constants::*;
use crate::error::{GameError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Ability {
    PowerStrike,
    Fireball,
    CriticalStrike,
    Heal,
}

impl Ability {
    pub fn for_class(class: CharacterClass) -> Ability {
        match class {
            CharacterClass::Warrior => Ability::PowerStrike,
            CharacterClass::Mage => Ability::Fireball,
            CharacterClass::Rogue => Ability::CriticalStrike,
            CharacterClass::Cleric => Ability::Heal,
        }
    }

    /// Enemies have no special ability.
    pub fn for_combatant(combatant: &Combatant) -> Result<Ability> {
        match combatant.kind {
            CombatantKind::Player(class) => Ok(Ability::for_class(class)),
            CombatantKind::Enemy(kind) => Err(GameError::AbilityUnavailable(kind.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::PowerStrike => "Power Strike",
            Ability::Fireball => "Fireball",
            Ability::CriticalStrike => "Critical Strike",
            Ability::Heal => "Heal",
        }
    }
}

/// What an ability did once resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AbilityEffect {
    pub ability: Ability,
    pub description: String,
    pub enemy_damage: Option<u32>,
    pub self_heal: Option<u32>,
    /// Only meaningful for Critical Strike: whether the triple hit landed.
    pub critical: bool,
}

/// Resolve `user`'s class ability against `target`, mutating both.
///
/// - Warrior: strength x2 hit
/// - Mage: magic x2 hit
/// - Rogue: strength x3 on a 50% roll, otherwise a normal hit
/// - Cleric: heals self for 30, capped at max health, no damage
///
/// Fails with `AbilityUnavailable` for combatants without a class and with
/// `CharacterDead` if the user is dead. Nothing is mutated on failure.
pub fn resolve_ability(
    user: &mut Combatant,
    target: &mut Combatant,
    rng: &mut impl Rng,
) -> Result<AbilityEffect> {
    let ability = Ability::for_combatant(user)?;
    if !user.is_alive() {
        return Err(GameError::CharacterDead);
    }

    let effect = match ability {
        Ability::PowerStrike => {
            let damage = attack_damage(user, target, AttackStat::Strength, POWER_STRIKE_MULTIPLIER);
            let dealt = target.take_damage(damage);
            AbilityEffect {
                ability,
                description: format!("You used Power Strike for {} damage!", dealt),
                enemy_damage: Some(dealt),
                self_heal: None,
                critical: false,
            }
        }
        Ability::Fireball => {
            let damage = attack_damage(user, target, AttackStat::Magic, FIREBALL_MULTIPLIER);
            let dealt = target.take_damage(damage);
            AbilityEffect {
                ability,
                description: format!("You cast Fireball for {} damage!", dealt),
                enemy_damage: Some(dealt),
                self_heal: None,
                critical: false,
            }
        }
        Ability::CriticalStrike => {
            let critical = rng.gen_bool(CRITICAL_STRIKE_CHANCE);
            let multiplier = if critical {
                CRITICAL_STRIKE_MULTIPLIER
            } else {
                1
            };
            let damage = attack_damage(user, target, AttackStat::Strength, multiplier);
            let dealt = target.take_damage(damage);
            let description = if critical {
                format!("Critical Strike lands for {} damage!", dealt)
            } else {
                format!("Critical Strike glances off for {} damage.", dealt)
            };
            AbilityEffect {
                ability,
                description,
                enemy_damage: Some(dealt),
                self_heal: None,
                critical,
            }
        }
        Ability::Heal => {
            let healed = user.heal(CLERIC_HEAL_AMOUNT);
            AbilityEffect {
                ability,
                description: format!("You cast Heal and recover {} health!", healed),
                enemy_damage: None,
                self_heal: Some(healed),
                critical: false,
            }
        }
    };

    debug!(
        user = %user.name,
        ability = ability.name(),
        enemy_damage = ?effect.enemy_damage,
        self_heal = ?effect.self_heal,
        "ability resolved"
    );
    Ok(effect)
}

//! Damage math shared by basic attacks, abilities and the simulator.
//!
//! These are pure functions with no side effects.

use super::types::Combatant;
use crate::core::constants::{MIN_DAMAGE, MITIGATION_DIVISOR};

/// Which attacker stat drives an attack. Mitigation always comes from the
/// defender's strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackStat {
    Strength,
    Magic,
}

/// Calculate damage for a single hit.
///
/// # Formula
///
/// ```text
/// damage = attacker_power * multiplier - floor(defender_strength / 4)
/// damage = max(damage, 1)
/// ```
///
/// # Arguments
/// * `attacker_power` - Attacker's strength, or magic for spells
/// * `defender_strength` - Defender's strength, used as mitigation
/// * `multiplier` - Attack-kind multiplier (1 for basic attacks)
///
/// # Returns
/// Damage to apply, never below 1
pub fn compute_damage(attacker_power: u32, defender_strength: u32, multiplier: u32) -> u32 {
    let raw = attacker_power.saturating_mul(multiplier);
    let mitigation = defender_strength / MITIGATION_DIVISOR;
    raw.saturating_sub(mitigation).max(MIN_DAMAGE)
}

/// Damage from `attacker` hitting `defender` using the given stat.
pub fn attack_damage(
    attacker: &Combatant,
    defender: &Combatant,
    stat: AttackStat,
    multiplier: u32,
) -> u32 {
    let power = match stat {
        AttackStat::Strength => attacker.strength,
        AttackStat::Magic => attacker.magic,
    };
    compute_damage(power, defender.strength, multiplier)
}

/// A plain strength-based hit with multiplier 1.
pub fn basic_attack_damage(attacker: &Combatant, defender: &Combatant) -> u32 {
    attack_damage(attacker, defender, AttackStat::Strength, 1)
}

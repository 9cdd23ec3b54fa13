//! Experience and level ups.

use super::class::LEVEL_UP_GROWTH;
use super::types::Character;
use crate::core::constants::XP_PER_LEVEL;
use crate::error::{GameError, Result};
use tracing::info;

/// Experience needed to advance from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    level as u64 * XP_PER_LEVEL
}

/// Total experience needed to go from level 1 to `level`.
pub fn total_xp_to_reach(level: u32) -> u64 {
    (1..level).map(xp_for_next_level).sum()
}

/// Applies experience to the character and processes any level ups.
///
/// Each level up consumes the threshold of the level being left, raises max
/// health, strength and magic, and fully heals. Several level ups can happen
/// in one call; the threshold is re-read from the current level each time.
///
/// Returns the number of levels gained. Dead characters cannot earn
/// experience and fail with `CharacterDead` without being modified.
pub fn gain_experience(character: &mut Character, amount: u64) -> Result<u32> {
    if character.is_dead() {
        return Err(GameError::CharacterDead);
    }

    character.experience = character.experience.saturating_add(amount);

    let mut levelups = 0;
    loop {
        let xp_needed = xp_for_next_level(character.level);

        if character.experience >= xp_needed {
            character.experience -= xp_needed;
            character.level += 1;
            levelups += 1;
            character.combatant.grow(
                LEVEL_UP_GROWTH.max_health,
                LEVEL_UP_GROWTH.strength,
                LEVEL_UP_GROWTH.magic,
            );
        } else {
            break;
        }
    }

    if levelups > 0 {
        info!(
            character = %character.name(),
            level = character.level,
            levelups,
            "level up"
        );
    }

    Ok(levelups)
}

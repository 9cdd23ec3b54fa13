//! Crate-wide error type.
//!
//! Every failure the game can raise is a variant here. Precondition
//! violations (`CharacterDead`, `CombatNotActive`) mean the caller broke the
//! contract and must fix state before retrying; everything else is an
//! ordinary, recoverable game condition that can be shown to the player.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    // Character
    #[error("cannot perform actions, character is dead")]
    CharacterDead,
    #[error("invalid character class: {0}")]
    InvalidCharacterClass(String),
    #[error("character '{0}' doesn't exist")]
    CharacterNotFound(String),
    #[error("character level {current} is below the required level {required}")]
    InsufficientLevel { required: u32, current: u32 },
    #[error("invalid name: {0}")]
    InvalidName(String),

    // Combat
    #[error("not in an active battle")]
    CombatNotActive,
    #[error("no special ability available for {0}")]
    AbilityUnavailable(String),
    #[error("ability is on cooldown for {turns_remaining} more turn(s)")]
    AbilityOnCooldown { turns_remaining: u32 },
    #[error("cannot target, invalid enemy: {0}")]
    InvalidTarget(String),

    // Quests
    #[error("quest '{0}' does not exist")]
    QuestNotFound(String),
    #[error("requirements for quest '{0}' are not met")]
    QuestRequirementsNotMet(String),
    #[error("quest '{0}' is already complete")]
    QuestAlreadyCompleted(String),
    #[error("quest '{0}' is already active")]
    QuestAlreadyActive(String),
    #[error("quest '{0}' isn't active")]
    QuestNotActive(String),

    // Inventory
    #[error("inventory is full")]
    InventoryFull,
    #[error("item '{0}' not found")]
    ItemNotFound(String),
    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientResources { needed: u64, available: u64 },
    #[error("item type not valid here: {0}")]
    InvalidItemType(String),

    // Data and saves
    #[error("required data file not found: {0}")]
    MissingDataFile(String),
    #[error("data file has incorrect format: {0}")]
    InvalidDataFormat(String),
    #[error("save file cannot be loaded: {0}")]
    SaveFileCorrupted(String),
    #[error("save file contains invalid data: {0}")]
    InvalidSaveData(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// Returns false for contract violations the caller must not retry.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::CharacterDead | GameError::CombatNotActive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_violations_are_not_recoverable() {
        assert!(!GameError::CharacterDead.is_recoverable());
        assert!(!GameError::CombatNotActive.is_recoverable());
    }

    #[test]
    fn test_game_conditions_are_recoverable() {
        assert!(GameError::AbilityUnavailable("Goblin".to_string()).is_recoverable());
        assert!(GameError::InventoryFull.is_recoverable());
        assert!(GameError::QuestNotActive("q".to_string()).is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = GameError::AbilityOnCooldown { turns_remaining: 2 };
        assert_eq!(err.to_string(), "ability is on cooldown for 2 more turn(s)");

        let err = GameError::InsufficientResources {
            needed: 150,
            available: 100,
        };
        assert_eq!(err.to_string(), "not enough gold: need 150, have 100");
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(GameError::Io(_))));
    }
}

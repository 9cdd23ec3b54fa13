use crate::character::manager::CharacterManager;
use crate::character::progression::gain_experience;
use crate::character::types::Character;
use crate::combat::logic::{ActionSource, Battle, BattleResolution};
use crate::combat::types::{BattleOutcome, Enemy};
use crate::core::config::GameConfig;
use crate::data::loader::{create_default_data_files, load_game_data};
use crate::data::types::{ItemCatalog, QuestCatalog};
use crate::error::{GameError, Result};
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of one trip out into the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreOutcome {
    Victory {
        outcome: BattleOutcome,
        levels_gained: u32,
    },
    Escaped,
    /// The character fell and was revived at half health.
    Defeated,
}

/// Everything a running game needs, passed around explicitly.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub character: Character,
    pub quests: QuestCatalog,
    pub items: ItemCatalog,
}

impl GameSession {
    pub fn new(
        config: GameConfig,
        character: Character,
        quests: QuestCatalog,
        items: ItemCatalog,
    ) -> Self {
        Self {
            config,
            character,
            quests,
            items,
        }
    }

    /// Loads the catalogs from the config's data directory (writing the
    /// defaults first if they are missing) and starts a session.
    pub fn start(config: GameConfig, character: Character) -> Result<Self> {
        let (quests, items) = load_or_create_game_data(&config.data_dir)?;
        Ok(Self::new(config, character, quests, items))
    }

    /// Fights an enemy matched to the character's level.
    ///
    /// Victory feeds the rewards into progression and the purse. Defeat is
    /// not an error here: the character is revived and `Defeated` returned.
    pub fn explore<R, A>(&mut self, rng: &mut R, actions: &mut A) -> Result<ExploreOutcome>
    where
        R: Rng,
        A: ActionSource,
    {
        if self.character.is_dead() {
            return Err(GameError::CharacterDead);
        }

        let mut enemy = Enemy::for_level(self.character.level);
        info!(
            character = %self.character.name(),
            level = self.character.level,
            enemy = %enemy.name(),
            "exploring"
        );

        let result = {
            let mut battle = Battle::new(&mut self.character.combatant, &mut enemy)?;
            battle.run(actions, rng)
        };

        match result {
            Ok(BattleResolution::Victory(outcome)) => {
                let levels_gained = gain_experience(&mut self.character, outcome.experience_gained)?;
                self.character.gold = self.character.gold.saturating_add(outcome.gold_gained);
                Ok(ExploreOutcome::Victory {
                    outcome,
                    levels_gained,
                })
            }
            Ok(BattleResolution::Escaped) => Ok(ExploreOutcome::Escaped),
            Err(GameError::CharacterDead) => {
                handle_character_death(&mut self.character);
                Ok(ExploreOutcome::Defeated)
            }
            Err(err) => Err(err),
        }
    }

    pub fn save(&mut self) -> Result<PathBuf> {
        let manager = CharacterManager::new(&self.config)?;
        manager.save_character(&mut self.character)
    }
}

/// Revives a fallen character at half health. Returns false if the
/// character was still alive.
pub fn handle_character_death(character: &mut Character) -> bool {
    let revived = character.revive();
    if revived {
        warn!(
            character = %character.name(),
            health = character.health(),
            "character fell in battle and was revived"
        );
    }
    revived
}

/// Loads both catalogs, writing the default files first when either is
/// missing. Malformed files are still an error.
pub fn load_or_create_game_data(data_dir: &Path) -> Result<(QuestCatalog, ItemCatalog)> {
    match load_game_data(data_dir) {
        Err(GameError::MissingDataFile(path)) => {
            warn!(%path, "data file missing, writing defaults");
            create_default_data_files(data_dir)?;
            load_game_data(data_dir)
        }
        other => other,
    }
}

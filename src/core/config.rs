//! Runtime configuration: where saves and game data live.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the game's home directory.
pub const HOME_ENV_VAR: &str = "QUEST_CHRONICLES_HOME";

const HOME_DIR_NAME: &str = ".quest-chronicles";
const SAVE_DIR_NAME: &str = "save_games";
const DATA_DIR_NAME: &str = "data";

/// Directories used by a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub save_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl GameConfig {
    /// Lays out the save and data directories under `root`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            save_dir: root.join(SAVE_DIR_NAME),
            data_dir: root.join(DATA_DIR_NAME),
        }
    }

    /// Resolves the root from `QUEST_CHRONICLES_HOME`, falling back to
    /// `~/.quest-chronicles`.
    pub fn from_env() -> io::Result<Self> {
        if let Some(root) = env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;

        Ok(Self::with_root(home_dir.join(HOME_DIR_NAME)))
    }

    /// Creates both directories if they are missing.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.save_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

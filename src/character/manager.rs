use super::save::{parse_save_text, to_save_text};
use super::types::Character;
use crate::core::config::GameConfig;
use crate::core::constants::{MAX_NAME_LENGTH, SAVE_FILE_SUFFIX};
use crate::error::{GameError, Result};
use chrono::Utc;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Summary of a save file for the load menu.
#[derive(Debug, Clone)]
pub struct CharacterInfo {
    pub character_name: String,
    pub filename: String,
    pub class_name: String,
    pub level: u32,
    pub last_save_time: i64,
    pub is_corrupted: bool,
}

/// Reads and writes one save file per character in a directory.
pub struct CharacterManager {
    save_dir: PathBuf,
}

impl CharacterManager {
    pub fn new(config: &GameConfig) -> io::Result<Self> {
        Self::with_dir(&config.save_dir)
    }

    pub fn with_dir(save_dir: impl AsRef<Path>) -> io::Result<Self> {
        let save_dir = save_dir.as_ref().to_path_buf();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn path_for(&self, character_name: &str) -> PathBuf {
        self.save_dir.join(save_filename(character_name))
    }

    /// Writes the character's save file, stamping `last_save_time`.
    pub fn save_character(&self, character: &mut Character) -> Result<PathBuf> {
        character.last_save_time = Utc::now().timestamp();
        let path = self.path_for(character.name());
        fs::write(&path, to_save_text(character))?;
        info!(character = %character.name(), path = %path.display(), "character saved");
        Ok(path)
    }

    pub fn load_character(&self, character_name: &str) -> Result<Character> {
        self.load_file(&save_filename(character_name), character_name)
    }

    fn load_file(&self, filename: &str, display_name: &str) -> Result<Character> {
        let path = self.save_dir.join(filename);
        if !path.exists() {
            return Err(GameError::CharacterNotFound(display_name.to_string()));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| GameError::SaveFileCorrupted(format!("{}: {}", path.display(), e)))?;
        let character = parse_save_text(&text)?;
        info!(character = %character.name(), "character loaded");
        Ok(character)
    }

    /// Every save in the directory, most recently saved first. Unreadable
    /// files are listed as corrupted rather than skipped.
    pub fn list_characters(&self) -> Result<Vec<CharacterInfo>> {
        let mut characters = Vec::new();

        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();
            let filename = match path.file_name().and_then(|s| s.to_str()) {
                Some(name) if name.ends_with(SAVE_FILE_SUFFIX) => name.to_string(),
                _ => continue,
            };
            let stem = filename.trim_end_matches(SAVE_FILE_SUFFIX).to_string();

            match self.load_file(&filename, &stem) {
                Ok(character) => characters.push(CharacterInfo {
                    character_name: character.name().to_string(),
                    filename,
                    class_name: character.class().to_string(),
                    level: character.level,
                    last_save_time: character.last_save_time,
                    is_corrupted: false,
                }),
                Err(e) => {
                    warn!(file = %filename, error = %e, "unreadable save file");
                    characters.push(CharacterInfo {
                        character_name: "[CORRUPTED]".to_string(),
                        filename,
                        class_name: String::new(),
                        level: 0,
                        last_save_time: 0,
                        is_corrupted: true,
                    });
                }
            }
        }

        characters.sort_by(|a, b| b.last_save_time.cmp(&a.last_save_time));

        Ok(characters)
    }

    pub fn delete_character(&self, character_name: &str) -> Result<()> {
        let path = self.path_for(character_name);
        if !path.exists() {
            return Err(GameError::CharacterNotFound(character_name.to_string()));
        }
        fs::remove_file(path)?;
        info!(character = character_name, "character deleted");
        Ok(())
    }
}

pub fn save_filename(character_name: &str) -> String {
    format!("{}{}", sanitize_name(character_name), SAVE_FILE_SUFFIX)
}

pub fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(GameError::InvalidName("Name cannot be empty".to_string()));
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(GameError::InvalidName(format!(
            "Name must be {} characters or less",
            MAX_NAME_LENGTH
        )));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');

    if !valid_chars {
        return Err(GameError::InvalidName(
            "Name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        ));
    }

    Ok(())
}

pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::class::CharacterClass;
    use tempfile::TempDir;

    fn manager() -> (TempDir, CharacterManager) {
        let tmp = TempDir::new().unwrap();
        let manager = CharacterManager::with_dir(tmp.path().join("saves")).unwrap();
        (tmp, manager)
    }

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("Hero").is_ok());
        assert!(validate_name("Test 123").is_ok());
        assert!(validate_name("Warrior-2").is_ok());
        assert!(validate_name("under_score").is_ok());
    }

    #[test]
    fn test_validate_name_invalid() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name("12345678901234567").is_err());
        assert!(validate_name("test@123").is_err());
        assert!(validate_name("../etc").is_err());
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Hero"), "hero");
        assert_eq!(sanitize_name("Mage the Great"), "mage_the_great");
        assert_eq!(sanitize_name("Test!!!"), "test");
        assert_eq!(save_filename("Sir Bob"), "sir_bob_save.txt");
    }

    #[test]
    fn test_save_and_load_character() {
        let (_tmp, manager) = manager();
        let mut hero = Character::new("TestHero", CharacterClass::Warrior);
        hero.gold = 321;

        let path = manager.save_character(&mut hero).unwrap();
        assert!(path.ends_with("testhero_save.txt"));
        assert!(hero.last_save_time > 0);

        let loaded = manager.load_character("TestHero").unwrap();
        assert_eq!(loaded, hero);
    }

    #[test]
    fn test_load_missing_character() {
        let (_tmp, manager) = manager();
        assert!(matches!(
            manager.load_character("Nobody"),
            Err(GameError::CharacterNotFound(ref n)) if n == "Nobody"
        ));
    }

    #[test]
    fn test_load_invalid_utf8_is_corrupted() {
        let (_tmp, manager) = manager();
        fs::write(manager.path_for("Broken"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        assert!(matches!(
            manager.load_character("Broken"),
            Err(GameError::SaveFileCorrupted(_))
        ));
    }

    #[test]
    fn test_list_characters_sorted_and_flags_corruption() {
        let (_tmp, manager) = manager();

        let mut first = Character::new("ListTest1", CharacterClass::Mage);
        let mut second = Character::new("ListTest2", CharacterClass::Cleric);
        manager.save_character(&mut first).unwrap();
        manager.save_character(&mut second).unwrap();

        // Force a deterministic order independent of wall-clock resolution
        first.last_save_time = 1000;
        second.last_save_time = 2000;
        fs::write(manager.path_for("ListTest1"), to_save_text(&first)).unwrap();
        fs::write(manager.path_for("ListTest2"), to_save_text(&second)).unwrap();
        fs::write(manager.save_dir().join("junk_save.txt"), "not a save").unwrap();
        fs::write(manager.save_dir().join("notes.txt"), "ignored").unwrap();

        let list = manager.list_characters().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].character_name, "ListTest2");
        assert_eq!(list[0].class_name, "Cleric");
        assert_eq!(list[1].character_name, "ListTest1");
        assert!(list[2].is_corrupted);
        assert_eq!(list[2].filename, "junk_save.txt");
    }

    #[test]
    fn test_delete_character() {
        let (_tmp, manager) = manager();
        let mut hero = Character::new("ToDelete", CharacterClass::Rogue);
        manager.save_character(&mut hero).unwrap();
        assert!(manager.path_for("ToDelete").exists());

        manager.delete_character("ToDelete").unwrap();
        assert!(!manager.path_for("ToDelete").exists());
        assert!(matches!(
            manager.delete_character("ToDelete"),
            Err(GameError::CharacterNotFound(_))
        ));
    }
}

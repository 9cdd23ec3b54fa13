//! Loads quest and item catalogs from blank-line separated `KEY: value`
//! blocks.

use super::types::*;
use crate::core::constants::{ITEMS_FILE_NAME, NO_PREREQUISITE, QUESTS_FILE_NAME};
use crate::error::{GameError, Result};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const DEFAULT_QUESTS: &str = "\
QUEST_ID: quest_001
TITLE: First Steps
DESCRIPTION: Defeat 5 slimes in the forest.
REWARD_XP: 100
REWARD_GOLD: 50
REQUIRED_LEVEL: 1
PREREQUISITE: NONE

QUEST_ID: quest_002
TITLE: Goblin Trouble
DESCRIPTION: Clear the goblin camp near the river.
REWARD_XP: 250
REWARD_GOLD: 100
REQUIRED_LEVEL: 2
PREREQUISITE: quest_001

QUEST_ID: quest_003
TITLE: Orc Warband
DESCRIPTION: Break the orc warband raiding the valley.
REWARD_XP: 500
REWARD_GOLD: 200
REQUIRED_LEVEL: 3
PREREQUISITE: quest_002

QUEST_ID: quest_004
TITLE: Dragon's Lair
DESCRIPTION: Slay the dragon nesting in the northern peaks.
REWARD_XP: 1500
REWARD_GOLD: 1000
REQUIRED_LEVEL: 6
PREREQUISITE: quest_003
";

const DEFAULT_ITEMS: &str = "\
ITEM_ID: sword_001
NAME: Iron Sword
TYPE: weapon
EFFECT: strength:5
COST: 150
DESCRIPTION: A sturdy iron sword.

ITEM_ID: staff_001
NAME: Oak Staff
TYPE: weapon
EFFECT: magic:5
COST: 150
DESCRIPTION: A staff humming with faint power.

ITEM_ID: armor_001
NAME: Leather Armor
TYPE: armor
EFFECT: max_health:20
COST: 120
DESCRIPTION: Supple armor that turns aside glancing blows.

ITEM_ID: potion_001
NAME: Healing Potion
TYPE: consumable
EFFECT: health:50
COST: 50
DESCRIPTION: A basic potion for adventurers.
";

/// Splits file content into blocks of `KEY -> value`, keys upper-cased.
fn parse_blocks(content: &str) -> Result<Vec<HashMap<String, String>>> {
    let mut blocks = Vec::new();
    let mut current: HashMap<String, String> = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| GameError::InvalidDataFormat(format!("line missing ':': {}", line)))?;
        current.insert(key.trim().to_uppercase(), value.trim().to_string());
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    Ok(blocks)
}

fn field<'a>(block: &'a HashMap<String, String>, key: &str) -> Result<&'a str> {
    block
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| GameError::InvalidDataFormat(format!("missing field {}", key)))
}

fn number<T: FromStr>(block: &HashMap<String, String>, key: &str) -> Result<T> {
    let raw = field(block, key)?;
    raw.parse()
        .map_err(|_| GameError::InvalidDataFormat(format!("{} '{}' is not a number", key, raw)))
}

pub fn parse_quests(content: &str) -> Result<QuestCatalog> {
    let mut quests = QuestCatalog::new();
    for block in parse_blocks(content)? {
        let prerequisite = field(&block, "PREREQUISITE")?;
        let quest = Quest {
            quest_id: field(&block, "QUEST_ID")?.to_string(),
            title: field(&block, "TITLE")?.to_string(),
            description: field(&block, "DESCRIPTION")?.to_string(),
            reward_xp: number(&block, "REWARD_XP")?,
            reward_gold: number(&block, "REWARD_GOLD")?,
            required_level: number(&block, "REQUIRED_LEVEL")?,
            prerequisite: if prerequisite.is_empty()
                || prerequisite.eq_ignore_ascii_case(NO_PREREQUISITE)
            {
                None
            } else {
                Some(prerequisite.to_string())
            },
        };
        if quest.quest_id.is_empty() {
            return Err(GameError::InvalidDataFormat("empty QUEST_ID".to_string()));
        }
        quests.insert(quest.quest_id.clone(), quest);
    }
    Ok(quests)
}

pub fn parse_items(content: &str) -> Result<ItemCatalog> {
    let mut items = ItemCatalog::new();
    for block in parse_blocks(content)? {
        let item = Item {
            item_id: field(&block, "ITEM_ID")?.to_string(),
            name: field(&block, "NAME")?.to_string(),
            item_type: field(&block, "TYPE")?.parse()?,
            effect: field(&block, "EFFECT")?.parse()?,
            cost: number(&block, "COST")?,
            description: field(&block, "DESCRIPTION")?.to_string(),
        };
        if item.item_id.is_empty() {
            return Err(GameError::InvalidDataFormat("empty ITEM_ID".to_string()));
        }
        if item.is_equipment() && !item.effect.is_equipment_bonus() {
            return Err(GameError::InvalidDataFormat(format!(
                "{} '{}' has effect {}; equipment needs a non-negative max_health, strength or magic bonus",
                item.item_type, item.item_id, item.effect
            )));
        }
        items.insert(item.item_id.clone(), item);
    }
    Ok(items)
}

fn read_data_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => GameError::MissingDataFile(path.display().to_string()),
        _ => GameError::InvalidDataFormat(format!("{}: {}", path.display(), e)),
    })
}

pub fn load_quests(path: impl AsRef<Path>) -> Result<QuestCatalog> {
    let quests = parse_quests(&read_data_file(path.as_ref())?)?;
    info!(count = quests.len(), "quests loaded");
    Ok(quests)
}

pub fn load_items(path: impl AsRef<Path>) -> Result<ItemCatalog> {
    let items = parse_items(&read_data_file(path.as_ref())?)?;
    info!(count = items.len(), "items loaded");
    Ok(items)
}

/// Loads both catalogs from `data_dir`.
pub fn load_game_data(data_dir: impl AsRef<Path>) -> Result<(QuestCatalog, ItemCatalog)> {
    let data_dir = data_dir.as_ref();
    Ok((
        load_quests(data_dir.join(QUESTS_FILE_NAME))?,
        load_items(data_dir.join(ITEMS_FILE_NAME))?,
    ))
}

/// Writes the default quest and item files into `data_dir` if they are
/// missing. Existing files are left alone.
pub fn create_default_data_files(data_dir: impl AsRef<Path>) -> Result<()> {
    let data_dir = data_dir.as_ref();
    fs::create_dir_all(data_dir)?;

    let quests = data_dir.join(QUESTS_FILE_NAME);
    if !quests.exists() {
        fs::write(&quests, DEFAULT_QUESTS)?;
        info!(path = %quests.display(), "wrote default quests");
    }
    let items = data_dir.join(ITEMS_FILE_NAME);
    if !items.exists() {
        fs::write(&items, DEFAULT_ITEMS)?;
        info!(path = %items.display(), "wrote default items");
    }
    Ok(())
}

//! Flat key-value save format.
//!
//! ```text
//! NAME: Hero
//! CLASS: Warrior
//! LEVEL: 1
//! HEALTH: 120
//! MAX_HEALTH: 120
//! STRENGTH: 15
//! MAGIC: 5
//! EXPERIENCE: 0
//! GOLD: 100
//! INVENTORY: potion_001,sword_001
//! ACTIVE_QUESTS: quest_002
//! COMPLETED_QUESTS: quest_001
//! EQUIPPED_WEAPON:
//! EQUIPPED_ARMOR:
//! LAST_SAVED: 1760659200
//! ```
//!
//! Lists are comma separated and an empty value means an empty list or no
//! item. `EQUIPPED_*` and `LAST_SAVED` may be missing from older files.

use super::class::CharacterClass;
use super::types::Character;
use crate::combat::types::{Combatant, CombatantKind};
use crate::error::{GameError, Result};
use std::collections::HashMap;
use std::str::FromStr;

const REQUIRED_KEYS: [&str; 12] = [
    "NAME",
    "CLASS",
    "LEVEL",
    "HEALTH",
    "MAX_HEALTH",
    "STRENGTH",
    "MAGIC",
    "EXPERIENCE",
    "GOLD",
    "INVENTORY",
    "ACTIVE_QUESTS",
    "COMPLETED_QUESTS",
];

pub fn to_save_text(character: &Character) -> String {
    let lines = [
        format!("NAME: {}", character.name()),
        format!("CLASS: {}", character.class()),
        format!("LEVEL: {}", character.level),
        format!("HEALTH: {}", character.health()),
        format!("MAX_HEALTH: {}", character.max_health()),
        format!("STRENGTH: {}", character.strength()),
        format!("MAGIC: {}", character.magic()),
        format!("EXPERIENCE: {}", character.experience),
        format!("GOLD: {}", character.gold),
        format!("INVENTORY: {}", character.inventory.join(",")),
        format!("ACTIVE_QUESTS: {}", character.active_quests.join(",")),
        format!("COMPLETED_QUESTS: {}", character.completed_quests.join(",")),
        format!(
            "EQUIPPED_WEAPON: {}",
            character.equipped_weapon.as_deref().unwrap_or("")
        ),
        format!(
            "EQUIPPED_ARMOR: {}",
            character.equipped_armor.as_deref().unwrap_or("")
        ),
        format!("LAST_SAVED: {}", character.last_save_time),
    ];
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

pub fn parse_save_text(text: &str) -> Result<Character> {
    let mut fields: HashMap<String, String> = HashMap::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = line.split_once(':').ok_or_else(|| {
            GameError::InvalidSaveData(format!("line {} has no ':' separator", index + 1))
        })?;
        fields.insert(key.trim().to_uppercase(), value.trim().to_string());
    }

    if let Some(missing) = REQUIRED_KEYS.iter().find(|k| !fields.contains_key(**k)) {
        return Err(GameError::InvalidSaveData(format!("missing field {}", missing)));
    }

    let name = fields["NAME"].clone();
    if name.is_empty() {
        return Err(GameError::InvalidSaveData("empty name".to_string()));
    }
    let class: CharacterClass = fields["CLASS"]
        .parse()
        .map_err(|_| GameError::InvalidSaveData(format!("unknown class {}", fields["CLASS"])))?;

    let level: u32 = number(&fields, "LEVEL")?;
    if level == 0 {
        return Err(GameError::InvalidSaveData("level must be at least 1".to_string()));
    }

    let combatant = Combatant::from_parts(
        name,
        CombatantKind::Player(class),
        number(&fields, "HEALTH")?,
        number(&fields, "MAX_HEALTH")?,
        number(&fields, "STRENGTH")?,
        number(&fields, "MAGIC")?,
    )?;

    let mut character = Character::from_parts(class, combatant);
    character.level = level;
    character.experience = number(&fields, "EXPERIENCE")?;
    character.gold = number(&fields, "GOLD")?;
    character.inventory = list(&fields["INVENTORY"]);
    character.active_quests = list(&fields["ACTIVE_QUESTS"]);
    character.completed_quests = list(&fields["COMPLETED_QUESTS"]);
    character.equipped_weapon = optional(&fields, "EQUIPPED_WEAPON");
    character.equipped_armor = optional(&fields, "EQUIPPED_ARMOR");
    character.last_save_time = match fields.get("LAST_SAVED") {
        Some(v) if !v.is_empty() => number(&fields, "LAST_SAVED")?,
        _ => 0,
    };

    Ok(character)
}

fn number<T: FromStr>(fields: &HashMap<String, String>, key: &str) -> Result<T> {
    fields[key]
        .parse()
        .map_err(|_| GameError::InvalidSaveData(format!("{} is not a valid number", key)))
}

fn list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn optional(fields: &HashMap<String, String>, key: &str) -> Option<String> {
    fields.get(key).filter(|v| !v.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Character {
        let mut hero = Character::new("Hero", CharacterClass::Rogue);
        hero.level = 3;
        hero.experience = 42;
        hero.gold = 75;
        hero.combatant.take_damage(30);
        hero.inventory = vec!["potion_001".to_string(), "potion_001".to_string()];
        hero.active_quests = vec!["quest_002".to_string()];
        hero.completed_quests = vec!["quest_001".to_string()];
        hero.equipped_weapon = Some("sword_001".to_string());
        hero.last_save_time = 1_700_000_000;
        hero
    }

    #[test]
    fn test_save_text_layout() {
        let text = to_save_text(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "NAME: Hero");
        assert_eq!(lines[1], "CLASS: Rogue");
        assert_eq!(lines[3], "HEALTH: 60");
        assert_eq!(lines[9], "INVENTORY: potion_001,potion_001");
        assert_eq!(lines[13], "EQUIPPED_ARMOR: ");
    }

    #[test]
    fn test_parse_restores_character() {
        let original = sample();
        let loaded = parse_save_text(&to_save_text(&original)).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_parse_single_item_list() {
        // A one-element list has no comma and must still be a list
        let mut hero = Character::new("Solo", CharacterClass::Mage);
        hero.inventory = vec!["potion_001".to_string()];
        let loaded = parse_save_text(&to_save_text(&hero)).unwrap();
        assert_eq!(loaded.inventory, vec!["potion_001".to_string()]);
        assert!(loaded.active_quests.is_empty());
    }

    #[test]
    fn test_parse_without_optional_keys() {
        let text = "NAME: Old\nCLASS: Cleric\nLEVEL: 2\nHEALTH: 110\nMAX_HEALTH: 110\n\
                    STRENGTH: 12\nMAGIC: 17\nEXPERIENCE: 5\nGOLD: 100\nINVENTORY: \n\
                    ACTIVE_QUESTS: \nCOMPLETED_QUESTS: quest_001\n";
        let loaded = parse_save_text(text).unwrap();
        assert_eq!(loaded.class(), CharacterClass::Cleric);
        assert_eq!(loaded.level, 2);
        assert_eq!(loaded.equipped_weapon, None);
        assert_eq!(loaded.last_save_time, 0);
        assert_eq!(loaded.completed_quests, vec!["quest_001".to_string()]);
    }

    #[test]
    fn test_parse_rejects_bad_data() {
        let good = to_save_text(&sample());

        let missing = good.replace("GOLD: 75\n", "");
        assert!(matches!(
            parse_save_text(&missing),
            Err(GameError::InvalidSaveData(_))
        ));

        let bad_number = good.replace("LEVEL: 3", "LEVEL: three");
        assert!(matches!(
            parse_save_text(&bad_number),
            Err(GameError::InvalidSaveData(_))
        ));

        let no_colon = format!("{}garbage line\n", good);
        assert!(parse_save_text(&no_colon).is_err());

        let overfull = good.replace("HEALTH: 60", "HEALTH: 500");
        assert!(parse_save_text(&overfull).is_err());

        let bad_class = good.replace("CLASS: Rogue", "CLASS: Bard");
        assert!(parse_save_text(&bad_class).is_err());

        let level_zero = good.replace("LEVEL: 3", "LEVEL: 0");
        assert!(parse_save_text(&level_zero).is_err());
    }
}

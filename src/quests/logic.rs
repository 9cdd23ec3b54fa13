//! Quest acceptance, completion and bookkeeping.
//!
//! Quest state lives on the character as id lists (`active_quests`,
//! `completed_quests`); the catalog is read-only.

use crate::character::progression::gain_experience;
use crate::character::types::Character;
use crate::data::types::{Quest, QuestCatalog};
use crate::error::{GameError, Result};
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

/// Rewards granted by a single quest completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestCompletion {
    pub experience_gained: u64,
    pub gold_gained: u64,
    pub levels_gained: u32,
}

/// Sum of rewards over every completed quest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuestRewards {
    pub total_xp: u64,
    pub total_gold: u64,
}

fn lookup<'a>(quests: &'a QuestCatalog, quest_id: &str) -> Result<&'a Quest> {
    quests
        .get(quest_id)
        .ok_or_else(|| GameError::QuestNotFound(quest_id.to_string()))
}

pub fn is_quest_completed(character: &Character, quest_id: &str) -> bool {
    character.completed_quests.iter().any(|q| q == quest_id)
}

pub fn is_quest_active(character: &Character, quest_id: &str) -> bool {
    character.active_quests.iter().any(|q| q == quest_id)
}

fn prerequisite_met(character: &Character, quest: &Quest) -> bool {
    match &quest.prerequisite {
        Some(prerequisite) => is_quest_completed(character, prerequisite),
        None => true,
    }
}

/// Adds the quest to the character's active list.
///
/// Checks, in order: the quest exists, is not already completed, is not
/// already active, the level requirement, and the prerequisite.
pub fn accept_quest(character: &mut Character, quest_id: &str, quests: &QuestCatalog) -> Result<()> {
    let quest = lookup(quests, quest_id)?;

    if is_quest_completed(character, quest_id) {
        return Err(GameError::QuestAlreadyCompleted(quest_id.to_string()));
    }
    if is_quest_active(character, quest_id) {
        return Err(GameError::QuestAlreadyActive(quest_id.to_string()));
    }
    if character.level < quest.required_level {
        return Err(GameError::InsufficientLevel {
            required: quest.required_level,
            current: character.level,
        });
    }
    if !prerequisite_met(character, quest) {
        return Err(GameError::QuestRequirementsNotMet(quest_id.to_string()));
    }

    character.active_quests.push(quest_id.to_string());
    info!(character = %character.name(), quest = quest_id, "quest accepted");
    Ok(())
}

/// Moves an active quest to completed and grants its experience and gold.
pub fn complete_quest(
    character: &mut Character,
    quest_id: &str,
    quests: &QuestCatalog,
) -> Result<QuestCompletion> {
    let quest = lookup(quests, quest_id)?;
    if !is_quest_active(character, quest_id) {
        return Err(GameError::QuestNotActive(quest_id.to_string()));
    }
    if character.is_dead() {
        return Err(GameError::CharacterDead);
    }

    character.active_quests.retain(|q| q != quest_id);
    character.completed_quests.push(quest_id.to_string());

    let levels_gained = gain_experience(character, quest.reward_xp)?;
    character.gold = character.gold.saturating_add(quest.reward_gold);

    info!(
        character = %character.name(),
        quest = quest_id,
        xp = quest.reward_xp,
        gold = quest.reward_gold,
        "quest completed"
    );

    Ok(QuestCompletion {
        experience_gained: quest.reward_xp,
        gold_gained: quest.reward_gold,
        levels_gained,
    })
}

pub fn abandon_quest(character: &mut Character, quest_id: &str) -> Result<()> {
    if !is_quest_active(character, quest_id) {
        return Err(GameError::QuestNotActive(quest_id.to_string()));
    }
    character.active_quests.retain(|q| q != quest_id);
    info!(character = %character.name(), quest = quest_id, "quest abandoned");
    Ok(())
}

/// Catalog entries for the character's active quests. Ids missing from the
/// catalog are skipped.
pub fn active_quests<'a>(character: &Character, quests: &'a QuestCatalog) -> Vec<&'a Quest> {
    character
        .active_quests
        .iter()
        .filter_map(|id| quests.get(id))
        .collect()
}

pub fn completed_quests<'a>(character: &Character, quests: &'a QuestCatalog) -> Vec<&'a Quest> {
    character
        .completed_quests
        .iter()
        .filter_map(|id| quests.get(id))
        .collect()
}

/// Quests the character could accept right now.
pub fn available_quests<'a>(character: &Character, quests: &'a QuestCatalog) -> Vec<&'a Quest> {
    quests
        .values()
        .filter(|quest| can_accept_quest(character, &quest.quest_id, quests))
        .collect()
}

/// Same checks as `accept_quest` without the error detail.
pub fn can_accept_quest(character: &Character, quest_id: &str, quests: &QuestCatalog) -> bool {
    let Some(quest) = quests.get(quest_id) else {
        return false;
    };
    !is_quest_completed(character, quest_id)
        && !is_quest_active(character, quest_id)
        && character.level >= quest.required_level
        && prerequisite_met(character, quest)
}

/// Prerequisite ids leading up to and including `quest_id`, earliest first.
pub fn prerequisite_chain(quest_id: &str, quests: &QuestCatalog) -> Result<Vec<String>> {
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(quest_id.to_string());

    while let Some(id) = current {
        if !visited.insert(id.clone()) {
            return Err(GameError::InvalidDataFormat(format!(
                "prerequisite cycle at quest '{}'",
                id
            )));
        }
        let quest = lookup(quests, &id)?;
        current = quest.prerequisite.clone();
        chain.push(id);
    }

    chain.reverse();
    Ok(chain)
}

/// Every prerequisite must name a quest in the catalog.
pub fn validate_quest_prerequisites(quests: &QuestCatalog) -> Result<()> {
    for quest in quests.values() {
        if let Some(prerequisite) = &quest.prerequisite {
            if !quests.contains_key(prerequisite) {
                return Err(GameError::QuestNotFound(prerequisite.clone()));
            }
        }
    }
    Ok(())
}

/// Percentage (0.0 to 100.0) of catalog quests the character has completed.
pub fn completion_percentage(character: &Character, quests: &QuestCatalog) -> f64 {
    if quests.is_empty() {
        return 0.0;
    }
    let completed = character
        .completed_quests
        .iter()
        .filter(|id| quests.contains_key(*id))
        .count();
    completed as f64 / quests.len() as f64 * 100.0
}

pub fn total_rewards_earned(character: &Character, quests: &QuestCatalog) -> QuestRewards {
    completed_quests(character, quests)
        .into_iter()
        .fold(QuestRewards::default(), |acc, quest| QuestRewards {
            total_xp: acc.total_xp.saturating_add(quest.reward_xp),
            total_gold: acc.total_gold.saturating_add(quest.reward_gold),
        })
}

/// Quests whose required level is within `min_level..=max_level`.
pub fn quests_by_level(quests: &QuestCatalog, min_level: u32, max_level: u32) -> Vec<&Quest> {
    quests
        .values()
        .filter(|q| (min_level..=max_level).contains(&q.required_level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::class::CharacterClass;

    fn quest(id: &str, level: u32, prerequisite: Option<&str>) -> Quest {
        Quest {
            quest_id: id.to_string(),
            title: format!("Quest {}", id),
            description: String::new(),
            reward_xp: 100,
            reward_gold: 25,
            required_level: level,
            prerequisite: prerequisite.map(String::from),
        }
    }

    fn catalog() -> QuestCatalog {
        [
            quest("a", 1, None),
            quest("b", 1, Some("a")),
            quest("c", 3, Some("b")),
        ]
        .into_iter()
        .map(|q| (q.quest_id.clone(), q))
        .collect()
    }

    fn hero() -> Character {
        Character::new("Hero", CharacterClass::Warrior)
    }

    #[test]
    fn test_accept_and_complete() {
        let quests = catalog();
        let mut hero = hero();

        accept_quest(&mut hero, "a", &quests).unwrap();
        assert!(is_quest_active(&hero, "a"));

        let reward = complete_quest(&mut hero, "a", &quests).unwrap();
        assert_eq!(reward.experience_gained, 100);
        assert_eq!(reward.gold_gained, 25);
        assert_eq!(reward.levels_gained, 1);
        assert_eq!(hero.level, 2);
        assert_eq!(hero.gold, 125);
        assert!(!is_quest_active(&hero, "a"));
        assert!(is_quest_completed(&hero, "a"));
    }

    #[test]
    fn test_accept_errors() {
        let quests = catalog();
        let mut hero = hero();

        assert!(matches!(
            accept_quest(&mut hero, "zzz", &quests),
            Err(GameError::QuestNotFound(_))
        ));
        assert!(matches!(
            accept_quest(&mut hero, "b", &quests),
            Err(GameError::QuestRequirementsNotMet(_))
        ));

        accept_quest(&mut hero, "a", &quests).unwrap();
        assert!(matches!(
            accept_quest(&mut hero, "a", &quests),
            Err(GameError::QuestAlreadyActive(_))
        ));
        complete_quest(&mut hero, "a", &quests).unwrap();
        assert!(matches!(
            accept_quest(&mut hero, "a", &quests),
            Err(GameError::QuestAlreadyCompleted(_))
        ));

        hero.completed_quests.push("b".to_string());
        assert!(matches!(
            accept_quest(&mut hero, "c", &quests),
            Err(GameError::InsufficientLevel {
                required: 3,
                current: 2
            })
        ));
    }

    #[test]
    fn test_complete_requires_active() {
        let quests = catalog();
        let mut hero = hero();
        assert!(matches!(
            complete_quest(&mut hero, "a", &quests),
            Err(GameError::QuestNotActive(_))
        ));
        assert_eq!(hero.gold, 100);
    }

    #[test]
    fn test_dead_character_cannot_complete() {
        let quests = catalog();
        let mut hero = hero();
        accept_quest(&mut hero, "a", &quests).unwrap();
        hero.combatant.take_damage(10_000);
        assert!(matches!(
            complete_quest(&mut hero, "a", &quests),
            Err(GameError::CharacterDead)
        ));
        assert!(is_quest_active(&hero, "a"));
        assert!(hero.completed_quests.is_empty());
    }

    #[test]
    fn test_abandon() {
        let quests = catalog();
        let mut hero = hero();
        accept_quest(&mut hero, "a", &quests).unwrap();
        abandon_quest(&mut hero, "a").unwrap();
        assert!(hero.active_quests.is_empty());
        assert!(abandon_quest(&mut hero, "a").is_err());
    }

    #[test]
    fn test_available_and_can_accept() {
        let quests = catalog();
        let mut hero = hero();
        let ids: Vec<_> = available_quests(&hero, &quests)
            .iter()
            .map(|q| q.quest_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a"]);
        assert!(can_accept_quest(&hero, "a", &quests));
        assert!(!can_accept_quest(&hero, "b", &quests));
        assert!(!can_accept_quest(&hero, "missing", &quests));

        hero.completed_quests.push("a".to_string());
        let ids: Vec<_> = available_quests(&hero, &quests)
            .iter()
            .map(|q| q.quest_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_prerequisite_chain() {
        let quests = catalog();
        assert_eq!(prerequisite_chain("c", &quests).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(prerequisite_chain("a", &quests).unwrap(), vec!["a"]);
        assert!(matches!(
            prerequisite_chain("nope", &quests),
            Err(GameError::QuestNotFound(_))
        ));
    }

    #[test]
    fn test_prerequisite_cycle_detected() {
        let mut quests = catalog();
        quests.insert("a".to_string(), quest("a", 1, Some("c")));
        assert!(matches!(
            prerequisite_chain("c", &quests),
            Err(GameError::InvalidDataFormat(_))
        ));
    }

    #[test]
    fn test_validate_prerequisites() {
        let mut quests = catalog();
        assert!(validate_quest_prerequisites(&quests).is_ok());
        quests.insert("d".to_string(), quest("d", 1, Some("ghost")));
        assert!(matches!(
            validate_quest_prerequisites(&quests),
            Err(GameError::QuestNotFound(ref id)) if id == "ghost"
        ));
    }

    #[test]
    fn test_statistics() {
        let quests = catalog();
        let mut hero = hero();
        assert_eq!(completion_percentage(&hero, &QuestCatalog::new()), 0.0);
        assert_eq!(completion_percentage(&hero, &quests), 0.0);

        hero.completed_quests = vec!["a".to_string(), "b".to_string()];
        let pct = completion_percentage(&hero, &quests);
        assert!((pct - 66.666).abs() < 0.01);

        let totals = total_rewards_earned(&hero, &quests);
        assert_eq!(totals.total_xp, 200);
        assert_eq!(totals.total_gold, 50);

        assert_eq!(quests_by_level(&quests, 1, 2).len(), 2);
        assert_eq!(quests_by_level(&quests, 3, 10).len(), 1);
        assert!(quests_by_level(&quests, 4, 10).is_empty());
    }

    #[test]
    fn test_reward_totals_saturate() {
        let mut quests = catalog();
        for quest in quests.values_mut() {
            quest.reward_xp = u64::MAX;
            quest.reward_gold = u64::MAX;
        }
        let mut hero = hero();
        hero.completed_quests = vec!["a".to_string(), "b".to_string()];

        let totals = total_rewards_earned(&hero, &quests);
        assert_eq!(totals.total_xp, u64::MAX);
        assert_eq!(totals.total_gold, u64::MAX);
    }

    #[test]
    fn test_views_skip_unknown_ids() {
        let quests = catalog();
        let mut hero = hero();
        hero.active_quests = vec!["a".to_string(), "retired".to_string()];
        assert_eq!(active_quests(&hero, &quests).len(), 1);
        assert!(completed_quests(&hero, &quests).is_empty());
    }
}

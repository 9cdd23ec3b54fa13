//! Main menu and in-game menus.

use super::battle::ConsoleActions;
use super::console::{is_input_closed, Console};
use quest_chronicles::character::manager::{validate_name, CharacterManager};
use quest_chronicles::character::progression::xp_for_next_level;
use quest_chronicles::character::types::Character;
use quest_chronicles::core::config::GameConfig;
use quest_chronicles::data::types::{Item, Quest};
use quest_chronicles::error::{GameError, Result};
use quest_chronicles::game::session::{ExploreOutcome, GameSession};
use quest_chronicles::inventory;
use quest_chronicles::quests;
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::warn;

const BANNER: &str = "==================================================";

/// The interactive game: menus over a console, one session at a time.
pub struct App<R, W, G> {
    console: Console<R, W>,
    config: GameConfig,
    manager: CharacterManager,
    rng: G,
}

impl<R: BufRead, W: Write, G: Rng> App<R, W, G> {
    pub fn new(console: Console<R, W>, config: GameConfig, rng: G) -> Result<Self> {
        config.ensure_dirs()?;
        let manager = CharacterManager::new(&config)?;
        Ok(Self {
            console,
            config,
            manager,
            rng,
        })
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Runs until the player exits or input closes.
    pub fn run(&mut self) -> Result<()> {
        match self.main_menu() {
            Err(e) if is_input_closed(&e) => Ok(()),
            other => other,
        }
    }

    fn main_menu(&mut self) -> Result<()> {
        self.console.say(BANNER)?;
        self.console.say("     QUEST CHRONICLES - A MODULAR RPG ADVENTURE")?;
        self.console.say(BANNER)?;

        loop {
            self.console.blank()?;
            self.console.say("Main Menu:")?;
            self.console
                .say("1. New Game\n2. Load Game\n3. Delete Character\n4. Exit")?;
            match self.console.choose("Enter choice: ", 4)? {
                Some(1) => {
                    if let Some(session) = self.new_game()? {
                        self.game_loop(session)?;
                    }
                }
                Some(2) => {
                    if let Some(session) = self.load_game()? {
                        self.game_loop(session)?;
                    }
                }
                Some(3) => self.delete_character()?,
                Some(4) => {
                    self.console.say("Thanks for playing Quest Chronicles!")?;
                    return Ok(());
                }
                _ => self.console.say("Invalid choice. Please select 1-4.")?,
            }
        }
    }

    fn new_game(&mut self) -> Result<Option<GameSession>> {
        let name = loop {
            let name = self.console.prompt("Enter your character's name: ")?;
            match validate_name(&name) {
                Ok(()) => break name,
                Err(e) => self.console.say(e)?,
            }
        };

        if self.manager.path_for(&name).exists()
            && !self
                .console
                .confirm("A save with that name exists. Overwrite it? (y/n): ")?
        {
            return Ok(None);
        }

        self.console
            .say("Choose your class:\n1. Warrior\n2. Mage\n3. Rogue\n4. Cleric")?;
        let mut character = loop {
            let class = self.console.prompt("Enter class: ")?;
            match Character::create(&name, &class) {
                Ok(character) => break character,
                Err(e) => self.console.say(e)?,
            }
        };

        self.manager.save_character(&mut character)?;
        self.console.say(format!(
            "Character '{}' the {} created!",
            character.name(),
            character.class()
        ))?;
        Ok(Some(GameSession::start(self.config.clone(), character)?))
    }

    fn pick_saved(&mut self, action: &str) -> Result<Option<String>> {
        let saves = self.manager.list_characters()?;
        if saves.is_empty() {
            self.console.say("No saved characters found.")?;
            return Ok(None);
        }

        self.console.say("Saved Characters:")?;
        for (idx, info) in saves.iter().enumerate() {
            if info.is_corrupted {
                self.console
                    .say(format!("{}. {} ({})", idx + 1, info.character_name, info.filename))?;
            } else {
                self.console.say(format!(
                    "{}. {} - Level {} {}",
                    idx + 1,
                    info.character_name,
                    info.level,
                    info.class_name
                ))?;
            }
        }

        let label = format!("Choose a character to {} (0 to go back): ", action);
        match self.console.choose(&label, saves.len())? {
            Some(n) if saves[n - 1].is_corrupted => {
                self.console.say("That save file is corrupted.")?;
                Ok(None)
            }
            Some(n) => Ok(Some(saves[n - 1].character_name.clone())),
            None => Ok(None),
        }
    }

    fn load_game(&mut self) -> Result<Option<GameSession>> {
        let Some(name) = self.pick_saved("load")? else {
            return Ok(None);
        };
        let character = match self.manager.load_character(&name) {
            Ok(character) => character,
            Err(e) => {
                self.console.say(format!("Could not load: {}", e))?;
                return Ok(None);
            }
        };
        self.console
            .say(format!("Character '{}' loaded!", character.name()))?;
        Ok(Some(GameSession::start(self.config.clone(), character)?))
    }

    fn delete_character(&mut self) -> Result<()> {
        let Some(name) = self.pick_saved("delete")? else {
            return Ok(());
        };
        if self
            .console
            .confirm(&format!("Delete '{}' forever? (y/n): ", name))?
        {
            self.manager.delete_character(&name)?;
            self.console.say(format!("'{}' deleted.", name))?;
        }
        Ok(())
    }

    fn game_loop(&mut self, mut session: GameSession) -> Result<()> {
        loop {
            match self.game_menu(&mut session) {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(e) if is_input_closed(&e) => {
                    session.save()?;
                    return Err(e);
                }
                Err(e) if e.is_recoverable() => self.console.say(format!("Error: {}", e))?,
                Err(e) => return Err(e),
            }
        }
    }

    /// One pass through the game menu. Returns true once the player saved
    /// and quit.
    fn game_menu(&mut self, session: &mut GameSession) -> Result<bool> {
        self.console.blank()?;
        self.console.say("Game Menu:")?;
        self.console.say(
            "1. View Character Stats\n2. View Inventory\n3. Quest Menu\n\
             4. Explore (Find Battles)\n5. Shop\n6. Save and Quit",
        )?;
        match self.console.choose("Enter choice: ", 6)? {
            Some(1) => self.show_stats(session)?,
            Some(2) => self.inventory_menu(session)?,
            Some(3) => self.quest_menu(session)?,
            Some(4) => self.explore(session)?,
            Some(5) => self.shop_menu(session)?,
            Some(6) => {
                let path = session.save()?;
                self.console
                    .say(format!("Game saved to {}.", path.display()))?;
                return Ok(true);
            }
            _ => self.console.say("Invalid choice. Please select 1-6.")?,
        }
        Ok(false)
    }

    fn show_stats(&mut self, session: &GameSession) -> Result<()> {
        let c = &session.character;
        self.console.say(format!("Name: {}", c.name()))?;
        self.console.say(format!("Class: {}", c.class()))?;
        self.console.say(format!("Level: {}", c.level))?;
        self.console.say(format!(
            "Experience: {}/{}",
            c.experience,
            xp_for_next_level(c.level)
        ))?;
        self.console
            .say(format!("Health: {}/{}", c.health(), c.max_health()))?;
        self.console.say(format!("Strength: {}", c.strength()))?;
        self.console.say(format!("Magic: {}", c.magic()))?;
        self.console.say(format!("Gold: {}", c.gold))?;
        self.console.say(format!(
            "Weapon: {}",
            equipped_name(c.equipped_weapon.as_deref(), session)
        ))?;
        self.console.say(format!(
            "Armor: {}",
            equipped_name(c.equipped_armor.as_deref(), session)
        ))?;
        self.console.say("Active Quests:")?;
        let active = quests::active_quests(c, &session.quests);
        if active.is_empty() {
            self.console.say("  None")?;
        }
        for quest in active {
            self.console
                .say(format!("  - {}: {}", quest.title, quest.description))?;
        }
        self.console.say(format!(
            "Quest completion: {:.1}%",
            quests::completion_percentage(c, &session.quests)
        ))
    }

    /// Prints the inventory and reads a selection by number or item id.
    fn pick_inventory_item(&mut self, session: &GameSession) -> Result<Option<String>> {
        let ids = &session.character.inventory;
        if ids.is_empty() {
            self.console.say("Your inventory is empty.")?;
            return Ok(None);
        }
        for (idx, id) in ids.iter().enumerate() {
            let label = match session.items.get(id) {
                Some(item) => format!("{} ({}, {})", item.name, item.item_type, item.effect),
                None => id.clone(),
            };
            self.console.say(format!("{}. {}", idx + 1, label))?;
        }
        let answer = self.console.prompt("Choose an item: ")?;
        Ok(match answer.parse::<usize>() {
            Ok(n) if (1..=ids.len()).contains(&n) => Some(ids[n - 1].clone()),
            Ok(_) => None,
            Err(_) => Some(answer),
        })
    }

    fn inventory_menu(&mut self, session: &mut GameSession) -> Result<()> {
        loop {
            self.console.blank()?;
            self.console.say(format!(
                "=== Inventory ({}/{} free) ===",
                inventory::free_slots(&session.character),
                quest_chronicles::core::constants::MAX_INVENTORY_SIZE
            ))?;
            self.console.say(
                "1. Use item\n2. Equip weapon\n3. Equip armor\n4. Unequip weapon\n\
                 5. Unequip armor\n6. Drop item\n7. Back",
            )?;
            let choice = self.console.choose("Enter choice: ", 7)?;
            let result = match choice {
                Some(n @ (1 | 2 | 3 | 6)) => match self.pick_inventory_item(session)? {
                    None => Ok(()),
                    Some(id) => self.apply_inventory_action(n, &id, session),
                },
                Some(4) => inventory::unequip_weapon(&mut session.character, &session.items)
                    .and_then(|id| self.console.say(format!("Unequipped {}.", id))),
                Some(5) => inventory::unequip_armor(&mut session.character, &session.items)
                    .and_then(|id| self.console.say(format!("Unequipped {}.", id))),
                Some(7) => return Ok(()),
                _ => self.console.say("Invalid choice. Try again."),
            };
            if let Err(e) = result {
                if !e.is_recoverable() || is_input_closed(&e) {
                    return Err(e);
                }
                self.console.say(format!("Error: {}", e))?;
            }
        }
    }

    fn apply_inventory_action(
        &mut self,
        choice: usize,
        item_id: &str,
        session: &mut GameSession,
    ) -> Result<()> {
        let character = &mut session.character;
        match choice {
            1 => {
                let effect = inventory::use_item(character, item_id, &session.items)?;
                self.console.say(format!("Used {} ({}).", item_id, effect))
            }
            2 => {
                inventory::equip_weapon(character, item_id, &session.items)?;
                self.console.say(format!("Equipped {} as weapon.", item_id))
            }
            3 => {
                inventory::equip_armor(character, item_id, &session.items)?;
                self.console.say(format!("Equipped {} as armor.", item_id))
            }
            _ => {
                inventory::remove_item(character, item_id)?;
                self.console.say(format!("Dropped {}.", item_id))
            }
        }
    }

    fn quest_menu(&mut self, session: &mut GameSession) -> Result<()> {
        loop {
            self.console.blank()?;
            self.console.say("=== Quest Menu ===")?;
            self.console.say(
                "1. View Active Quests\n2. View Available Quests\n3. View Completed Quests\n\
                 4. Accept Quest\n5. Abandon Quest\n6. Turn In Quest\n7. Back",
            )?;
            let choice = self.console.choose("Enter choice: ", 7)?;
            let character = &mut session.character;
            let catalog = &session.quests;
            let result = match choice {
                Some(1) => self.list_quests("Active", quests::active_quests(character, catalog)),
                Some(2) => {
                    self.list_quests("Available", quests::available_quests(character, catalog))
                }
                Some(3) => {
                    self.list_quests("Completed", quests::completed_quests(character, catalog))
                }
                Some(4) => {
                    let id = self.console.prompt("Quest id to accept: ")?;
                    quests::accept_quest(character, &id, catalog)
                        .and_then(|()| self.console.say(format!("Accepted {}.", id)))
                }
                Some(5) => {
                    let id = self.console.prompt("Quest id to abandon: ")?;
                    quests::abandon_quest(character, &id)
                        .and_then(|()| self.console.say(format!("Abandoned {}.", id)))
                }
                Some(6) => {
                    let id = self.console.prompt("Quest id to turn in: ")?;
                    quests::complete_quest(character, &id, catalog).and_then(|reward| {
                        self.console.say(format!(
                            "Quest complete! +{} XP, +{} gold.",
                            reward.experience_gained, reward.gold_gained
                        ))?;
                        if reward.levels_gained > 0 {
                            self.console
                                .say(format!("You are now level {}!", character.level))?;
                        }
                        Ok(())
                    })
                }
                Some(7) => return Ok(()),
                _ => self.console.say("Invalid choice. Try again."),
            };
            if let Err(e) = result {
                if !e.is_recoverable() || is_input_closed(&e) {
                    return Err(e);
                }
                self.console.say(format!("Error: {}", e))?;
            }
        }
    }

    fn list_quests(
        &mut self,
        heading: &str,
        list: Vec<&Quest>,
    ) -> Result<()> {
        self.console.say(format!("{} Quests:", heading))?;
        if list.is_empty() {
            return self.console.say("  None");
        }
        for quest in list {
            self.console.say(format!(
                "  [{}] {} (level {}) - {} XP, {} gold",
                quest.quest_id, quest.title, quest.required_level, quest.reward_xp, quest.reward_gold
            ))?;
        }
        Ok(())
    }

    fn explore(&mut self, session: &mut GameSession) -> Result<()> {
        self.console.say("Exploring the world...")?;
        let (outcome, input_closed) = {
            let mut actions = ConsoleActions::new(&mut self.console);
            let outcome = session.explore(&mut self.rng, &mut actions)?;
            (outcome, actions.input_closed())
        };

        match outcome {
            ExploreOutcome::Victory {
                outcome,
                levels_gained,
            } => {
                self.console.say(format!(
                    "Victory! +{} XP, +{} gold.",
                    outcome.experience_gained, outcome.gold_gained
                ))?;
                if levels_gained > 0 {
                    self.console.say(format!(
                        "Level up! You are now level {}.",
                        session.character.level
                    ))?;
                }
            }
            ExploreOutcome::Escaped => self.console.say("You live to fight another day.")?,
            ExploreOutcome::Defeated => {
                warn!(character = %session.character.name(), "defeated while exploring");
                self.console.say(format!(
                    "You were defeated... and wake up with {} health.",
                    session.character.health()
                ))?;
            }
        }

        if input_closed {
            return Err(GameError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(())
    }

    fn shop_menu(&mut self, session: &mut GameSession) -> Result<()> {
        loop {
            self.console.blank()?;
            self.console.say("=== Shop ===")?;
            self.console
                .say(format!("Your Gold: {}", session.character.gold))?;
            for item in session.items.values() {
                self.console.say(shop_line(item))?;
            }
            self.console.say("1. Buy item\n2. Sell item\n3. Back")?;
            let result = match self.console.choose("Enter choice: ", 3)? {
                Some(1) => {
                    let id = self.console.prompt("Item id to buy: ")?;
                    inventory::purchase_item(&mut session.character, &id, &session.items)
                        .and_then(|gold| {
                            self.console
                                .say(format!("Bought {}. {} gold left.", id, gold))
                        })
                }
                Some(2) => match self.pick_inventory_item(session)? {
                    None => Ok(()),
                    Some(id) => inventory::sell_item(&mut session.character, &id, &session.items)
                        .and_then(|price| {
                            self.console.say(format!("Sold {} for {} gold.", id, price))
                        }),
                },
                Some(3) => return Ok(()),
                _ => self.console.say("Invalid choice. Try again."),
            };
            if let Err(e) = result {
                if !e.is_recoverable() || is_input_closed(&e) {
                    return Err(e);
                }
                self.console.say(format!("Error: {}", e))?;
            }
        }
    }
}

fn shop_line(item: &Item) -> String {
    format!(
        "- {}: {} ({}, {}) - {} gold",
        item.item_id, item.name, item.item_type, item.effect, item.cost
    )
}

fn equipped_name(item_id: Option<&str>, session: &GameSession) -> String {
    match item_id {
        Some(id) => session
            .items
            .get(id)
            .map(|item| item.name.clone())
            .unwrap_or_else(|| id.to_string()),
        None => "None".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::io::Cursor;
    use tempfile::TempDir;

    type TestApp = App<Cursor<Vec<u8>>, Vec<u8>, ChaCha8Rng>;

    fn app(tmp: &TempDir, input: &str) -> TestApp {
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let config = GameConfig::with_root(tmp.path());
        App::new(console, config, ChaCha8Rng::seed_from_u64(12345)).unwrap()
    }

    fn output(app: &TestApp) -> String {
        String::from_utf8_lossy(app.console().output()).to_string()
    }

    #[test]
    fn test_new_game_save_and_quit() {
        let tmp = TempDir::new().unwrap();
        let mut app = app(&tmp, "1\nHero\nwarrior\n6\n4\n");
        app.run().unwrap();

        let text = output(&app);
        assert!(text.contains("Character 'Hero' the Warrior created!"));
        assert!(text.contains("Game saved"));
        assert!(text.contains("Thanks for playing"));

        let manager = CharacterManager::new(&GameConfig::with_root(tmp.path())).unwrap();
        assert_eq!(manager.load_character("Hero").unwrap().level, 1);
    }

    #[test]
    fn test_invalid_name_reprompts() {
        let tmp = TempDir::new().unwrap();
        let mut app = app(&tmp, "1\nbad@name\nGood\n2\n6\n4\n");
        app.run().unwrap();
        let text = output(&app);
        assert!(text.contains("invalid name"));
        assert!(text.contains("Character 'Good' the Mage created!"));
    }

    #[test]
    fn test_shop_purchase_and_stats() {
        let tmp = TempDir::new().unwrap();
        let mut app = app(&tmp, "1\nBuyer\n3\n5\n1\npotion_001\n3\n1\n6\n4\n");
        app.run().unwrap();
        let text = output(&app);
        assert!(text.contains("Bought potion_001. 50 gold left."));
        assert!(text.contains("Gold: 50"));
    }

    #[test]
    fn test_quest_accept_error_is_reported() {
        let tmp = TempDir::new().unwrap();
        let mut app = app(&tmp, "1\nSeeker\n4\n3\n4\nquest_002\n4\nquest_001\n7\n6\n4\n");
        app.run().unwrap();
        let text = output(&app);
        assert!(text.contains("Error: character level 1 is below the required level 2"));
        assert!(text.contains("Accepted quest_001."));
    }

    #[test]
    fn test_closed_input_saves_session() {
        let tmp = TempDir::new().unwrap();
        // Buys a potion, then stdin closes inside the shop
        let mut app = app(&tmp, "1\nQuitter\n1\n5\n1\npotion_001\n");
        app.run().unwrap();
        let manager = CharacterManager::new(&GameConfig::with_root(tmp.path())).unwrap();
        let saved = manager.load_character("Quitter").unwrap();
        assert_eq!(saved.gold, 50);
        assert_eq!(saved.inventory, vec!["potion_001".to_string()]);
    }

    #[test]
    fn test_load_existing_character() {
        let tmp = TempDir::new().unwrap();
        let config = GameConfig::with_root(tmp.path());
        let manager = CharacterManager::new(&config).unwrap();
        let mut hero = Character::new("Veteran", quest_chronicles::character::class::CharacterClass::Rogue);
        hero.level = 4;
        manager.save_character(&mut hero).unwrap();

        let mut app = app(&tmp, "2\n1\n6\n4\n");
        app.run().unwrap();
        let text = output(&app);
        assert!(text.contains("1. Veteran - Level 4 Rogue"));
        assert!(text.contains("Character 'Veteran' loaded!"));
    }
}

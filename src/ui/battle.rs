//! Battle prompts for a human player.

use super::console::Console;
use quest_chronicles::combat::ability::Ability;
use quest_chronicles::combat::logic::{ActionSource, Battle, BattleEvent, PlayerAction};
use quest_chronicles::error::GameError;
use std::io::{BufRead, Write};

/// Asks the player for each battle action and narrates every event.
///
/// Write failures while narrating are ignored; a closed input makes the
/// player try to flee every turn.
pub struct ConsoleActions<'c, R, W> {
    console: &'c mut Console<R, W>,
    input_closed: bool,
}

impl<'c, R: BufRead, W: Write> ConsoleActions<'c, R, W> {
    pub fn new(console: &'c mut Console<R, W>) -> Self {
        Self {
            console,
            input_closed: false,
        }
    }

    pub fn input_closed(&self) -> bool {
        self.input_closed
    }

    fn status(&mut self, battle: &Battle<'_>) {
        let player = battle.player();
        let enemy = &battle.enemy().combatant;
        let ability = match Ability::for_combatant(player) {
            Ok(ability) if battle.ability_cooldown() == 0 => format!("{} ready", ability.name()),
            Ok(ability) => format!(
                "{} in {} turn(s)",
                ability.name(),
                battle.ability_cooldown()
            ),
            Err(_) => "no ability".to_string(),
        };
        let _ = self.console.say(format!(
            "{} HP: {}/{} | {} HP: {}/{} | {}",
            player.name,
            player.health(),
            player.max_health(),
            enemy.name,
            enemy.health(),
            enemy.max_health(),
            ability
        ));
    }
}

impl<R: BufRead, W: Write> ActionSource for ConsoleActions<'_, R, W> {
    fn choose_action(&mut self, battle: &Battle<'_>) -> PlayerAction {
        if self.input_closed {
            return PlayerAction::Flee;
        }
        self.status(battle);
        let _ = self.console.say("1. Attack  2. Special Ability  3. Try to Run");
        match self.console.prompt("Choose your action: ") {
            Ok(choice) => PlayerAction::from_choice(&choice),
            Err(_) => {
                self.input_closed = true;
                PlayerAction::Flee
            }
        }
    }

    fn observe(&mut self, event: &BattleEvent, battle: &Battle<'_>) {
        let _ = self.console.say(event.describe(battle.enemy().name()));
    }

    fn rejected(&mut self, error: &GameError) {
        let _ = self.console.say(format!("Can't do that: {}", error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_chronicles::character::class::CharacterClass;
    use quest_chronicles::combat::logic::BattleResolution;
    use quest_chronicles::combat::types::{Combatant, CombatantKind, Enemy, EnemyKind};
    use rand::rngs::mock::StepRng;
    use std::io::Cursor;

    fn warrior() -> Combatant {
        Combatant::new("Hero", CombatantKind::Player(CharacterClass::Warrior), 120, 15, 5)
    }

    #[test]
    fn test_console_battle_narrates_and_rejects_cooldown() {
        // Power strike, then a second strike on cooldown (refused), then attacks
        let input = "2\n2\n1\n1\n1\n";
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let mut player = warrior();
        let mut enemy = Enemy::new(EnemyKind::Goblin);
        let mut rng = StepRng::new(0, 0);

        let resolution = {
            let mut actions = ConsoleActions::new(&mut console);
            let mut battle = Battle::new(&mut player, &mut enemy).unwrap();
            battle.run(&mut actions, &mut rng).unwrap()
        };
        assert!(matches!(resolution, BattleResolution::Victory(_)));

        let text = String::from_utf8_lossy(console.output()).to_string();
        assert!(text.contains("You used Power Strike for 28 damage!"));
        assert!(text.contains("Can't do that: ability is on cooldown"));
        assert!(text.contains("The Goblin is defeated!"));
    }

    #[test]
    fn test_closed_input_flees() {
        let mut console = Console::new(Cursor::new(Vec::new()), Vec::new());
        let mut player = warrior();
        let mut enemy = Enemy::new(EnemyKind::Goblin);
        let mut rng = StepRng::new(0, 0);

        let mut actions = ConsoleActions::new(&mut console);
        let mut battle = Battle::new(&mut player, &mut enemy).unwrap();
        assert_eq!(
            battle.run(&mut actions, &mut rng).unwrap(),
            BattleResolution::Escaped
        );
        assert!(actions.input_closed());
    }
}

//! Integration test: full battles through the turn protocol
//!
//! Drives battles with scripted actions and checks the event log, ability
//! cooldown handling, and how each ending is reported.

use quest_chronicles::character::class::CharacterClass;
use quest_chronicles::combat::{
    Battle, BattleEvent, BattlePhase, BattleResolution, Combatant, CombatantKind, Enemy,
    EnemyKind, PlayerAction, ScriptedActions, Winner,
};
use quest_chronicles::error::GameError;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn hero(class: CharacterClass) -> Combatant {
    let stats = class.base_stats();
    Combatant::new(
        "Hero",
        CombatantKind::Player(class),
        stats.max_health,
        stats.strength,
        stats.magic,
    )
}

/// Warrior vs Orc, using Power Strike whenever it is ready
#[test]
fn test_warrior_power_strike_rotation_vs_orc() {
    let mut player = hero(CharacterClass::Warrior);
    let mut orc = Enemy::new(EnemyKind::Orc);
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut actions = ScriptedActions::new([
        PlayerAction::Ability,
        PlayerAction::Attack,
        PlayerAction::Attack,
        PlayerAction::Ability,
    ]);

    let mut battle = Battle::new(&mut player, &mut orc).unwrap();
    let resolution = battle.run(&mut actions, &mut rng).unwrap();

    match resolution {
        BattleResolution::Victory(outcome) => {
            assert_eq!(outcome.winner, Winner::Player);
            assert_eq!(outcome.experience_gained, 50);
            assert_eq!(outcome.gold_gained, 25);
        }
        other => panic!("expected victory, got {:?}", other),
    }

    // 27 + 12 + 12 + 27 leaves the orc at 2, the fifth hit finishes it
    assert_eq!(battle.turn(), 5);
    assert_eq!(battle.player().health(), 84);
    assert_eq!(battle.phase(), BattlePhase::Terminated);
    assert!(!battle.is_active());

    let log = battle.log();
    assert_eq!(log[0], BattleEvent::TurnStarted { turn: 1 });
    match &log[1] {
        BattleEvent::AbilityUsed(effect) => assert_eq!(effect.enemy_damage, Some(27)),
        other => panic!("expected ability, got {:?}", other),
    }
    assert_eq!(log[2], BattleEvent::EnemyAttack { damage: 9 });
    assert_eq!(log[3], BattleEvent::TurnStarted { turn: 2 });
    assert_eq!(
        &log[log.len() - 2..],
        &[BattleEvent::PlayerAttack { damage: 2 }, BattleEvent::EnemyDefeated]
    );
}

#[test]
fn test_cooldown_rejection_keeps_the_turn() {
    let mut player = hero(CharacterClass::Mage);
    let mut orc = Enemy::new(EnemyKind::Orc);
    let mut rng = StepRng::new(0, 0);
    let mut battle = Battle::new(&mut player, &mut orc).unwrap();

    assert_eq!(battle.take_turn(PlayerAction::Ability, &mut rng).unwrap(), None);
    assert_eq!(battle.enemy().combatant.health(), 80 - 37);
    assert_eq!(battle.turn(), 2);

    let log_len = battle.log().len();
    let err = battle
        .take_turn(PlayerAction::Ability, &mut rng)
        .unwrap_err();
    assert!(matches!(err, GameError::AbilityOnCooldown { turns_remaining: 2 }));
    assert!(err.is_recoverable());
    assert_eq!(battle.turn(), 2);
    assert_eq!(battle.log().len(), log_len);
    assert_eq!(battle.enemy().combatant.health(), 43);

    // Two ordinary turns later the fireball is back
    battle.take_turn(PlayerAction::Attack, &mut rng).unwrap();
    assert_eq!(battle.ability_cooldown(), 1);
    battle.take_turn(PlayerAction::Attack, &mut rng).unwrap();
    assert_eq!(battle.ability_cooldown(), 0);
    assert!(battle.take_turn(PlayerAction::Ability, &mut rng).is_ok());
}

#[test]
fn test_player_defeat_is_an_error_with_full_log() {
    let mut player = hero(CharacterClass::Mage);
    let mut dragon = Enemy::new(EnemyKind::Dragon);
    let mut rng = StepRng::new(0, 0);
    let mut actions = ScriptedActions::default();

    let mut battle = Battle::new(&mut player, &mut dragon).unwrap();
    let err = battle.run(&mut actions, &mut rng).unwrap_err();
    assert!(matches!(err, GameError::CharacterDead));
    assert!(!err.is_recoverable());

    assert_eq!(battle.check_battle_end(), Some(Winner::Enemy));
    assert_eq!(battle.log().last(), Some(&BattleEvent::PlayerDefeated));
    assert!(battle.enemy().combatant.is_alive());
    assert!(matches!(
        battle.take_turn(PlayerAction::Attack, &mut rng),
        Err(GameError::CombatNotActive)
    ));

    drop(battle);
    assert_eq!(player.health(), 0);
}

#[test]
fn test_enemy_does_not_act_after_dying() {
    let mut player = Combatant::new(
        "Brute",
        CombatantKind::Player(CharacterClass::Warrior),
        50,
        100,
        0,
    );
    let mut goblin = Enemy::new(EnemyKind::Goblin);
    let mut rng = StepRng::new(0, 0);

    let mut battle = Battle::new(&mut player, &mut goblin).unwrap();
    let resolution = battle.take_turn(PlayerAction::Attack, &mut rng).unwrap();
    assert!(matches!(resolution, Some(BattleResolution::Victory(_))));
    assert_eq!(
        battle.log(),
        &[
            BattleEvent::TurnStarted { turn: 1 },
            BattleEvent::PlayerAttack { damage: 50 },
            BattleEvent::EnemyDefeated,
        ]
    );
    assert_eq!(battle.player().health(), 50);
}

#[test]
fn test_escape_success_and_failure() {
    let mut player = hero(CharacterClass::Rogue);
    let mut orc = Enemy::new(EnemyKind::Orc);
    let mut failing = StepRng::new(u64::MAX, 0);

    let mut battle = Battle::new(&mut player, &mut orc).unwrap();
    assert_eq!(battle.take_turn(PlayerAction::Flee, &mut failing).unwrap(), None);
    assert_eq!(battle.log()[1], BattleEvent::EscapeFailed);
    assert_eq!(battle.log()[2], BattleEvent::EnemyAttack { damage: 9 });

    let mut succeeding = StepRng::new(0, 0);
    assert_eq!(
        battle.take_turn(PlayerAction::Flee, &mut succeeding).unwrap(),
        Some(BattleResolution::Escaped)
    );
    assert!(!battle.is_active());
    drop(battle);
    assert_eq!(player.health(), 81);
    assert_eq!(orc.combatant.health(), 80);
}

#[test]
fn test_invalid_input_wastes_turn() {
    let mut player = hero(CharacterClass::Cleric);
    let mut goblin = Enemy::new(EnemyKind::Goblin);
    let mut rng = StepRng::new(0, 0);

    let mut battle = Battle::new(&mut player, &mut goblin).unwrap();
    battle
        .take_turn(PlayerAction::from_choice("dance"), &mut rng)
        .unwrap();
    assert_eq!(
        battle.log()[1],
        BattleEvent::TurnWasted {
            input: "dance".to_string()
        }
    );
    assert_eq!(battle.enemy().combatant.health(), 50);
    assert_eq!(battle.turn(), 2);
}

#[test]
fn test_cannot_start_battle_when_dead() {
    let mut player = hero(CharacterClass::Warrior);
    player.take_damage(1_000);
    let mut goblin = Enemy::new(EnemyKind::Goblin);
    assert!(matches!(
        Battle::new(&mut player, &mut goblin),
        Err(GameError::CharacterDead)
    ));
}

//! Runs every configured class/enemy matchup and aggregates the results.

use super::combat_sim::{simulate_battle, BattleRecord, PolicyActions};
use super::config::SimConfig;
use super::report::{MatchupReport, SimReport};
use crate::character::class::CharacterClass;
use crate::combat::types::EnemyKind;
use crate::error::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport> {
    let mut matchups = Vec::with_capacity(config.classes.len() * config.enemies.len());

    for &class in &config.classes {
        for &enemy in &config.enemies {
            let records = run_matchup(config, class, enemy)?;
            let matchup = MatchupReport::from_records(class, enemy, &records);

            if config.verbosity >= 2 {
                println!(
                    "{:<8} vs {:<7} - win {:>5.1}%, avg turns {:.1}",
                    class,
                    enemy,
                    matchup.win_rate * 100.0,
                    matchup.avg_turns
                );
            }
            matchups.push(matchup);
        }
    }

    Ok(SimReport {
        num_runs: config.num_runs,
        policy: config.policy,
        player_level: config.player_level,
        seed: config.seed,
        matchups,
    })
}

fn run_matchup(
    config: &SimConfig,
    class: CharacterClass,
    enemy: EnemyKind,
) -> Result<Vec<BattleRecord>> {
    let mut records = Vec::with_capacity(config.num_runs as usize);
    let mut actions = PolicyActions::new(config.policy, config.flee_below_percent);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let record = simulate_battle(class, config.player_level, enemy, &mut actions, &mut rng)?;
        debug!(%class, %enemy, run = run_idx, result = ?record.result, turns = record.turns, "simulated battle");
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::config::SimPolicy;

    fn small_config() -> SimConfig {
        SimConfig {
            num_runs: 20,
            seed: Some(7),
            verbosity: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_runs_every_matchup() {
        let report = run_simulation(&small_config()).unwrap();
        assert_eq!(report.matchups.len(), 12);
        for matchup in &report.matchups {
            assert_eq!(matchup.battles, 20);
            assert_eq!(matchup.wins + matchup.losses + matchup.escapes, 20);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimConfig {
            classes: vec![CharacterClass::Rogue],
            enemies: vec![EnemyKind::Orc],
            ..small_config()
        };
        let first = run_simulation(&config).unwrap();
        let second = run_simulation(&config).unwrap();
        assert_eq!(first.matchups, second.matchups);
    }

    #[test]
    fn test_basic_warrior_goblin_always_wins() {
        let config = SimConfig {
            classes: vec![CharacterClass::Warrior],
            enemies: vec![EnemyKind::Goblin],
            policy: SimPolicy::BasicOnly,
            ..small_config()
        };
        let report = run_simulation(&config).unwrap();
        let matchup = &report.matchups[0];
        assert_eq!(matchup.win_rate, 1.0);
        assert_eq!(matchup.escape_rate, 0.0);
        assert_eq!(matchup.avg_turns, 4.0);
        assert_eq!(matchup.avg_remaining_health, 105.0);
    }
}

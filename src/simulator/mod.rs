//! Combat balance simulator.
//!
//! Runs seeded batches of battles for every class against every enemy kind
//! through the same battle engine the game uses, and reports win rates and
//! pacing per matchup.

mod combat_sim;
mod config;
mod report;
mod runner;

pub use combat_sim::{simulate_battle, BattleRecord, BattleResult, PolicyActions};
pub use config::{SimConfig, SimPolicy};
pub use report::{MatchupReport, SimReport};
pub use runner::run_simulation;

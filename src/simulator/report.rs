//! Simulation report generation.

use super::combat_sim::{BattleRecord, BattleResult};
use super::config::SimPolicy;
use crate::character::class::CharacterClass;
use crate::combat::types::EnemyKind;
use serde::Serialize;

/// Aggregated results for one class against one enemy kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupReport {
    pub class: CharacterClass,
    pub enemy: EnemyKind,
    pub battles: u32,
    pub wins: u32,
    pub losses: u32,
    pub escapes: u32,
    pub win_rate: f64,
    pub escape_rate: f64,
    pub avg_turns: f64,
    pub avg_remaining_health: f64,
}

impl MatchupReport {
    pub fn from_records(class: CharacterClass, enemy: EnemyKind, records: &[BattleRecord]) -> Self {
        let battles = records.len() as u32;
        let count = |result: BattleResult| records.iter().filter(|r| r.result == result).count() as u32;
        let wins = count(BattleResult::Won);
        let losses = count(BattleResult::Lost);
        let escapes = count(BattleResult::Escaped);

        let denominator = battles.max(1) as f64;
        Self {
            class,
            enemy,
            battles,
            wins,
            losses,
            escapes,
            win_rate: wins as f64 / denominator,
            escape_rate: escapes as f64 / denominator,
            avg_turns: records.iter().map(|r| r.turns as f64).sum::<f64>() / denominator,
            avg_remaining_health: records
                .iter()
                .map(|r| r.remaining_health as f64)
                .sum::<f64>()
                / denominator,
        }
    }
}

/// Results from a whole simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub policy: SimPolicy,
    pub player_level: u32,
    pub seed: Option<u64>,
    pub matchups: Vec<MatchupReport>,
}

impl SimReport {
    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Battles per matchup: {}, policy: {}, level: {}\n\n",
            self.num_runs, self.policy, self.player_level
        ));

        report.push_str("── MATCHUPS ─────────────────────────────────────────────────────\n");
        report.push_str("  Class     Enemy     Win%   Escape%   Avg Turns   Avg HP Left\n");
        report.push_str("  ─────     ─────     ────   ───────   ─────────   ───────────\n");
        for m in &self.matchups {
            report.push_str(&format!(
                "  {:<8}  {:<8}  {:>5.1}  {:>7.1}   {:>9.1}   {:>11.1}\n",
                m.class.name(),
                m.enemy.name(),
                m.win_rate * 100.0,
                m.escape_rate * 100.0,
                m.avg_turns,
                m.avg_remaining_health
            ));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let mut flagged = false;
        for m in &self.matchups {
            let expected = EnemyKind::for_level(self.player_level) == m.enemy;
            if expected && m.win_rate < 0.5 {
                flagged = true;
                report.push_str(&format!(
                    "  ⚠️  {} wins only {:.1}% against the {} it meets at this level\n",
                    m.class,
                    m.win_rate * 100.0,
                    m.enemy
                ));
            }
        }
        if !flagged {
            report.push_str("  No level-appropriate matchup below 50% win rate\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

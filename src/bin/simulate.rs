//! Combat balance simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # 1000 battles per matchup
//!   cargo run --bin simulate -- -n 100 --level 4  # Level 4 characters
//!   cargo run --bin simulate -- --seed 42 --json  # Reproducible, JSON output

use quest_chronicles::character::class::CharacterClass;
use quest_chronicles::combat::types::EnemyKind;
use quest_chronicles::simulator::{run_simulation, SimConfig};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run with --help for usage.");
            std::process::exit(1);
        }
    };

    if !json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              QUEST CHRONICLES BALANCE SIMULATOR               ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Battles:        {} per matchup", config.num_runs);
        println!("  Policy:         {}", config.policy);
        println!("  Level:          {}", config.player_level);
        if let Some(percent) = config.flee_below_percent {
            println!("  Flee below:     {}% health", percent);
        }
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_args(args: &[String]) -> Result<(SimConfig, bool), String> {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-n" | "--runs" => {
                config.num_runs = next_value(args, &mut i, flag)?
                    .parse()
                    .map_err(|_| "--runs must be a number".to_string())?;
            }
            "-s" | "--seed" => {
                config.seed = Some(
                    next_value(args, &mut i, flag)?
                        .parse()
                        .map_err(|_| "--seed must be a number".to_string())?,
                );
            }
            "-l" | "--level" => {
                let level: u32 = next_value(args, &mut i, flag)?
                    .parse()
                    .map_err(|_| "--level must be a number".to_string())?;
                config.player_level = level.max(1);
            }
            "-p" | "--policy" => {
                config.policy = next_value(args, &mut i, flag)?
                    .parse()
                    .map_err(|e| format!("{}", e))?;
            }
            "-c" | "--class" => {
                let class: CharacterClass = next_value(args, &mut i, flag)?
                    .parse()
                    .map_err(|e| format!("{}", e))?;
                config.classes = vec![class];
            }
            "-e" | "--enemy" => {
                let enemy: EnemyKind = next_value(args, &mut i, flag)?
                    .parse()
                    .map_err(|e| format!("{}", e))?;
                config.enemies = vec![enemy];
            }
            "--flee-below" => {
                config.flee_below_percent = Some(
                    next_value(args, &mut i, flag)?
                        .parse()
                        .map_err(|_| "--flee-below must be a percentage".to_string())?,
                );
            }
            "--level-enemies" => {
                config.enemies = vec![EnemyKind::for_level(config.player_level)];
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "--json" => json = true,
            "-v" | "--verbose" => config.verbosity = 2,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok((config, json))
}

fn print_help() {
    println!("Quest Chronicles Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Battles per class/enemy matchup (default: 1000)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -l, --level <L>       Character level to simulate (default: 1)");
    println!("    -p, --policy <P>      basic | ability (default: ability)");
    println!("    -c, --class <C>       Only simulate one class");
    println!("    -e, --enemy <E>       Only simulate one enemy kind");
    println!("    --flee-below <PCT>    Try to run when health drops below PCT%");
    println!("    --level-enemies       Only the enemy met at the chosen level");
    println!("    --quick               Quick check (100 battles, seed 42)");
    println!("    --json                Print the report as JSON");
    println!("    -v, --verbose         Per-matchup progress output");
    println!("    -h, --help            Show this help");
}

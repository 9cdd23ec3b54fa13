mod ui;

use quest_chronicles::build_info;
use quest_chronicles::core::config::GameConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ui::{App, Console};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_help() {
    println!("Quest Chronicles - A Text RPG\n");
    println!("Usage: quest-chronicles [options]\n");
    println!("Options:");
    println!("  --home <DIR>  Store saves and game data under DIR");
    println!("                (default: $QUEST_CHRONICLES_HOME or ~/.quest-chronicles)");
    println!("  --version     Show version information");
    println!("  --help        Show this help message");
    println!("\nSet RUST_LOG=info to see game events on stderr.");
}

fn main() {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut home: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("quest-chronicles {}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--home" => {
                if i + 1 < args.len() {
                    home = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("--home needs a directory");
                    std::process::exit(1);
                }
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'quest-chronicles --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    init_logging();

    let config = match home {
        Some(root) => GameConfig::with_root(root),
        None => match GameConfig::from_env() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Could not locate a home directory: {}", e);
                std::process::exit(1);
            }
        },
    };

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());
    let result =
        App::new(console, config, ChaCha8Rng::from_entropy()).and_then(|mut app| app.run());

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Self-play game generation CLI.
//!
//! Plays random Game of War matches and outputs the game records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games to play (default: 10)
//!   --max-turns N    Turn limit per game (default: 200)
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed (default: entropy)
//!   --scenario NAME  Starting scenario (default: Default)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use kriegspiel::selfplay::{self, SelfPlayConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let parsed = match flag {
            "--games" => value(&args, &mut i).map(|v| config.num_games = v),
            "--max-turns" => value(&args, &mut i).map(|v| config.max_turns = v),
            "--threads" => value(&args, &mut i).map(|v| config.threads = v),
            "--seed" => value(&args, &mut i).map(|v| config.seed = Some(v)),
            "--scenario" => value::<String>(&args, &mut i).map(|v| config.scenario = v),
            "--output" => value::<String>(&args, &mut i).map(|v| output_path = Some(v)),
            "--quiet" => {
                config.quiet = true;
                Ok(())
            }
            "--help" | "-h" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            other => Err(format!("Unknown argument: {other}")),
        };
        if let Err(msg) = parsed {
            eprintln!("{msg}");
            print_usage();
            return ExitCode::FAILURE;
        }
        i += 1;
    }

    if !config.quiet {
        eprintln!(
            "Self-play: {} games on '{}', max {} turns, {} threads",
            config.num_games, config.scenario, config.max_turns, config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            eprintln!("Cannot load scenario '{}': {e}", config.scenario);
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.1}s ({:.1} games/hour)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64() * 3600.0
        );
        selfplay::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };

    match (written, output_path) {
        (Err(e), _) => {
            eprintln!("Failed to write output: {e}");
            ExitCode::FAILURE
        }
        (Ok(()), Some(path)) => {
            if !config.quiet {
                eprintln!("Wrote {} games to {}", games.len(), path);
            }
            ExitCode::SUCCESS
        }
        (Ok(()), None) => ExitCode::SUCCESS,
    }
}

/// Consumes the value following the flag at `args[*i]`.
fn value<T: FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    *i += 1;
    let raw = args.get(*i).ok_or_else(|| format!("Missing value for {flag}"))?;
    raw.parse().map_err(|_| format!("Invalid {flag} value: {raw}"))
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N         Number of games to play (default: 10)");
    eprintln!("  --max-turns N     Turn limit per game (default: 200)");
    eprintln!("  --threads N       Number of parallel threads (default: 4)");
    eprintln!("  --seed N          Random seed (default: entropy)");
    eprintln!("  --scenario NAME   Starting scenario (default: Default)");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --quiet           Suppress progress and summary output");
    eprintln!("  --help            Show this help");
}

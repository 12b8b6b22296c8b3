//! Self-play game generation.
//!
//! Plays random games from a scenario and records every turn: the position
//! the turn started from and the actions the side to move took. Records
//! are written as JSONL, one game per line.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::{Action, Board, GameState, Side, MAX_MOVES_PER_TURN};
use crate::movegen::random_action;
use crate::protocol::fen::{encode_board, FenError};
use crate::scenario::{default_scenario, scenario};

/// Upper bound on actions in one turn: every move, one attack and the end.
/// Random play never reaches it; it guards against a rules bug looping.
const MAX_ACTIONS_PER_TURN: usize = MAX_MOVES_PER_TURN + 2;

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Games still running after this many turns are recorded as undecided.
    pub max_turns: u32,
    /// Number of parallel threads; 1 plays sequentially.
    pub threads: usize,
    /// Base random seed; `None` seeds every game from entropy.
    pub seed: Option<u64>,
    /// Scenario every game starts from.
    pub scenario: String,
    /// Suppress per-game progress lines.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            max_turns: 200,
            threads: 4,
            seed: None,
            scenario: default_scenario().name.to_string(),
            quiet: false,
        }
    }
}

/// One side's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub side: Side,
    /// Position at the start of the turn.
    pub fen: String,
    pub actions: Vec<Action>,
}

/// A complete self-play game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub scenario: String,
    pub winner: Option<Side>,
    /// Turns played, counting each side's turn separately.
    pub turns: u32,
    pub final_fen: String,
    pub history: Vec<TurnRecord>,
}

/// Plays one game from `start` to a decision or the turn limit.
pub fn play_game(config: &SelfPlayConfig, start: &Board, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut state = GameState::start(start.clone());
    let mut history = Vec::new();

    while state.outcome.is_none() && state.turn <= config.max_turns {
        let mut record = TurnRecord {
            turn: state.turn,
            side: state.current,
            fen: encode_board(&state.board),
            actions: Vec::new(),
        };

        for _ in 0..MAX_ACTIONS_PER_TURN {
            let Some(action) = random_action(&state, rng) else {
                break;
            };
            record.actions.push(action);
            if let Err(e) = state.apply(action) {
                warn!("game {game_id}: generated action {action} was rejected: {e}");
                break;
            }
            if action == Action::EndTurn || state.outcome.is_some() {
                break;
            }
        }

        // Close a turn that ran out of actions without ending.
        if state.outcome.is_none() && record.turn == state.turn {
            if state.end_turn().is_err() {
                history.push(record);
                break;
            }
            record.actions.push(Action::EndTurn);
        }
        history.push(record);
    }

    GameRecord {
        game_id,
        scenario: config.scenario.clone(),
        winner: state.outcome.map(|o| o.winner),
        turns: history.len() as u32,
        final_fen: encode_board(&state.board),
        history,
    }
}

/// Resolves the configured scenario to its board, falling back to the
/// default scenario for unknown names.
fn starting_board(config: &SelfPlayConfig) -> Result<Board, FenError> {
    let chosen = match scenario(&config.scenario) {
        Some(s) => s,
        None => {
            warn!("unknown scenario '{}', using '{}'", config.scenario, default_scenario().name);
            default_scenario()
        }
    };
    chosen.board()
}

fn game_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64)),
        None => SmallRng::from_entropy(),
    }
}

fn describe(game: &GameRecord) -> String {
    match game.winner {
        Some(w) => format!("{w} wins"),
        None => "undecided".to_string(),
    }
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, FenError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    })?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// This allows the caller to process games incrementally (e.g. write to disk)
/// rather than waiting for all games to finish. Parallel runs deliver games
/// in completion order.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), FenError>
where
    F: FnMut(GameRecord) + Send,
{
    let start = starting_board(config)?;
    if config.threads > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
            Ok(pool) => run_self_play_parallel(config, &start, pool, on_game),
            Err(e) => {
                warn!("could not build a {}-thread pool ({e}), playing sequentially", config.threads);
                run_self_play_sequential(config, &start, on_game);
            }
        }
    } else {
        run_self_play_sequential(config, &start, on_game);
    }
    Ok(())
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, start: &Board, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let game_start = Instant::now();
        let mut rng = game_rng(config, i);
        let game = play_game(config, start, i, &mut rng);
        if !config.quiet {
            info!(
                "game {}/{}: {} after {} turns ({:.2}s)",
                i + 1,
                config.num_games,
                describe(&game),
                game.turns,
                game_start.elapsed().as_secs_f64(),
            );
        }
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently on the given pool.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, start: &Board, pool: rayon::ThreadPool, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        let completed = &completed;
        scope.spawn(move || {
            pool.install(|| {
                (0..config.num_games).into_par_iter().for_each_with(tx, |tx, i| {
                    let game_start = Instant::now();
                    let mut rng = game_rng(config, i);
                    let game = play_game(config, start, i, &mut rng);
                    if !config.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        info!(
                            "game {}/{}: {} after {} turns ({:.2}s)",
                            n,
                            config.num_games,
                            describe(&game),
                            game.turns,
                            game_start.elapsed().as_secs_f64(),
                        );
                    }
                    let _ = tx.send(game);
                });
            });
        });

        // Receive completed games on this thread and pass to callback.
        for game in rx {
            on_game(game);
        }
    });
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        write_game_json(game, out)?;
    }
    out.flush()
}

/// Writes a single game record as one JSON line.
pub fn write_game_json<W: Write>(game: &GameRecord, out: &mut W) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, game)?;
    writeln!(out)
}

/// Tallies wins per side and undecided games.
pub fn summarize(games: &[GameRecord]) -> (usize, usize, usize) {
    let north = games.iter().filter(|g| g.winner == Some(Side::North)).count();
    let south = games.iter().filter(|g| g.winner == Some(Side::South)).count();
    (north, south, games.len() - north - south)
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    if games.is_empty() {
        eprintln!("No games played.");
        return;
    }

    let (north, south, undecided) = summarize(games);
    let total_turns: u32 = games.iter().map(|g| g.turns).sum();
    let total_actions: usize = games
        .iter()
        .flat_map(|g| g.history.iter())
        .map(|t| t.actions.len())
        .sum();

    eprintln!();
    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", games.len());
    eprintln!("North wins: {north}");
    eprintln!("South wins: {south}");
    eprintln!("Undecided: {undecided}");
    eprintln!("Avg turns: {:.1}", total_turns as f64 / games.len() as f64);
    if total_turns > 0 {
        eprintln!("Avg actions per turn: {:.2}", total_actions as f64 / total_turns as f64);
    }
}

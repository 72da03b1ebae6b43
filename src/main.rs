//! Neon Runner entry point
//!
//! Headless native driver: runs the runner or a Connect-Four match at a
//! fixed display rate and prints a JSON summary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use log::LevelFilter;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use neon_runner::connect4::{Match, MatchEvent, Mode, Phase};
use neon_runner::platform::Presenter;
use neon_runner::sim::GameState;
use neon_runner::{RunnerApp, Tuning, TuningError};

/// Simulated display rate for headless runs
const FRAME_DT: f32 = 1.0 / 60.0;
/// Score interval between progress log lines
const SCORE_LOG_INTERVAL: u64 = 100;
/// Give up on a Connect-Four match after this many frames
const MAX_MATCH_FRAMES: u32 = 60 * 600;

/// Endless runner and Connect-Four gameplay cores
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the endless runner headless
    Runner {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Simulated seconds to run
        #[arg(long, default_value_t = 60.0)]
        seconds: f32,
        /// JSON tuning file; missing fields use defaults
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Do not let the autopilot play
        #[arg(long)]
        no_autopilot: bool,
        /// Restart this many seconds after each game over
        #[arg(long)]
        auto_restart: Option<f32>,
    },
    /// Play one Connect-Four match with random moves
    Connect4 {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Both sides are human (random) instead of the computer opponent
        #[arg(long)]
        two_player: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env).try_init();
}

/// Presenter that reports through the log
#[derive(Debug, Default)]
struct LogPresenter {
    frames: u64,
    last_logged: u64,
}

impl Presenter for LogPresenter {
    fn render(&mut self, _state: &GameState) {
        self.frames += 1;
    }

    fn show_score(&mut self, score: u64) {
        if score >= self.last_logged + SCORE_LOG_INTERVAL {
            self.last_logged = score - score % SCORE_LOG_INTERVAL;
            log::info!("Score: {}", score);
        }
    }

    fn show_game_over(&mut self, score: u64) {
        log::info!("GAME OVER - score {}", score);
    }

    fn hide_game_over(&mut self) {
        self.last_logged = 0;
        log::info!("New run");
    }
}

#[derive(Serialize)]
struct RunnerSummary {
    seed: u64,
    games: u32,
    best_score: u64,
    final_score: u64,
    frames: u64,
}

#[derive(Serialize)]
struct MatchSummary {
    seed: u64,
    mode: Mode,
    result: Option<MatchEvent>,
    discs: usize,
}

fn run_runner(
    seed: u64,
    seconds: f32,
    tuning: Option<PathBuf>,
    autopilot: bool,
    auto_restart: Option<f32>,
) -> Result<RunnerSummary, TuningError> {
    let tuning = match tuning {
        Some(path) => Tuning::load(&path)?,
        None => Tuning::default(),
    };

    let mut app = RunnerApp::new(seed, tuning, LogPresenter::default());
    if let Some(delay) = auto_restart {
        app = app.with_auto_restart(delay);
    }
    app.set_autopilot(autopilot);

    let frames = (seconds.max(0.0) / FRAME_DT).round() as u64;
    for _ in 0..frames {
        app.update(FRAME_DT);
    }

    let final_score = app.state.display_score();
    Ok(RunnerSummary {
        seed,
        games: app.runs_finished() + u32::from(!app.state.is_game_over()),
        best_score: app.best_score().max(final_score),
        final_score,
        frames: app.presenter().frames,
    })
}

fn run_connect4(seed: u64, two_player: bool) -> MatchSummary {
    let mode = if two_player {
        Mode::TwoPlayer
    } else {
        Mode::OnePlayer
    };
    let mut game = Match::new(mode, seed);
    // Separate stream for the stand-in human so the opponent's picks match
    // an interactive session with the same seed
    let mut human = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let mut result = None;

    for _ in 0..MAX_MATCH_FRAMES {
        if game.phase() == Phase::AwaitingMove && !game.is_computer_turn() {
            let open = game.board().open_columns();
            if !open.is_empty() {
                game.select_column(open[human.random_range(0..open.len())]);
            }
        }
        game.advance(FRAME_DT);

        for event in game.drain_events() {
            match event {
                MatchEvent::DiscLanded { column, row, disc } => {
                    log::info!("{:?} -> column {} row {}", disc, column, row);
                }
                MatchEvent::TurnChanged(_) => {}
                MatchEvent::Won(_) | MatchEvent::Draw => result = Some(event),
            }
        }
        if game.is_over() {
            break;
        }
    }

    MatchSummary {
        seed,
        mode,
        result,
        discs: game.board().disc_count(),
    }
}

fn main() -> Result<(), TuningError> {
    let args = Args::parse();
    init_logging(args.verbose);
    log::info!("Neon Runner starting...");

    let summary = match args.command {
        Command::Runner {
            seed,
            seconds,
            tuning,
            no_autopilot,
            auto_restart,
        } => serde_json::to_string_pretty(&run_runner(
            seed,
            seconds,
            tuning,
            !no_autopilot,
            auto_restart,
        )?)?,
        Command::Connect4 { seed, two_player } => {
            serde_json::to_string_pretty(&run_connect4(seed, two_player))?
        }
    };
    println!("{}", summary);
    Ok(())
}

//! Headless simulator (default binary).
//!
//! Autoplays a seeded session with random moves, rotations and drops, runs
//! every line clear to completion with a fixed frame delta, and prints the
//! final board. There is no rendering or input; it exists to exercise the
//! engine end to end.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use stackfall::core::{EngineConfig, Game, ManualClock, SimpleRng, Stopwatch};
use stackfall::types::{Direction, TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "stackfall-sim", about = "Autoplay a headless stackfall session")]
struct Cli {
    /// JSON engine config; flags below override its fields
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for piece selection and autoplay decisions
    #[arg(short, long)]
    seed: Option<u32>,

    /// Stop after this many pieces have been spawned
    #[arg(short, long, default_value = "200", value_name = "N")]
    pieces: u32,

    #[arg(long, value_name = "ROWS")]
    rows: Option<usize>,

    #[arg(long, value_name = "COLS")]
    cols: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(rows = config.rows, cols = config.cols, seed = config.seed, "starting simulation");

    let summary = run(config, cli.pieces)?;
    println!("{}", summary.board);
    println!(
        "pieces: {}  rows cleared: {}  game over: {}",
        summary.pieces, summary.rows_cleared, summary.game_over
    );
    Ok(())
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EngineConfig::from_json_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    config.validate().context("invalid engine config")?;
    Ok(config)
}

struct Summary {
    board: String,
    pieces: u32,
    rows_cleared: usize,
    game_over: bool,
}

fn run(config: EngineConfig, max_pieces: u32) -> Result<Summary> {
    // Autoplay decisions use their own stream so piece order matches a
    // human-driven game with the same seed.
    let mut brain = SimpleRng::new(config.seed.wrapping_mul(31).wrapping_add(7));
    let cols = config.cols as u32;
    let mut game = Game::try_new(config)?;
    let frame = Duration::from_millis(TICK_MS as u64);
    let mut clock = Stopwatch::new(ManualClock::new());
    clock.start();
    let mut rows_cleared = 0;

    while game.pieces_spawned() < max_pieces && game.spawn_piece() {
        for _ in 0..brain.next_range(4) {
            game.rotate_active_piece(brain.next_range(2) == 0);
        }
        let shift = brain.next_range(cols) as i32 - (cols / 2) as i32;
        let direction = if shift < 0 {
            Direction::Left
        } else {
            Direction::Right
        };
        for _ in 0..shift.abs() {
            if !game.move_active_piece(direction, 1) {
                break;
            }
        }
        game.drop_active_piece();

        if let Some(event) = game.take_last_event() {
            rows_cleared += event.cleared_rows.len();
        }
        let mut frames = 0u32;
        while game.is_line_clear_in_progress() {
            clock.source_mut().advance(frame);
            clock.tick();
            game.tick_line_clear(clock.delta());
            frames += 1;
        }
        if frames > 0 {
            debug!(frames, "line clear finished");
        }
    }

    clock.stop();
    debug!(simulated = ?clock.elapsed(), "simulation finished");

    Ok(Summary {
        board: game.board_snapshot().render_text(),
        pieces: game.pieces_spawned(),
        rows_cleared,
        game_over: game.game_over(),
    })
}

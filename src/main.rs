mod clock;
mod food;
mod game;
mod grid;
mod render;
mod snake;
mod term;

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::clock::FixedRateClock;
use crate::food::FoodPlacement;
use crate::game::SnakeGame;
use crate::grid::Grid;
use crate::term::{TermKeys, TermManager};

pub type TermInt = u16;
/// Pixel-aligned cell position.
pub type Coords = (i32, i32);

/// Snake on a wrapping board, played in the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Board width in pixel units; every 20 units make one cell.
    #[arg(long, value_name = "PIXELS", default_value_t = 640)]
    width: u32,
    /// Board height in pixel units; every 20 units make one cell.
    #[arg(long, value_name = "PIXELS", default_value_t = 480)]
    height: u32,
    /// Game ticks per second.
    #[arg(long, value_name = "TICKS", default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=1000))]
    tps: u32,
    /// Seed for apple placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,
    /// Never place an apple under the snake.
    #[arg(long)]
    food_avoids_snake: bool,
    /// File the log is written to.
    #[arg(long, value_name = "PATH", default_value = "snake.log")]
    log_file: PathBuf,
    /// One of off, error, warn, info, debug, trace.
    #[arg(long, value_name = "LEVEL", default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    value.parse().map_err(|_| format!("unknown log level '{}'", value))
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // The terminal is in raw mode while playing, so logs go to a file
    if args.log_level != LevelFilter::Off {
        let file = File::create(&args.log_file)
            .with_context(|| format!("Could not create log file {}", args.log_file.display()))?;
        WriteLogger::init(args.log_level, Config::default(), file).context("Failed to initialize logger")?;
    }

    info!("Starting with {:?}", args);

    let grid = Grid::new(args.width, args.height)?;
    let placement = if args.food_avoids_snake { FoodPlacement::AvoidSnake } else { FoodPlacement::Anywhere };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let clock = FixedRateClock::new(args.tps);
    info!("{}x{} cells, ticking every {:?}", grid.columns(), grid.rows(), clock.interval());

    let term = TermManager::new(&grid)?;

    // Dropping the game hands the terminal back, on error paths too
    let mut game = SnakeGame::new(grid, placement, term, TermKeys, clock, rng);
    let summary = game.run()?;

    info!(
        "Session over: {} ticks, {} apples, {} resets, longest snake {}",
        summary.ticks, summary.apples, summary.resets, summary.longest
    );
    Ok(())
}

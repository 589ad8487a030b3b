#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line harness that generates a maze and lets the navigator solve it.

mod harness;
mod render;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use maze_bot_core::Game;
use maze_bot_system_maze_generation::MazeGenerator;
use maze_bot_system_navigation::Navigator;

/// Generates a perfect maze and solves it one move at a time.
#[derive(Debug, Parser)]
#[command(name = "maze-bot", version, about, long_about = None)]
struct Args {
    /// Number of grid rows.
    #[arg(long, default_value_t = 8)]
    rows: u32,

    /// Number of grid columns.
    #[arg(long, default_value_t = 8)]
    columns: u32,

    /// Seed for the maze generator. Drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Move cap for the attempt. Defaults to twice the number of cells.
    #[arg(long)]
    max_moves: Option<u64>,

    /// Print the generated game as JSON instead of solving it.
    #[arg(long)]
    json: bool,
}

/// Entry point for the maze bot command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("generating {}x{} maze with seed {seed}", args.rows, args.columns);

    let game = Game::new(args.rows, args.columns).context("invalid grid dimensions")?;
    let maze = MazeGenerator::new(seed)
        .generate(game)
        .context("maze generation failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&maze).context("failed to encode maze")?;
        println!("{json}");
        return Ok(());
    }

    let cap = args
        .max_moves
        .unwrap_or_else(|| harness::default_move_cap(&maze));
    let mut navigator = Navigator::new();
    let outcome = harness::run_attempt(maze.clone(), &mut navigator, cap)
        .context("navigator gave up")?;

    print!("{}", render::render(&maze, &outcome.trail));

    if !outcome.solved {
        bail!(
            "attempt failed: end {} not reached within {cap} moves (seed {seed})",
            maze.end()
        );
    }

    println!(
        "solved {}x{} maze (seed {seed}) in {} moves, {} cells visited",
        maze.rows(),
        maze.columns(),
        outcome.moves,
        outcome.visited_cells()
    );
    Ok(())
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomised maze generator that carves a perfect maze into a game grid.
//!
//! The generator closes every wall, picks distinct start and end cells and
//! grows a spanning tree outward from the start cell with a breadth-first
//! frontier. Each dequeued cell opens passages toward all of its unreached
//! neighbours in a shuffled order, so every cell is joined to the tree by
//! exactly one edge.

use std::collections::VecDeque;

use log::{debug, trace};
use maze_bot_core::{CellCoord, Direction, Game, GridError};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Errors reported when a game cannot be turned into a maze.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Distinct start and end cells need at least two cells.
    #[error("a {rows}x{columns} grid cannot hold distinct start and end cells")]
    TooFewCells {
        /// Row count of the rejected grid.
        rows: u32,
        /// Column count of the rejected grid.
        columns: u32,
    },
    /// Positions were predetermined but start and end coincide.
    #[error("predetermined start and end both sit at {cell}")]
    CoincidentEndpoints {
        /// Cell shared by start and end.
        cell: CellCoord,
    },
    /// The grid model rejected an access.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Seeded maze generator.
///
/// Every generator owns its random source, so two generators created from
/// the same seed produce identical mazes for identical inputs.
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    rng: ChaCha8Rng,
}

impl MazeGenerator {
    /// Creates a generator whose random source is seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Consumes the game and produces a maze with the same dimensions.
    ///
    /// Rule flags limit what is rewritten: `predetermined_walls` keeps the
    /// wall layout as given, `predetermined_positions` keeps `start` and
    /// `end`. Item labels are never touched.
    pub fn generate(&mut self, mut game: Game) -> Result<Game, GenerationError> {
        let (rows, columns) = game.dimensions();
        if game.cell_count() < 2 {
            return Err(GenerationError::TooFewCells { rows, columns });
        }

        let rule = *game.rule();
        debug!(
            "generating {rows}x{columns} maze (predetermined walls: {}, items: {}, positions: {})",
            rule.predetermined_walls, rule.predetermined_items, rule.predetermined_positions
        );

        if !rule.predetermined_walls {
            game.close_all_walls();
        }

        if rule.predetermined_positions {
            if game.start() == game.end() {
                return Err(GenerationError::CoincidentEndpoints { cell: game.start() });
            }
        } else {
            self.place_endpoints(&mut game)?;
        }

        if !rule.predetermined_walls {
            self.carve(&mut game)?;
        }

        debug!(
            "maze ready: start {} end {} with {} open passages",
            game.start(),
            game.end(),
            game.open_passage_count()
        );
        Ok(game)
    }

    fn place_endpoints(&mut self, game: &mut Game) -> Result<(), GenerationError> {
        let start = self.random_cell(game);
        let mut end = self.random_cell(game);
        while end == start {
            end = self.random_cell(game);
        }

        game.set_start(start)?;
        game.set_end(end)?;
        Ok(())
    }

    fn random_cell(&mut self, game: &Game) -> CellCoord {
        let row = self.rng.gen_range(0..game.rows());
        let column = self.rng.gen_range(0..game.columns());
        CellCoord::new(row, column)
    }

    fn carve(&mut self, game: &mut Game) -> Result<(), GenerationError> {
        let origin = game.start();
        let mut reached = vec![false; game.cell_count()];
        let mut frontier = VecDeque::with_capacity(game.cell_count());
        let mut candidates: Vec<(Direction, CellCoord)> = Vec::with_capacity(4);

        reached[game.index_of(origin)?] = true;
        frontier.push_back(origin);

        while let Some(cell) = frontier.pop_front() {
            candidates.clear();
            for direction in Direction::SCAN_ORDER {
                let Some(neighbor) = game.neighbor(cell, direction) else {
                    continue;
                };
                if reached[game.index_of(neighbor)?] {
                    continue;
                }
                candidates.push((direction, neighbor));
            }

            candidates.shuffle(&mut self.rng);

            for &(direction, neighbor) in &candidates {
                game.set_passage(cell, direction, true)?;
                reached[game.index_of(neighbor)?] = true;
                frontier.push_back(neighbor);
                trace!("carved {cell} -> {neighbor}");
            }
        }

        Ok(())
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stepwise depth-first navigator that decides one move per call.
//!
//! The navigator only sees the current game snapshot. It remembers which
//! cells it already reached and where it arrived from, steps into the first
//! open unvisited neighbour and backtracks toward the recorded predecessor
//! once a cell is exhausted. The host applies every returned move to the
//! game's start cell before calling again.

use log::debug;
use maze_bot_core::{direction_between, CellCoord, Direction, Game, GameMove, GridError};
use thiserror::Error;

/// Errors reported while deciding a move.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The grid model rejected an access.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The game no longer matches the geometry the session was sized for.
    #[error("session prepared for a {expected:?} grid was handed a {found:?} grid")]
    DimensionMismatch {
        /// Dimensions captured by the session as `(rows, columns)`.
        expected: (u32, u32),
        /// Dimensions of the offending game as `(rows, columns)`.
        found: (u32, u32),
    },
    /// The bot already stands on the end cell.
    #[error("bot already stands on the end cell {cell}")]
    AlreadySolved {
        /// Cell shared by start and end.
        cell: CellCoord,
    },
    /// Every cell reachable from the origin was explored without reaching the end.
    #[error("search exhausted every cell reachable from the origin {origin}")]
    Exhausted {
        /// Cell the attempt started from.
        origin: CellCoord,
    },
    /// The recorded predecessor is not adjacent to the current cell.
    #[error("predecessor {predecessor} of {cell} is not adjacent")]
    InconsistentSession {
        /// Cell the bot occupies.
        cell: CellCoord,
        /// Predecessor recorded for that cell.
        predecessor: CellCoord,
    },
}

/// Depth-first navigator holding the state of one solving attempt.
#[derive(Debug, Default)]
pub struct Navigator {
    session: Session,
}

impl Navigator {
    /// Creates a navigator ready for its first attempt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all state of the current attempt.
    ///
    /// Hosts call this once before the first move of every new attempt. The
    /// session is sized to the game handed to the next [`Navigator::decide_move`].
    pub fn reset(&mut self) {
        self.session.clear();
    }

    /// Decides the next move for the bot standing on `game.start()`.
    pub fn decide_move(&mut self, game: &Game) -> Result<GameMove, NavigationError> {
        let current = game.start();
        let current_index = game.index_of(current)?;
        if current == game.end() {
            return Err(NavigationError::AlreadySolved { cell: current });
        }

        self.session.prepare(game.dimensions(), game.cell_count())?;
        if self.session.origin.is_none() {
            self.session.origin = Some(current);
        }
        self.session.visited[current_index] = true;

        for direction in Direction::SCAN_ORDER {
            let Some(next) = game.neighbor(current, direction) else {
                continue;
            };
            let next_index = game.index_of(next)?;
            if self.session.visited[next_index] {
                continue;
            }
            if !game.is_passable(current, direction)? {
                continue;
            }

            self.session.predecessor[next_index] = Some(current);
            debug!("advancing {current} -> {next} ({direction:?})");
            return Ok(GameMove::step(direction));
        }

        let Some(predecessor) = self.session.predecessor[current_index] else {
            return Err(NavigationError::Exhausted {
                origin: self.session.origin.unwrap_or(current),
            });
        };
        let direction = direction_between(current, predecessor).ok_or(
            NavigationError::InconsistentSession {
                cell: current,
                predecessor,
            },
        )?;

        debug!("backtracking {current} -> {predecessor} ({direction:?})");
        Ok(GameMove::step(direction))
    }

    /// Reports whether the current attempt already reached the cell.
    #[must_use]
    pub fn visited(&self, game: &Game, cell: CellCoord) -> bool {
        game.index_of(cell)
            .ok()
            .and_then(|index| self.session.visited.get(index).copied())
            .unwrap_or(false)
    }

    /// Cell the current attempt first entered `cell` from.
    #[must_use]
    pub fn predecessor(&self, game: &Game, cell: CellCoord) -> Option<CellCoord> {
        game.index_of(cell)
            .ok()
            .and_then(|index| self.session.predecessor.get(index).copied().flatten())
    }
}

#[derive(Debug, Default)]
struct Session {
    dimensions: Option<(u32, u32)>,
    origin: Option<CellCoord>,
    visited: Vec<bool>,
    predecessor: Vec<Option<CellCoord>>,
}

impl Session {
    fn clear(&mut self) {
        self.dimensions = None;
        self.origin = None;
        self.visited.clear();
        self.predecessor.clear();
    }

    fn prepare(&mut self, dimensions: (u32, u32), cell_count: usize) -> Result<(), NavigationError> {
        match self.dimensions {
            Some(expected) if expected != dimensions => Err(NavigationError::DimensionMismatch {
                expected,
                found: dimensions,
            }),
            Some(_) => Ok(()),
            None => {
                self.dimensions = Some(dimensions);
                self.visited = vec![false; cell_count];
                self.predecessor = vec![None; cell_count];
                Ok(())
            }
        }
    }
}

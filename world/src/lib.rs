#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative host-side state of a single maze-solving attempt.
//!
//! The world owns the evolving [`Game`]: bots never mutate it directly.
//! Their moves arrive as [`Command`] values, are validated against the wall
//! layout and are reported back as [`Event`] values.

use log::{debug, warn};
use maze_bot_core::{CellCoord, Command, Event, Game, GameMove, MoveRejection};

/// Represents the authoritative state of one attempt.
#[derive(Debug)]
pub struct World {
    game: Game,
    moves: u64,
    solved: bool,
}

impl World {
    /// Creates a world that starts an attempt on the provided game.
    #[must_use]
    pub fn new(game: Game) -> Self {
        let solved = game.start() == game.end();
        Self {
            game,
            moves: 0,
            solved,
        }
    }

    fn step(&mut self, movement: GameMove, out_events: &mut Vec<Event>) {
        let from = self.game.start();

        if self.solved {
            reject(from, movement, MoveRejection::AlreadySolved, out_events);
            return;
        }

        let Some(direction) = movement.direction() else {
            reject(from, movement, MoveRejection::ItemInteraction, out_events);
            return;
        };

        let passable = self.game.is_passable(from, direction).unwrap_or(false);
        let Some(to) = self.game.neighbor(from, direction).filter(|_| passable) else {
            reject(from, movement, MoveRejection::Blocked, out_events);
            return;
        };

        if self.game.set_start(to).is_err() {
            reject(from, movement, MoveRejection::Blocked, out_events);
            return;
        }

        self.moves = self.moves.saturating_add(1);
        out_events.push(Event::BotMoved {
            from,
            to,
            direction,
        });

        if to == self.game.end() {
            self.solved = true;
            debug!("goal {to} reached after {} moves", self.moves);
            out_events.push(Event::GoalReached {
                cell: to,
                moves: self.moves,
            });
        }
    }
}

fn reject(
    from: CellCoord,
    movement: GameMove,
    reason: MoveRejection,
    out_events: &mut Vec<Event>,
) {
    warn!("rejected {} move at {from}: {reason:?}", movement.kind().as_str());
    out_events.push(Event::MoveRejected {
        from,
        movement,
        reason,
    });
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadMaze { game } => {
            *world = World::new(game);
            out_events.push(Event::MazeLoaded {
                start: world.game.start(),
                end: world.game.end(),
            });
        }
        Command::ApplyMove { movement } => world.step(movement, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use maze_bot_core::{CellCoord, Game};

    /// Snapshot handed to the bot when it decides its next move.
    #[must_use]
    pub fn game(world: &World) -> &Game {
        &world.game
    }

    /// Cell the bot currently occupies.
    #[must_use]
    pub fn position(world: &World) -> CellCoord {
        world.game.start()
    }

    /// Cell the bot must reach.
    #[must_use]
    pub fn goal(world: &World) -> CellCoord {
        world.game.end()
    }

    /// Reports whether the bot reached the goal.
    #[must_use]
    pub fn is_solved(world: &World) -> bool {
        world.solved
    }

    /// Number of moves the world accepted during the attempt.
    #[must_use]
    pub fn moves_taken(world: &World) -> u64 {
        world.moves
    }
}

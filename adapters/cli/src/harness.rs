//! Runs one solving attempt of the navigator against the world.

use std::collections::HashSet;

use log::debug;
use maze_bot_core::{CellCoord, Command, Event, Game};
use maze_bot_system_navigation::{NavigationError, Navigator};
use maze_bot_world::{self as world, query, World};

/// Result of a single attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AttemptOutcome {
    /// Indicates whether the bot reached the end cell.
    pub(crate) solved: bool,
    /// Moves accepted by the world.
    pub(crate) moves: u64,
    /// Cells occupied by the bot in visiting order, origin included.
    pub(crate) trail: Vec<CellCoord>,
}

impl AttemptOutcome {
    /// Number of distinct cells the bot stood on.
    pub(crate) fn visited_cells(&self) -> usize {
        self.trail.iter().collect::<HashSet<_>>().len()
    }
}

/// Move cap applied when the caller does not provide one.
pub(crate) fn default_move_cap(game: &Game) -> u64 {
    2 * u64::try_from(game.cell_count()).unwrap_or(u64::MAX / 2)
}

/// Resets the navigator and feeds its moves through the world until the bot
/// reaches the end or `cap` moves were requested.
pub(crate) fn run_attempt(
    game: Game,
    navigator: &mut Navigator,
    cap: u64,
) -> Result<AttemptOutcome, NavigationError> {
    let mut world = World::new(game);
    let mut trail = vec![query::position(&world)];
    let mut events = Vec::new();
    let mut requested = 0;

    navigator.reset();

    while !query::is_solved(&world) && requested < cap {
        let movement = navigator.decide_move(query::game(&world))?;
        requested += 1;

        events.clear();
        world::apply(&mut world, Command::ApplyMove { movement }, &mut events);
        for event in &events {
            if let Event::BotMoved { to, .. } = event {
                trail.push(*to);
            }
        }
    }

    debug!(
        "attempt finished after {requested} requests, solved: {}",
        query::is_solved(&world)
    );

    Ok(AttemptOutcome {
        solved: query::is_solved(&world),
        moves: query::moves_taken(&world),
        trail,
    })
}

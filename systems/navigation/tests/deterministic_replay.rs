use maze_bot_core::{CellCoord, Command, Event, Game};
use maze_bot_system_maze_generation::MazeGenerator;
use maze_bot_system_navigation::Navigator;
use maze_bot_world::{self as world, query, World};

#[test]
fn deterministic_replay_produces_identical_attempts() {
    for seed in [5, 99, 0x42f0_e1eb_d4a5_3c21] {
        let first = replay(seed);
        let second = replay(seed);

        assert_eq!(first, second, "replay diverged for seed {seed:#x}");
        assert!(first.solved, "seed {seed:#x} left the maze unsolved");
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ReplayOutcome {
    start: CellCoord,
    end: CellCoord,
    events: Vec<Event>,
    solved: bool,
}

fn replay(seed: u64) -> ReplayOutcome {
    let game = MazeGenerator::new(seed)
        .generate(Game::new(12, 9).expect("valid dimensions"))
        .expect("maze");
    let start = game.start();
    let end = game.end();
    let cap = 2 * game.cell_count();

    let mut world = World::new(game);
    let mut navigator = Navigator::new();
    navigator.reset();
    let mut log = Vec::new();

    for _ in 0..cap {
        if query::is_solved(&world) {
            break;
        }
        let movement = navigator
            .decide_move(query::game(&world))
            .expect("move");
        world::apply(&mut world, Command::ApplyMove { movement }, &mut log);
    }

    ReplayOutcome {
        start,
        end,
        events: log,
        solved: query::is_solved(&world),
    }
}

//! Plain-text rendering of a maze and the cells a bot visited.

use std::collections::HashSet;

use maze_bot_core::{CellCoord, Game};

/// Draws the maze with `S` and `E` markers and `.` for visited cells.
pub(crate) fn render(game: &Game, trail: &[CellCoord]) -> String {
    let visited: HashSet<CellCoord> = trail.iter().copied().collect();
    let (rows, columns) = game.dimensions();
    let mut out = String::new();

    out.push('+');
    for _ in 0..columns {
        out.push_str("---+");
    }
    out.push('\n');

    for row in 0..rows {
        out.push('|');
        for column in 0..columns {
            let cell = CellCoord::new(row, column);
            let marker = if cell == game.start() {
                'S'
            } else if cell == game.end() {
                'E'
            } else if visited.contains(&cell) {
                '.'
            } else {
                ' '
            };
            out.push(' ');
            out.push(marker);
            out.push(' ');

            let closed = column + 1 == columns || game.vertical_wall(row, column).unwrap_or(true);
            out.push(if closed { '|' } else { ' ' });
        }
        out.push('\n');

        out.push('+');
        for column in 0..columns {
            let closed = row + 1 == rows || game.horizontal_wall(row, column).unwrap_or(true);
            out.push_str(if closed { "---+" } else { "   +" });
        }
        out.push('\n');
    }

    out
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze bot workspace.
//!
//! This crate defines the grid model handed across the bot boundary and the
//! message surface that connects the harness with the authoritative world.
//! The harness submits [`Command`] values describing desired mutations, the
//! world executes those commands via its `apply` entry point, and then
//! broadcasts [`Event`] values describing what happened. Systems such as the
//! maze generator and the navigator consume [`Game`] snapshots and respond
//! with new games or [`GameMove`] decisions.

use std::{collections::VecDeque, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the active game and restarts the attempt.
    LoadMaze {
        /// Game that becomes authoritative for the new attempt.
        game: Game,
    },
    /// Requests that the bot perform the provided move.
    ApplyMove {
        /// Move chosen by the bot for its current cell.
        movement: GameMove,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a new game became active.
    MazeLoaded {
        /// Cell the bot starts from.
        start: CellCoord,
        /// Cell the bot must reach.
        end: CellCoord,
    },
    /// Confirms that the bot moved between two cells.
    BotMoved {
        /// Cell the bot occupied before moving.
        from: CellCoord,
        /// Cell the bot occupies after completing the move.
        to: CellCoord,
        /// Direction of travel.
        direction: Direction,
    },
    /// Reports that a move request was rejected.
    MoveRejected {
        /// Cell the bot occupied when the move was requested.
        from: CellCoord,
        /// Move that was rejected.
        movement: GameMove,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
    /// Announces that the bot reached the end cell.
    GoalReached {
        /// Cell that terminated the attempt.
        cell: CellCoord,
        /// Number of accepted moves the attempt required.
        moves: u64,
    },
}

/// Reasons a move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// A closed wall edge or the outer boundary separates the bot from the target.
    Blocked,
    /// Item interaction is not supported by the world.
    ItemInteraction,
    /// The attempt already reached its end cell.
    AlreadySolved,
}

/// Location of a single grid cell expressed as row and column coordinates.
///
/// Rows grow downward and columns grow to the right, so `(0, 0)` is the
/// upper-left cell of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Cardinal directions connecting orthogonally adjacent cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Fixed neighbour scan order shared by the generator and the navigator.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    /// Direction pointing back toward the cell this direction came from.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Determines the direction that leads from `from` to an orthogonally adjacent `to`.
#[must_use]
pub fn direction_between(from: CellCoord, to: CellCoord) -> Option<Direction> {
    let row_delta = i64::from(to.row()) - i64::from(from.row());
    let column_delta = i64::from(to.column()) - i64::from(from.column());

    match (row_delta, column_delta) {
        (-1, 0) => Some(Direction::Up),
        (1, 0) => Some(Direction::Down),
        (0, -1) => Some(Direction::Left),
        (0, 1) => Some(Direction::Right),
        _ => None,
    }
}

/// Kind of move a bot may request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Step one row up.
    Up,
    /// Step one row down.
    Down,
    /// Step one column left.
    Left,
    /// Step one column right.
    Right,
    /// Interact with the item in the current cell.
    Item,
}

impl MoveKind {
    /// Name of the move type as exchanged across the bot boundary.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Item => "Item",
        }
    }

    /// Direction travelled by a step move, or `None` for item interaction.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::Item => None,
        }
    }
}

impl From<Direction> for MoveKind {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }
}

/// Single move decision returned by a bot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameMove {
    kind: MoveKind,
    item_name: String,
}

impl GameMove {
    /// Creates a move that steps in the provided direction.
    #[must_use]
    pub fn step(direction: Direction) -> Self {
        Self {
            kind: MoveKind::from(direction),
            item_name: String::new(),
        }
    }

    /// Creates an item interaction move naming the item.
    #[must_use]
    pub fn item(name: impl Into<String>) -> Self {
        Self {
            kind: MoveKind::Item,
            item_name: name.into(),
        }
    }

    /// Kind of move requested.
    #[must_use]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Item targeted by an item move. Empty for step moves.
    #[must_use]
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Direction travelled by a step move.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        self.kind.direction()
    }
}

/// Rule set accompanying a game.
///
/// The item fields are carried for the boundary only. No algorithm in this
/// workspace consults `min_item_count`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRule {
    /// Walls supplied with the game must not be changed by the generator.
    pub predetermined_walls: bool,
    /// Items supplied with the game must not be changed by the generator.
    pub predetermined_items: bool,
    /// Start and end cells supplied with the game must not be changed by the generator.
    pub predetermined_positions: bool,
    /// Minimum number of items a valid maze carries.
    pub min_item_count: u32,
}

/// Wall matrix addressed by a wall accessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallAxis {
    /// Walls between `(r, c)` and `(r, c + 1)`.
    Vertical,
    /// Walls between `(r, c)` and `(r + 1, c)`.
    Horizontal,
}

impl fmt::Display for WallAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// Contract violations reported by the grid model.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// A grid needs at least one row and one column.
    #[error("grid dimensions {rows}x{columns} must both be non-zero")]
    EmptyDimensions {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
    },
    /// The provided cell lies outside the grid.
    #[error("cell {cell} lies outside the {rows}x{columns} grid")]
    CellOutOfBounds {
        /// Offending cell.
        cell: CellCoord,
        /// Row count of the grid.
        rows: u32,
        /// Column count of the grid.
        columns: u32,
    },
    /// The provided wall index lies outside its wall matrix.
    #[error("{axis} wall ({row}, {column}) lies outside the wall matrix")]
    WallOutOfBounds {
        /// Matrix that was addressed.
        axis: WallAxis,
        /// Requested row index.
        row: u32,
        /// Requested column index.
        column: u32,
    },
    /// A marshaled matrix does not match the grid dimensions.
    #[error("{field} holds {found} entries but a {rows}x{columns} grid needs {expected}")]
    MalformedLayout {
        /// Name of the offending matrix.
        field: &'static str,
        /// Row count of the grid.
        rows: u32,
        /// Column count of the grid.
        columns: u32,
        /// Entries the matrix must hold.
        expected: usize,
        /// Entries the matrix actually holds.
        found: usize,
    },
    /// The edge leads off the grid and has no wall entry.
    #[error("cell {cell} has no neighbour toward {direction:?}")]
    BoundaryEdge {
        /// Cell the edge starts from.
        cell: CellCoord,
        /// Direction that leaves the grid.
        direction: Direction,
    },
}

/// Grid model describing the maze handed to and produced by a bot.
///
/// Wall matrices are stored densely in row-major order. A `true` wall bit
/// means the two adjacent cells are separated. Deserialised games are
/// checked against the same invariants [`Game::new`] establishes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGame")]
pub struct Game {
    rows: u32,
    columns: u32,
    vertical_walls: Vec<bool>,
    horizontal_walls: Vec<bool>,
    item_board: Vec<String>,
    start: CellCoord,
    end: CellCoord,
    item_types: Vec<String>,
    rule: GameRule,
}

impl Game {
    /// Creates a game with every passage open and no items.
    ///
    /// The start cell defaults to the upper-left corner and the end cell to
    /// the lower-right corner.
    pub fn new(rows: u32, columns: u32) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::EmptyDimensions { rows, columns });
        }

        let rows_usize = to_usize(rows);
        let columns_usize = to_usize(columns);

        Ok(Self {
            rows,
            columns,
            vertical_walls: vec![false; rows_usize * (columns_usize - 1)],
            horizontal_walls: vec![false; (rows_usize - 1) * columns_usize],
            item_board: vec![String::new(); rows_usize * columns_usize],
            start: CellCoord::new(0, 0),
            end: CellCoord::new(rows - 1, columns - 1),
            item_types: Vec::new(),
            rule: GameRule::default(),
        })
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Dimensions of the grid as `(rows, columns)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        to_usize(self.rows) * to_usize(self.columns)
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Dense row-major index of the cell.
    pub fn index_of(&self, cell: CellCoord) -> Result<usize, GridError> {
        self.ensure_contains(cell)?;
        Ok(to_usize(cell.row()) * to_usize(self.columns) + to_usize(cell.column()))
    }

    /// Iterator over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| CellCoord::new(row, column)))
    }

    /// Cell the bot currently occupies.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Moves the bot to the provided cell.
    pub fn set_start(&mut self, cell: CellCoord) -> Result<(), GridError> {
        self.ensure_contains(cell)?;
        self.start = cell;
        Ok(())
    }

    /// Cell the bot must reach.
    #[must_use]
    pub const fn end(&self) -> CellCoord {
        self.end
    }

    /// Relocates the end cell.
    pub fn set_end(&mut self, cell: CellCoord) -> Result<(), GridError> {
        self.ensure_contains(cell)?;
        self.end = cell;
        Ok(())
    }

    /// Reports whether a wall separates `(row, column)` from `(row, column + 1)`.
    pub fn vertical_wall(&self, row: u32, column: u32) -> Result<bool, GridError> {
        let index = self.wall_index(WallAxis::Vertical, row, column)?;
        Ok(self.vertical_walls[index])
    }

    /// Closes or opens the wall between `(row, column)` and `(row, column + 1)`.
    pub fn set_vertical_wall(&mut self, row: u32, column: u32, wall: bool) -> Result<(), GridError> {
        let index = self.wall_index(WallAxis::Vertical, row, column)?;
        self.vertical_walls[index] = wall;
        Ok(())
    }

    /// Reports whether a wall separates `(row, column)` from `(row + 1, column)`.
    pub fn horizontal_wall(&self, row: u32, column: u32) -> Result<bool, GridError> {
        let index = self.wall_index(WallAxis::Horizontal, row, column)?;
        Ok(self.horizontal_walls[index])
    }

    /// Closes or opens the wall between `(row, column)` and `(row + 1, column)`.
    pub fn set_horizontal_wall(
        &mut self,
        row: u32,
        column: u32,
        wall: bool,
    ) -> Result<(), GridError> {
        let index = self.wall_index(WallAxis::Horizontal, row, column)?;
        self.horizontal_walls[index] = wall;
        Ok(())
    }

    /// Item label stored in the cell. Empty when the cell holds no item.
    pub fn item(&self, cell: CellCoord) -> Result<&str, GridError> {
        let index = self.index_of(cell)?;
        Ok(&self.item_board[index])
    }

    /// Stores an item label in the cell.
    pub fn set_item(&mut self, cell: CellCoord, item: impl Into<String>) -> Result<(), GridError> {
        let index = self.index_of(cell)?;
        self.item_board[index] = item.into();
        Ok(())
    }

    /// Known item labels in registration order.
    #[must_use]
    pub fn item_types(&self) -> &[String] {
        &self.item_types
    }

    /// Registers an item label. Labels that are already known are ignored.
    pub fn add_item_type(&mut self, item: impl Into<String>) {
        let item = item.into();
        if !self.item_types.contains(&item) {
            self.item_types.push(item);
        }
    }

    /// Rule set attached to the game.
    #[must_use]
    pub const fn rule(&self) -> &GameRule {
        &self.rule
    }

    /// Replaces the rule set attached to the game.
    pub fn set_rule(&mut self, rule: GameRule) {
        self.rule = rule;
    }

    /// Cell adjacent to `cell` in the provided direction, if it lies within the grid.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        let neighbor = match direction {
            Direction::Up => CellCoord::new(cell.row().checked_sub(1)?, cell.column()),
            Direction::Down => CellCoord::new(cell.row().checked_add(1)?, cell.column()),
            Direction::Left => CellCoord::new(cell.row(), cell.column().checked_sub(1)?),
            Direction::Right => CellCoord::new(cell.row(), cell.column().checked_add(1)?),
        };

        self.contains(neighbor).then_some(neighbor)
    }

    /// Reports whether the bot may step from `cell` in the provided direction.
    ///
    /// Steps that would leave the grid are never passable.
    pub fn is_passable(&self, cell: CellCoord, direction: Direction) -> Result<bool, GridError> {
        self.ensure_contains(cell)?;
        match self.edge(cell, direction) {
            Some((axis, row, column)) => Ok(!self.wall_bit(axis, row, column)?),
            None => Ok(false),
        }
    }

    /// Opens or closes the edge between `cell` and its neighbour in `direction`.
    pub fn set_passage(
        &mut self,
        cell: CellCoord,
        direction: Direction,
        open: bool,
    ) -> Result<(), GridError> {
        self.ensure_contains(cell)?;
        let (axis, row, column) = self
            .edge(cell, direction)
            .ok_or(GridError::BoundaryEdge { cell, direction })?;
        match axis {
            WallAxis::Vertical => self.set_vertical_wall(row, column, !open),
            WallAxis::Horizontal => self.set_horizontal_wall(row, column, !open),
        }
    }

    /// Closes every wall edge of the grid.
    pub fn close_all_walls(&mut self) {
        self.vertical_walls.fill(true);
        self.horizontal_walls.fill(true);
    }

    /// Number of interior edges that permit passage.
    #[must_use]
    pub fn open_passage_count(&self) -> usize {
        self.vertical_walls
            .iter()
            .chain(self.horizontal_walls.iter())
            .filter(|wall| !**wall)
            .count()
    }

    /// Counts the cells connected to `from` through open edges, `from` included.
    pub fn reachable_cells(&self, from: CellCoord) -> Result<usize, GridError> {
        let origin = self.index_of(from)?;
        let mut reached = vec![false; self.cell_count()];
        let mut queue = VecDeque::new();
        reached[origin] = true;
        queue.push_back(from);
        let mut count = 1;

        while let Some(cell) = queue.pop_front() {
            for direction in Direction::SCAN_ORDER {
                if !self.is_passable(cell, direction)? {
                    continue;
                }
                let Some(neighbor) = self.neighbor(cell, direction) else {
                    continue;
                };
                let index = self.index_of(neighbor)?;
                if reached[index] {
                    continue;
                }
                reached[index] = true;
                count += 1;
                queue.push_back(neighbor);
            }
        }

        Ok(count)
    }

    fn ensure_contains(&self, cell: CellCoord) -> Result<(), GridError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(GridError::CellOutOfBounds {
                cell,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    fn edge(&self, cell: CellCoord, direction: Direction) -> Option<(WallAxis, u32, u32)> {
        let neighbor = self.neighbor(cell, direction)?;
        let edge = match direction {
            Direction::Up => (WallAxis::Horizontal, neighbor.row(), neighbor.column()),
            Direction::Down => (WallAxis::Horizontal, cell.row(), cell.column()),
            Direction::Left => (WallAxis::Vertical, neighbor.row(), neighbor.column()),
            Direction::Right => (WallAxis::Vertical, cell.row(), cell.column()),
        };
        Some(edge)
    }

    fn wall_bit(&self, axis: WallAxis, row: u32, column: u32) -> Result<bool, GridError> {
        match axis {
            WallAxis::Vertical => self.vertical_wall(row, column),
            WallAxis::Horizontal => self.horizontal_wall(row, column),
        }
    }

    fn wall_index(&self, axis: WallAxis, row: u32, column: u32) -> Result<usize, GridError> {
        let (wall_rows, wall_columns) = match axis {
            WallAxis::Vertical => (self.rows, self.columns - 1),
            WallAxis::Horizontal => (self.rows - 1, self.columns),
        };

        if row >= wall_rows || column >= wall_columns {
            return Err(GridError::WallOutOfBounds { axis, row, column });
        }

        Ok(to_usize(row) * to_usize(wall_columns) + to_usize(column))
    }
}

/// Unchecked wire form of [`Game`].
#[derive(Deserialize)]
struct RawGame {
    rows: u32,
    columns: u32,
    vertical_walls: Vec<bool>,
    horizontal_walls: Vec<bool>,
    item_board: Vec<String>,
    start: CellCoord,
    end: CellCoord,
    item_types: Vec<String>,
    rule: GameRule,
}

impl TryFrom<RawGame> for Game {
    type Error = GridError;

    fn try_from(raw: RawGame) -> Result<Self, Self::Error> {
        let (rows, columns) = (raw.rows, raw.columns);
        if rows == 0 || columns == 0 {
            return Err(GridError::EmptyDimensions { rows, columns });
        }

        let rows_usize = to_usize(rows);
        let columns_usize = to_usize(columns);
        let layout = [
            ("vertical_walls", rows_usize.checked_mul(columns_usize - 1), raw.vertical_walls.len()),
            ("horizontal_walls", (rows_usize - 1).checked_mul(columns_usize), raw.horizontal_walls.len()),
            ("item_board", rows_usize.checked_mul(columns_usize), raw.item_board.len()),
        ];
        for (field, expected, found) in layout {
            check_len(field, rows, columns, expected.unwrap_or(usize::MAX), found)?;
        }

        let game = Self {
            rows,
            columns,
            vertical_walls: raw.vertical_walls,
            horizontal_walls: raw.horizontal_walls,
            item_board: raw.item_board,
            start: raw.start,
            end: raw.end,
            item_types: raw.item_types,
            rule: raw.rule,
        };
        game.ensure_contains(game.start)?;
        game.ensure_contains(game.end)?;
        Ok(game)
    }
}

fn check_len(
    field: &'static str,
    rows: u32,
    columns: u32,
    expected: usize,
    found: usize,
) -> Result<(), GridError> {
    if expected == found {
        Ok(())
    } else {
        Err(GridError::MalformedLayout {
            field,
            rows,
            columns,
            expected,
            found,
        })
    }
}

fn to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{
        direction_between, CellCoord, Direction, Game, GameMove, GameRule, GridError, MoveKind,
        WallAxis,
    };

    #[test]
    fn new_game_matches_construction_contract() {
        let game = Game::new(3, 4).expect("valid dimensions");

        assert_eq!(game.dimensions(), (3, 4));
        assert_eq!(game.start(), CellCoord::new(0, 0));
        assert_eq!(game.end(), CellCoord::new(2, 3));
        assert_eq!(game.open_passage_count(), 3 * 3 + 2 * 4);
        assert_eq!(game.item(CellCoord::new(2, 3)), Ok(""));
        assert_eq!(game.rule(), &GameRule::default());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Game::new(0, 4),
            Err(GridError::EmptyDimensions { rows: 0, columns: 4 })
        );
        assert!(Game::new(4, 0).is_err());
    }

    #[test]
    fn out_of_range_accessors_fail_fast() {
        let mut game = Game::new(2, 3).expect("valid dimensions");

        assert_eq!(
            game.set_start(CellCoord::new(2, 0)),
            Err(GridError::CellOutOfBounds {
                cell: CellCoord::new(2, 0),
                rows: 2,
                columns: 3,
            })
        );
        assert_eq!(
            game.vertical_wall(0, 2),
            Err(GridError::WallOutOfBounds {
                axis: WallAxis::Vertical,
                row: 0,
                column: 2,
            })
        );
        assert!(game.horizontal_wall(1, 0).is_err());
        assert!(game.set_item(CellCoord::new(0, 3), "key").is_err());
        assert_eq!(game.start(), CellCoord::new(0, 0));
    }

    #[test]
    fn passages_map_onto_wall_matrices() {
        let mut game = Game::new(2, 2).expect("valid dimensions");
        game.close_all_walls();
        assert_eq!(game.open_passage_count(), 0);

        game.set_passage(CellCoord::new(0, 1), Direction::Left, true)
            .expect("interior edge");
        assert_eq!(game.vertical_wall(0, 0), Ok(false));
        assert_eq!(game.is_passable(CellCoord::new(0, 0), Direction::Right), Ok(true));

        game.set_passage(CellCoord::new(0, 0), Direction::Down, true)
            .expect("interior edge");
        assert_eq!(game.horizontal_wall(0, 0), Ok(false));
        assert_eq!(game.is_passable(CellCoord::new(1, 0), Direction::Up), Ok(true));
        assert_eq!(game.is_passable(CellCoord::new(1, 0), Direction::Right), Ok(false));
        assert_eq!(game.open_passage_count(), 2);
    }

    #[test]
    fn boundary_edges_are_never_passable() {
        let mut game = Game::new(2, 2).expect("valid dimensions");
        let corner = CellCoord::new(0, 0);

        assert_eq!(game.is_passable(corner, Direction::Up), Ok(false));
        assert_eq!(game.is_passable(corner, Direction::Left), Ok(false));
        assert_eq!(
            game.set_passage(corner, Direction::Up, true),
            Err(GridError::BoundaryEdge {
                cell: corner,
                direction: Direction::Up,
            })
        );
    }

    #[test]
    fn reachable_cells_follows_open_edges() {
        let mut game = Game::new(2, 3).expect("valid dimensions");
        assert_eq!(game.reachable_cells(CellCoord::new(1, 1)), Ok(6));

        game.close_all_walls();
        game.set_passage(CellCoord::new(0, 0), Direction::Right, true)
            .expect("interior edge");
        assert_eq!(game.reachable_cells(CellCoord::new(0, 1)), Ok(2));
        assert_eq!(game.reachable_cells(CellCoord::new(1, 2)), Ok(1));
    }

    #[test]
    fn item_types_ignore_duplicates() {
        let mut game = Game::new(1, 2).expect("valid dimensions");
        game.add_item_type("key");
        game.add_item_type("coin");
        game.add_item_type("key");

        assert_eq!(game.item_types(), ["key".to_owned(), "coin".to_owned()]);
    }

    #[test]
    fn direction_between_handles_adjacent_cells_only() {
        let origin = CellCoord::new(1, 1);
        assert_eq!(direction_between(origin, CellCoord::new(0, 1)), Some(Direction::Up));
        assert_eq!(direction_between(origin, CellCoord::new(2, 1)), Some(Direction::Down));
        assert_eq!(direction_between(origin, CellCoord::new(1, 0)), Some(Direction::Left));
        assert_eq!(direction_between(origin, CellCoord::new(1, 2)), Some(Direction::Right));
        assert_eq!(direction_between(origin, CellCoord::new(2, 2)), None);
        assert_eq!(direction_between(origin, origin), None);
    }

    #[test]
    fn game_survives_bincode() {
        let mut game = Game::new(2, 3).expect("valid dimensions");
        game.set_item(CellCoord::new(1, 2), "coin").expect("in range");
        game.add_item_type("coin");
        game.set_rule(GameRule {
            predetermined_items: true,
            min_item_count: 1,
            ..GameRule::default()
        });
        game.set_horizontal_wall(0, 1, true).expect("in range");

        let bytes = bincode::serialize(&game).expect("serialize");
        let restored: Game = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, game);
    }

    fn decode(game: &Game) -> Result<Game, bincode::Error> {
        let bytes = bincode::serialize(game).expect("serialize");
        bincode::deserialize(&bytes)
    }

    #[test]
    fn deserialising_rejects_truncated_wall_matrices() {
        let mut game = Game::new(3, 3).expect("valid dimensions");
        game.vertical_walls.clear();
        assert!(decode(&game).is_err());

        let mut game = Game::new(3, 3).expect("valid dimensions");
        game.horizontal_walls.push(true);
        assert!(decode(&game).is_err());

        let mut game = Game::new(3, 3).expect("valid dimensions");
        game.item_board.clear();
        assert!(decode(&game).is_err());
    }

    #[test]
    fn deserialising_rejects_zero_dimensions() {
        let mut game = Game::new(1, 1).expect("valid dimensions");
        game.rows = 0;
        game.item_board.clear();

        assert!(decode(&game).is_err());
    }

    #[test]
    fn deserialising_rejects_out_of_range_positions() {
        let mut game = Game::new(2, 2).expect("valid dimensions");
        game.start = CellCoord::new(5, 0);
        assert!(decode(&game).is_err());

        let mut game = Game::new(2, 2).expect("valid dimensions");
        game.end = CellCoord::new(0, 2);
        assert!(decode(&game).is_err());
    }

    #[test]
    fn malformed_layout_reports_the_offending_matrix() {
        let mut game = Game::new(3, 3).expect("valid dimensions");
        game.vertical_walls.clear();
        let bytes = bincode::serialize(&game).expect("serialize");
        let error = bincode::deserialize::<Game>(&bytes).expect_err("malformed game");
        assert!(error.to_string().contains("vertical_walls"), "{error}");

        assert_eq!(
            super::check_len("vertical_walls", 3, 3, 6, 0),
            Err(GridError::MalformedLayout {
                field: "vertical_walls",
                rows: 3,
                columns: 3,
                expected: 6,
                found: 0,
            })
        );
    }

    #[test]
    fn opposite_reverses_every_direction() {
        for direction in Direction::SCAN_ORDER {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }

        let from = CellCoord::new(1, 1);
        let to = CellCoord::new(1, 2);
        assert_eq!(
            direction_between(from, to).map(Direction::opposite),
            direction_between(to, from)
        );
    }

    #[test]
    fn game_moves_carry_kind_and_item_name() {
        let item = GameMove::item("key");
        assert_eq!(item.kind(), MoveKind::Item);
        assert_eq!(item.item_name(), "key");
        assert_eq!(item.direction(), None);

        let step = GameMove::step(Direction::Left);
        assert_eq!(step.kind().as_str(), "Left");
        assert_eq!(step.item_name(), "");
        assert_eq!(step.direction(), Some(Direction::Left));
    }
}

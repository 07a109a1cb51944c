//! Board model: positions, cells and the grid of a single player.

use alloc::vec::Vec;
use core::fmt;

use crate::config::BOARD_SIZE;
use crate::ship::{Orientation, Ship, ShipKind};

/// A 0-indexed (row, col) coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Returns `true` when the position lies inside the board.
    pub fn is_valid(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Position offset by (`d_row`, `d_col`), or `None` if it leaves the board.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let pos = Position { row, col };
        pos.is_valid().then_some(pos)
    }

    /// In-bounds orthogonal neighbours in up, down, left, right order.
    pub fn orthogonal_neighbors(self) -> Vec<Position> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(|(dr, dc)| self.offset(dr, dc))
            .collect()
    }

    /// In-bounds neighbours one step either way along `orientation`.
    pub fn inline_neighbors(self, orientation: Orientation) -> Vec<Position> {
        let deltas = match orientation {
            Orientation::Horizontal => [(0, -1), (0, 1)],
            Orientation::Vertical => [(-1, 0), (1, 0)],
        };
        deltas
            .into_iter()
            .filter_map(|(dr, dc)| self.offset(dr, dc))
            .collect()
    }
}

impl fmt::Display for Position {
    /// Formats as board notation, e.g. `A1` for (0, 0) and `J10` for (9, 9).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", (b'A' + self.col as u8) as char, self.row + 1)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Returns `true` when `pos` lies within `[0, BOARD_SIZE)` on both axes.
pub fn is_valid_position(pos: Position) -> bool {
    pos.is_valid()
}

/// The `size` positions a ship would occupy from `anchor`. Not bounds-checked.
///
/// Coordinates saturate at `usize::MAX`, which is always off the board.
pub fn ship_positions(anchor: Position, size: usize, orientation: Orientation) -> Vec<Position> {
    (0..size)
        .map(|i| match orientation {
            Orientation::Horizontal => Position::new(anchor.row, anchor.col.saturating_add(i)),
            Orientation::Vertical => Position::new(anchor.row.saturating_add(i), anchor.col),
        })
        .collect()
}

/// Up to eight orthogonal and diagonal neighbours of `pos`, clipped to the board.
pub fn adjacent_positions(pos: Position) -> Vec<Position> {
    let mut out = Vec::with_capacity(8);
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            if let Some(p) = pos.offset(dr, dc) {
                out.push(p);
            }
        }
    }
    out
}

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CellState {
    Empty,
    Ship,
    Hit,
    Miss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub state: CellState,
    /// Occupying ship. Never set on an attack-tracking board.
    pub ship: Option<ShipKind>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        state: CellState::Empty,
        ship: None,
    };

    /// Returns `true` once a shot has been resolved against this cell.
    pub fn is_attacked(&self) -> bool {
        matches!(self.state, CellState::Hit | CellState::Miss)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

/// An N×N grid plus the ships placed on it.
///
/// Used both as a player's own fleet board and as their attack-tracking board,
/// which only ever holds `Empty`, `Hit` and `Miss` cells.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    pub(crate) cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    pub(crate) ships: Vec<Ship>,
}

impl Board {
    /// Create an empty board (all cells empty, no ships).
    pub fn new() -> Self {
        Board {
            cells: [[Cell::EMPTY; BOARD_SIZE]; BOARD_SIZE],
            ships: Vec::new(),
        }
    }

    /// Cell at `pos`, or `None` if out of bounds.
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(pos.row).and_then(|row| row.get(pos.col))
    }

    pub(crate) fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.cells.get_mut(pos.row).and_then(|row| row.get_mut(pos.col))
    }

    /// Grid rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_SIZE]> {
        self.cells.iter()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, kind: ShipKind) -> Option<&Ship> {
        self.ships.iter().find(|s| s.kind() == kind)
    }

    pub(crate) fn ship_mut(&mut self, kind: ShipKind) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.kind() == kind)
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.state == state)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in self.cells.iter() {
            write!(f, "  ")?;
            for cell in row.iter() {
                let ch = match cell.state {
                    CellState::Empty => '.',
                    CellState::Ship => 'S',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  ships: {:?}", self.ships)?;
        write!(f, "}}")
    }
}

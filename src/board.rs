//! Game board representation and collision detection

use crate::tetromino::Shade;

/// Playable board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled with a shade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Shade),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [y][x], row 0 is the top, y increases downward
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
            return None;
        }
        Some((x, y))
    }

    /// Get the cell at (x, y). Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|(x, y)| self.cells[y][x])
    }

    /// Set a cell. Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some((x, y)) => {
                self.cells[y][x] = cell;
                true
            }
            None => false,
        }
    }

    /// True if the cell is inside the board and holds a locked block
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.is_filled())
    }

    /// True iff every cell is within bounds and unoccupied
    pub fn can_place(&self, cells: &[(i32, i32)]) -> bool {
        cells
            .iter()
            .all(|&(x, y)| matches!(self.get(x, y), Some(Cell::Empty)))
    }

    /// Mark cells as occupied. The caller is expected to have checked `can_place`
    pub fn lock(&mut self, cells: &[(i32, i32)], shade: Shade) {
        for &(x, y) in cells {
            self.set(x, y, Cell::Filled(shade));
        }
    }

    /// Indices of full rows, ascending (top to bottom)
    pub fn full_rows(&self) -> Vec<usize> {
        (0..BOARD_HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove the given rows in one compaction pass from the bottom up.
    /// Rows above each removed row drop by the number of removed rows below them.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }

        let mut write_row = BOARD_HEIGHT;
        for read_row in (0..BOARD_HEIGHT).rev() {
            if rows.contains(&read_row) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                self.cells[write_row] = self.cells[read_row];
            }
        }

        // Fill the top with empty rows
        for row in 0..write_row {
            self.cells[row] = [Cell::Empty; BOARD_WIDTH];
        }
    }

    fn is_row_full(&self, y: usize) -> bool {
        self.cells[y].iter().all(|cell| cell.is_filled())
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_filled()).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Cell; BOARD_WIDTH])> {
        self.cells.iter().enumerate()
    }
}

//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is `0` (empty) or the id `1..=7`
//! of the shape that landed there. Storage is column-major and row 0 is the
//! bottom row: `cells[col][row]`.

use arrayvec::ArrayVec;

use crate::types::{Cell, COLS, EMPTY, ROWS};

/// The game board - 10 columns x 20 rows, column-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; ROWS]; COLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[EMPTY; ROWS]; COLS],
        }
    }

    #[inline(always)]
    fn in_bounds(col: i32, row: i32) -> bool {
        col >= 0 && col < COLS as i32 && row >= 0 && row < ROWS as i32
    }

    /// Get cell at (col, row), `None` if out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        if !Self::in_bounds(col, row) {
            return None;
        }
        Some(self.cells[col as usize][row as usize])
    }

    /// Set cell at (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        if !Self::in_bounds(col, row) {
            return false;
        }
        self.cells[col as usize][row as usize] = cell;
        true
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        matches!(self.get(col, row), Some(c) if c != EMPTY)
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        self.cells.iter().all(|column| column[row] != EMPTY)
    }

    /// Check if a full row is made of a single shape id
    pub fn is_row_monochrome(&self, row: usize) -> bool {
        if !self.is_row_full(row) {
            return false;
        }
        let first = self.cells[0][row];
        self.cells.iter().all(|column| column[row] == first)
    }

    /// Indices of all full rows, bottom to top
    pub fn full_rows(&self) -> ArrayVec<usize, ROWS> {
        (0..ROWS).filter(|&row| self.is_row_full(row)).collect()
    }

    /// Remove a row, shifting every row above it down by one and emptying the
    /// top row. Returns false if the row is out of bounds.
    pub fn remove_row(&mut self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        for column in &mut self.cells {
            column.copy_within(row + 1..ROWS, row);
            column[ROWS - 1] = EMPTY;
        }
        true
    }

    /// Remove the given rows. Rows are processed from the highest index down
    /// so the remaining indices stay valid.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let mut sorted: ArrayVec<usize, ROWS> = rows.iter().copied().collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        for row in sorted {
            self.remove_row(row);
        }
    }

    /// True when every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c == EMPTY)
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c != EMPTY).count()
    }

    /// Get a reference to the column-major cell grid
    pub fn cells(&self) -> &[[Cell; ROWS]; COLS] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [[EMPTY; ROWS]; COLS];
    }

    /// Fill a row with one id in every column except `gaps`
    pub fn fill_row(&mut self, row: usize, cell: Cell, gaps: &[usize]) {
        if row >= ROWS {
            return;
        }
        for (col, column) in self.cells.iter_mut().enumerate() {
            column[row] = if gaps.contains(&col) { EMPTY } else { cell };
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

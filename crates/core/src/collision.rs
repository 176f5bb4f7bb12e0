//! Collision and placement - pure functions over a board and a piece

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{COLS, ROWS};

/// Outcome of locking a piece into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Every filled cell landed inside the board
    Placed,
    /// At least one filled cell was above the top row; the session is over
    Overflowed,
}

/// Check whether a piece may occupy its current position.
///
/// Cells above the top row are always legal, so a piece can spawn and fall
/// while partly hidden.
pub fn is_legal(board: &Board, piece: &Piece) -> bool {
    piece.cells().all(|(col, row, _)| {
        if col < 0 || col >= COLS as i32 || row < 0 {
            return false;
        }
        row >= ROWS as i32 || !board.is_occupied(col, row)
    })
}

/// Write a piece into the board.
///
/// Visible cells are always written; the result reports whether any cell was
/// left above the board.
pub fn place(board: &mut Board, piece: &Piece) -> Placement {
    let mut overflowed = false;
    for (col, row, id) in piece.cells() {
        if row < ROWS as i32 {
            board.set(col, row, id);
        } else {
            overflowed = true;
        }
    }
    if overflowed {
        Placement::Overflowed
    } else {
        Placement::Placed
    }
}

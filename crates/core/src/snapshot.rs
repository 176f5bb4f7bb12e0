use arrayvec::ArrayVec;
use serde::Serialize;

use crate::movement::Motion;
use crate::pieces::Piece;
use crate::types::{Cell, COLS, ROWS};

/// FNV-1a 64-bit hash of a column-major board
pub fn board_hash(board: &[[Cell; ROWS]; COLS]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in board.iter().flatten() {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

/// Read-only copy of everything a renderer or recorder needs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    /// Column-major, row 0 at the bottom
    pub board: [[Cell; ROWS]; COLS],
    pub board_hash: u64,
    pub current: Option<Piece>,
    pub next: Option<Piece>,
    /// Rows flashing before removal
    pub clearing_rows: ArrayVec<usize, ROWS>,
    /// The flashing rows were completed by a hard-dropped or freefalling piece
    pub clearing_after_drop: bool,
    pub motion: Motion,
    pub pending_drop_score: u32,
    pub tick: u64,
    pub score: u32,
    pub level: u8,
    pub lines: u32,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0; ROWS]; COLS];
        self.board_hash = board_hash(&self.board);
        self.current = None;
        self.next = None;
        self.clearing_rows.clear();
        self.clearing_after_drop = false;
        self.motion = Motion::Gravity;
        self.pending_drop_score = 0;
        self.tick = 0;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.started = false;
        self.paused = false;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0; ROWS]; COLS],
            board_hash: 0,
            current: None,
            next: None,
            clearing_rows: ArrayVec::new(),
            clearing_after_drop: false,
            motion: Motion::Gravity,
            pending_drop_score: 0,
            tick: 0,
            score: 0,
            level: 1,
            lines: 0,
            started: false,
            paused: false,
            game_over: false,
        };
        s.clear();
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let snap = GameSnapshot::default();
        assert!(snap.current.is_none());
        assert!(snap.next.is_none());
        assert_eq!(snap.score, 0);
        assert!(!snap.playable());
        assert_eq!(snap.board_hash, board_hash(&[[0; ROWS]; COLS]));
    }

    #[test]
    fn test_board_hash_sees_single_cell() {
        let empty = [[0; ROWS]; COLS];
        let mut one = empty;
        one[9][19] = 7;
        assert_ne!(board_hash(&empty), board_hash(&one));
    }
}

//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the engine. All
//! types are plain data with no behaviour beyond parsing and naming, so they
//! can be shared by the simulation, a renderer, or a sound collaborator.
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, bottom to top)
//! - **Spawn**: height 21, offset 3
//!
//! # Timing
//!
//! Everything is counted in fixed simulation ticks (60 per second):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICKS_PER_SECOND` | 60 | Fixed simulation rate |
//! | `ZIP_DELAY_TICKS` | 10 | Hold time before horizontal auto-repeat |
//! | `ZIP_RATE_TICKS` | 1 | Auto-repeat interval |
//! | `FREEFALL_RATE_TICKS` | 2 | Descent interval while the push key is held |
//! | `SLOW_MOVE_TICKS` | 15 | Lock-delay grace window |
//! | `CLEAR_ANIM_TICKS` | 10 | Row-clear flash delay |
//!
//! # Drop Speeds by Level
//!
//! | Level | Ticks per row |
//! |-------|---------------|
//! | 1 | 30 |
//! | 2 | 20 |
//! | 3 | 15 |
//! | 4 | 12 |
//! | 5 | 10 |
//! | 6 | 8 |
//! | 7 | 7 |
//! | 8 | 6 |
//! | 9 | 5 |
//! | 10 | 4 (3 on even heights) |
//!
//! # Examples
//!
//! ```
//! use tetris_max_types::{Key, SoundEvent, COLS, ROWS};
//!
//! assert_eq!(Key::from_str("hardDrop"), Some(Key::HardDrop));
//! assert_eq!(SoundEvent::Clear(4).as_str(), "clear4");
//! assert_eq!(COLS, 10);
//! assert_eq!(ROWS, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in columns
pub const COLS: usize = 10;

/// Board height in rows
pub const ROWS: usize = 20;

/// Side length of a piece grid
pub const PIECE_SIZE: usize = 4;

/// Number of piece templates
pub const SHAPE_COUNT: usize = 7;

/// Height assigned to a freshly spawned piece (row of its grid's row 0)
pub const SPAWN_HEIGHT: i32 = (ROWS + 4 - 3) as i32;

/// Column anchor assigned to a freshly spawned piece
pub const SPAWN_OFFSET: i32 = (COLS / 2) as i32 - 2;

/// Fixed simulation rate
pub const TICKS_PER_SECOND: u64 = 60;

/// Ticks a horizontal key must be held after its last move before zipping
pub const ZIP_DELAY_TICKS: u64 = 10;

/// Ticks between repeated moves while zipping
pub const ZIP_RATE_TICKS: u64 = 1;

/// Ticks between descents while the push key is held
pub const FREEFALL_RATE_TICKS: u64 = 2;

/// Lock-delay grace window
pub const SLOW_MOVE_TICKS: u64 = 15;

/// Length of the row-clear flash
pub const CLEAR_ANIM_TICKS: u64 = 10;

/// Lowest playable level
pub const MIN_LEVEL: u8 = 1;

/// Highest playable level
pub const MAX_LEVEL: u8 = 10;

/// Gravity interval in ticks, indexed by `level - 1`
pub const LEVEL_SPEED: [u64; MAX_LEVEL as usize] = [30, 20, 15, 12, 10, 8, 7, 6, 5, 4];

/// Lines needed to leave a level, indexed by `level - 1`
pub const LEVEL_THRESHOLD: [u32; MAX_LEVEL as usize] =
    [10, 20, 30, 40, 50, 60, 70, 80, 90, 32000];

/// Row-clear points indexed by rows cleared (no level multiplier)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 600, 1000];

/// Awarded when a resolution leaves the board empty
pub const BOARD_CLEAR_BONUS: u32 = 10_000;

/// Awarded when a cleared row is a single color
pub const MONOCHROME_BONUS: u32 = 2_500;

/// A board cell: `0` is empty, `1..=7` is the id of the shape that landed there.
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// The seven shape classes, in template order.
///
/// The discriminant is the piece's `color`; the board id it leaves behind is
/// `color + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Square,
    Line,
    J,
    L,
    S,
    Z,
    T,
}

impl Shape {
    /// All shapes in template (color) order
    pub const ALL: [Shape; SHAPE_COUNT] = [
        Shape::Square,
        Shape::Line,
        Shape::J,
        Shape::L,
        Shape::S,
        Shape::Z,
        Shape::T,
    ];

    /// Shape for a color index `0..=6`
    pub fn from_color(color: u8) -> Option<Self> {
        Self::ALL.get(color as usize).copied()
    }

    /// Template index `0..=6`
    pub fn color(self) -> u8 {
        self as u8
    }

    /// Id written into board cells, `1..=7`
    pub fn cell(self) -> Cell {
        self as u8 + 1
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Square => "square",
            Shape::Line => "line",
            Shape::J => "j",
            Shape::L => "l",
            Shape::S => "s",
            Shape::Z => "z",
            Shape::T => "t",
        }
    }
}

/// Logical keys the engine understands.
///
/// Physical key bindings belong to the host; the engine only sees these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Key {
    /// Rotate 90° clockwise
    RotateCw,
    /// Rotate 90° counter-clockwise
    RotateCcw,
    /// Step / zip left
    MoveLeft,
    /// Step / zip right
    MoveRight,
    /// Accelerated descent while held
    Freefall,
    /// Drop one row per tick until the piece locks
    HardDrop,
}

impl Key {
    /// Parse key from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_max_types::Key;
    ///
    /// assert_eq!(Key::from_str("moveLeft"), Some(Key::MoveLeft));
    /// assert_eq!(Key::from_str("ROTATECW"), Some(Key::RotateCw));
    /// assert_eq!(Key::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotatecw" => Some(Key::RotateCw),
            "rotateccw" => Some(Key::RotateCcw),
            "moveleft" => Some(Key::MoveLeft),
            "moveright" => Some(Key::MoveRight),
            "freefall" => Some(Key::Freefall),
            "harddrop" => Some(Key::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::RotateCw => "rotateCw",
            Key::RotateCcw => "rotateCcw",
            Key::MoveLeft => "moveLeft",
            Key::MoveRight => "moveRight",
            Key::Freefall => "freefall",
            Key::HardDrop => "hardDrop",
        }
    }
}

/// Horizontal direction of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta of one step
    pub fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Symbolic sound cue emitted by the engine and drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    /// A hard drop started
    Drop,
    /// A piece locked into the stack
    Stick,
    /// 1..=4 rows are about to clear
    Clear(u8),
    /// The board was cleared completely
    BigBonus,
    /// A single-color row was cleared
    SmallBonus,
    /// The level went up
    NewLevel,
    /// The session ended
    GameOver,
}

impl SoundEvent {
    /// Token a sound collaborator maps to an asset
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEvent::Drop => "drop",
            SoundEvent::Stick => "stick",
            SoundEvent::Clear(1) => "clear1",
            SoundEvent::Clear(2) => "clear2",
            SoundEvent::Clear(3) => "clear3",
            SoundEvent::Clear(_) => "clear4",
            SoundEvent::BigBonus => "bigBonus",
            SoundEvent::SmallBonus => "smallBonus",
            SoundEvent::NewLevel => "newLevel",
            SoundEvent::GameOver => "gameOver",
        }
    }
}

impl Serialize for SoundEvent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

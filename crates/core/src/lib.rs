//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation
//! logic. It has **zero dependencies** on rendering, audio, or I/O, making it:
//!
//! - **Deterministic**: Same seed and input trace produce identical games
//! - **Testable**: Every rule can be driven one tick at a time
//! - **Portable**: Hosts only feed elapsed time and keys, and read snapshots
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 column-major grid with row queries and compaction
//! - [`pieces`]: Shape templates and swap-cycle rotation
//! - [`collision`]: Legality test and placement
//! - [`rng`]: Uniform seeded next-piece selection
//! - [`scheduler`]: Fixed 60 Hz timestep accumulator
//! - [`movement`]: Gravity, freefall, grace, hard drop, and horizontal zip
//! - [`scoring`]: Flat line scores, bonuses, and level progression
//! - [`game_state`]: The session tying everything together
//! - [`snapshot`]: Read-only copies for renderers and recorders
//! - [`replay`]: Recorded input traces
//!
//! # Game Rules
//!
//! - **No wall kicks**: an illegal rotation is undone in place
//! - **No bag**: every next piece is an independent uniform pick
//! - **Lock delay**: a blocked gravity descent gets 15 ticks of grace
//! - **Freefall**: holding the push key descends one row per 2 ticks, 1 point per row
//! - **Hard drop**: one row per tick until blocked, 1 point per row
//! - **Scoring**: 100/300/600/1000 per clear at every level, +10000 for an
//!   empty board, +2500 for a single-color row
//!
//! # Example
//!
//! ```
//! use tetris_max_core::GameState;
//! use tetris_max_core::types::{Key, SoundEvent};
//!
//! let mut game = GameState::new(12345);
//! game.start(1);
//!
//! game.handle_key_down(Key::HardDrop);
//! game.tick(1000);
//!
//! let events = game.take_events();
//! assert_eq!(events[0], SoundEvent::Drop);
//! assert!(events.contains(&SoundEvent::Stick));
//! assert!(game.score() > 0); // hard-drop rows pay one point each
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Time is converted to whole 1/60 s ticks with exact
//! integer arithmetic, so the frame rate never changes the outcome.

pub mod board;
pub mod collision;
pub mod game_state;
pub mod movement;
pub mod pieces;
pub mod replay;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use tetris_max_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{is_legal, place, Placement};
pub use game_state::{GameState, Phase, RowClear};
pub use movement::{Motion, Movement, Shift};
pub use pieces::{rotate_clockwise, rotate_counter_clockwise, Piece, PieceGrid, TEMPLATES};
pub use replay::{Frame, InputTrace, ReplayOutcome};
pub use rng::{PieceGenerator, SimpleRng};
pub use scheduler::TickScheduler;
pub use scoring::{clear_award, drop_score, gravity_interval, line_clear_score, ClearAward};
pub use snapshot::{board_hash, GameSnapshot};

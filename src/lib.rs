//! Tetris Max (workspace facade crate).
//!
//! The engine lives in dedicated crates under `crates/`; this package
//! re-exports them as `tetris_max::{core,types,highscores}` and adds the
//! pieces the headless binary needs: run configuration, a stderr logger, and
//! a scripted autoplay driver.

pub use tetris_max_core as core;
pub use tetris_max_highscores as highscores;
pub use tetris_max_types as types;

pub mod autoplay;
pub mod config;
pub mod logging;

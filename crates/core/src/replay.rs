//! Input traces - recorded (elapsed time, key) sequences
//!
//! A trace is a list of frames. Each frame feeds its key-downs, then its
//! key-ups, then its elapsed time to a session. Feeding the same trace to two
//! sessions started with the same seed and level gives identical games.
//!
//! ```json
//! {
//!   "seed": 7,
//!   "level": 1,
//!   "frames": [
//!     { "delta_ms": 16, "down": ["moveLeft"] },
//!     { "delta_ms": 200, "up": ["moveLeft"] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::types::{Key, SoundEvent, MIN_LEVEL};

/// One host frame of input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Milliseconds since the previous frame
    #[serde(default)]
    pub delta_ms: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub down: Vec<Key>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub up: Vec<Key>,
}

impl Frame {
    /// A frame that only lets time pass
    pub fn wait(delta_ms: u32) -> Self {
        Self {
            delta_ms,
            ..Self::default()
        }
    }

    pub fn press(delta_ms: u32, key: Key) -> Self {
        Self {
            delta_ms,
            down: vec![key],
            up: Vec::new(),
        }
    }

    pub fn release(delta_ms: u32, key: Key) -> Self {
        Self {
            delta_ms,
            down: Vec::new(),
            up: vec![key],
        }
    }
}

fn default_level() -> u8 {
    MIN_LEVEL
}

/// A recorded session: where it started and every frame fed to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTrace {
    pub seed: u32,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub frames: Vec<Frame>,
}

/// Result of replaying a trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Every event drained during the replay, in order
    pub events: Vec<SoundEvent>,
    /// Simulation steps executed
    pub ticks: u64,
    /// Frames consumed before the session ended (or all of them)
    pub frames: usize,
}

impl InputTrace {
    pub fn new(seed: u32, level: u8) -> Self {
        Self {
            seed,
            level,
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Total wall-clock time covered by the trace
    pub fn duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.delta_ms as u64).sum()
    }

    /// Build a started session and replay every frame into it
    pub fn replay(&self) -> (GameState, ReplayOutcome) {
        let mut state = GameState::new(self.seed);
        state.start(self.level);
        let outcome = self.apply(&mut state);
        (state, outcome)
    }

    /// Replay every frame into an already started session.
    ///
    /// Stops early once the session is over.
    pub fn apply(&self, state: &mut GameState) -> ReplayOutcome {
        let mut events = state.take_events();
        let mut ticks = 0u64;
        let mut frames = 0usize;

        for frame in &self.frames {
            if state.game_over() {
                break;
            }
            for &key in &frame.down {
                state.handle_key_down(key);
            }
            for &key in &frame.up {
                state.handle_key_up(key);
            }
            ticks += state.tick(frame.delta_ms) as u64;
            events.append(&mut state.take_events());
            frames += 1;
        }

        ReplayOutcome {
            events,
            ticks,
            frames,
        }
    }
}

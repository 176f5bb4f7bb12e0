//! Movement state - what drives the active piece from tick to tick
//!
//! Vertical motion is a single [`Motion`] value, so gravity, freefall, grace
//! and hard drop can never be active together. A held horizontal key is a
//! separate [`Shift`] because it runs alongside gravity, freefall, or grace.

use serde::Serialize;

use crate::scoring::{drop_score, gravity_interval};
use crate::types::{
    Direction, FREEFALL_RATE_TICKS, SLOW_MOVE_TICKS, ZIP_DELAY_TICKS, ZIP_RATE_TICKS,
};

/// Vertical driver of the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum Motion {
    /// Level-speed descent
    Gravity,
    /// Push key held: one row per `FREEFALL_RATE_TICKS`
    Freefall,
    /// A gravity descent was blocked at `since`; locks after `SLOW_MOVE_TICKS`
    Grace { since: u64 },
    /// One row per tick until blocked
    HardDrop,
}

impl Motion {
    /// Whether descents in this mode earn drop points
    pub fn scores_drops(self) -> bool {
        matches!(self, Motion::Freefall | Motion::HardDrop)
    }
}

/// A held horizontal key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shift {
    pub direction: Direction,
    /// Tick of the last registered move
    pub last_move: u64,
    pub zipping: bool,
}

impl Shift {
    /// Key pressed at `tick`; the first step is taken by the caller right away
    pub fn new(direction: Direction, tick: u64) -> Self {
        Self {
            direction,
            last_move: tick,
            zipping: false,
        }
    }

    /// Returns true when a repeat step is due at `tick` and records it
    pub fn poll(&mut self, tick: u64) -> bool {
        let wait = if self.zipping {
            ZIP_RATE_TICKS
        } else {
            ZIP_DELAY_TICKS
        };
        if tick.saturating_sub(self.last_move) < wait {
            return false;
        }
        self.zipping = true;
        self.last_move = tick;
        true
    }
}

/// What happens after a blocked descent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocked {
    /// Grace armed; the piece stays live
    Grace,
    /// The piece locks now
    Lock,
}

/// Per-piece movement state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Movement {
    pub motion: Motion,
    pub shift: Option<Shift>,
    /// Tick of the last descent (or of the event that restarted the timer)
    pub last_descent: u64,
    /// Drop points earned by the current piece, committed at lock
    pub pending_drop_score: u32,
}

impl Movement {
    pub fn new(tick: u64) -> Self {
        Self {
            motion: Motion::Gravity,
            shift: None,
            last_descent: tick,
            pending_drop_score: 0,
        }
    }

    /// Back to plain gravity with no keys held
    pub fn reset(&mut self, tick: u64) {
        *self = Self::new(tick);
    }

    pub fn is_hard_dropping(&self) -> bool {
        self.motion == Motion::HardDrop
    }

    /// Ticks between descent attempts in the current mode
    pub fn descent_interval(&self, level: u8, height: i32) -> u64 {
        match self.motion {
            Motion::HardDrop => 1,
            Motion::Freefall => FREEFALL_RATE_TICKS,
            Motion::Gravity | Motion::Grace { .. } => gravity_interval(level, height),
        }
    }

    pub fn descent_due(&self, tick: u64, level: u8, height: i32) -> bool {
        tick.saturating_sub(self.last_descent) >= self.descent_interval(level, height)
    }

    pub fn grace_expired(&self, tick: u64) -> bool {
        match self.motion {
            Motion::Grace { since } => tick.saturating_sub(since) >= SLOW_MOVE_TICKS,
            _ => false,
        }
    }

    /// Record a successful descent. Cancels grace.
    pub fn descended(&mut self, tick: u64) {
        if self.motion.scores_drops() {
            self.pending_drop_score += drop_score(1);
        }
        if let Motion::Grace { .. } = self.motion {
            self.motion = Motion::Gravity;
        }
        self.last_descent = tick;
    }

    /// Record a blocked descent.
    ///
    /// Plain gravity arms grace; anything else locks.
    pub fn blocked(&mut self, tick: u64) -> Blocked {
        match self.motion {
            Motion::Gravity => {
                self.motion = Motion::Grace { since: tick };
                self.last_descent = tick;
                Blocked::Grace
            }
            Motion::Freefall | Motion::Grace { .. } | Motion::HardDrop => Blocked::Lock,
        }
    }

    pub fn start_freefall(&mut self, tick: u64) {
        if self.motion != Motion::Freefall {
            self.motion = Motion::Freefall;
            self.last_descent = tick;
        }
    }

    pub fn stop_freefall(&mut self, tick: u64) {
        if self.motion == Motion::Freefall {
            self.motion = Motion::Gravity;
            self.last_descent = tick;
        }
    }

    pub fn start_hard_drop(&mut self, tick: u64) {
        self.motion = Motion::HardDrop;
        self.shift = None;
        self.last_descent = tick;
    }

    /// Register a horizontal key press.
    ///
    /// Returns false for a repeat press of the direction already held.
    pub fn press_shift(&mut self, direction: Direction, tick: u64) -> bool {
        if matches!(self.shift, Some(s) if s.direction == direction) {
            return false;
        }
        self.shift = Some(Shift::new(direction, tick));
        true
    }

    pub fn release_shift(&mut self, direction: Direction) {
        if matches!(self.shift, Some(s) if s.direction == direction) {
            self.shift = None;
        }
    }

    /// Take the pending drop score for committing
    pub fn take_pending(&mut self) -> u32 {
        std::mem::take(&mut self.pending_drop_score)
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(0)
    }
}

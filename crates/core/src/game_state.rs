//! Game state module - the complete session
//!
//! This module ties together the board, pieces, scheduler, movement, and
//! scoring. Each simulation tick flows one way: held keys and gravity move the
//! active piece, a blocked descent may lock it, a lock may start a row clear,
//! and the resolution spawns the next piece.
//!
//! Game rules are never errors: illegal moves are reverted in place and a
//! blocked spawn or an overflowing lock ends the session with a flag.

use arrayvec::ArrayVec;
use log::{debug, info, warn};

use crate::collision::{is_legal, place, Placement};
use crate::movement::{Blocked, Motion, Movement};
use crate::pieces::Piece;
use crate::rng::PieceGenerator;
use crate::scheduler::TickScheduler;
use crate::scoring::clear_award;
use crate::snapshot::{board_hash, GameSnapshot};
use crate::types::*;
use crate::Board;

/// Initial room in the event queue; a single tick emits at most a handful
const EVENT_CAPACITY: usize = 16;

/// Rows waiting out the clear animation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowClear {
    /// Full rows, bottom to top
    pub rows: ArrayVec<usize, ROWS>,
    /// At least one of the rows is a single color
    pub monochrome: bool,
    /// The locking piece was hard-dropped or in freefall
    pub was_drop_or_freefall: bool,
    /// Tick the clear started on
    pub started: u64,
}

/// Session lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Not started, or stopped
    Idle,
    /// A piece is falling
    Falling,
    /// Full rows are flashing; no piece logic runs
    Clearing(RowClear),
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    generator: PieceGenerator,
    scheduler: TickScheduler,
    movement: Movement,
    phase: Phase,
    /// Virtual tick counter, one per simulation step
    tick: u64,
    score: u32,
    level: u8,
    lines: u32,
    paused: bool,
    events: Vec<SoundEvent>,
    /// Spawns per shape, indexed by color
    spawn_counts: [u32; SHAPE_COUNT],
}

impl GameState {
    /// Create an idle session whose pieces come from `seed`
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            current: None,
            next: None,
            generator: PieceGenerator::new(seed),
            scheduler: TickScheduler::new(),
            movement: Movement::new(0),
            phase: Phase::Idle,
            tick: 0,
            score: 0,
            level: MIN_LEVEL,
            lines: 0,
            paused: false,
            events: Vec::with_capacity(EVENT_CAPACITY),
            spawn_counts: [0; SHAPE_COUNT],
        }
    }

    /// Reset the session and spawn the first piece at `level`.
    ///
    /// Levels outside `1..=10` are clamped.
    pub fn start(&mut self, level: u8) {
        let clamped = level.clamp(MIN_LEVEL, MAX_LEVEL);
        if clamped != level {
            warn!("start level {} out of range, using {}", level, clamped);
        }

        self.board.clear();
        self.current = None;
        self.next = Some(Piece::new(self.generator.draw()));
        self.scheduler.reset();
        self.movement.reset(0);
        self.phase = Phase::Falling;
        self.tick = 0;
        self.score = 0;
        self.level = clamped;
        self.lines = 0;
        self.paused = false;
        self.events.clear();
        self.spawn_counts = [0; SHAPE_COUNT];

        info!("session started at level {}", clamped);
        self.spawn_piece();
    }

    /// End the session and return to the neutral idle state
    pub fn stop(&mut self) {
        let generator = self.generator.clone();
        *self = Self::new(0);
        self.generator = generator;
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Option<Piece> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scripted scenarios and tests
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece (scripted scenarios and tests)
    pub fn set_current(&mut self, piece: Piece) {
        self.current = Some(piece);
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn motion(&self) -> Motion {
        self.movement.motion
    }

    pub fn pending_drop_score(&self) -> u32 {
        self.movement.pending_drop_score
    }

    /// Rows currently flashing before removal
    pub fn clearing_rows(&self) -> &[usize] {
        match &self.phase {
            Phase::Clearing(clear) => &clear.rows,
            _ => &[],
        }
    }

    /// Whether the flashing rows were completed by a hard drop or freefall
    pub fn clearing_after_drop(&self) -> bool {
        matches!(&self.phase, Phase::Clearing(clear) if clear.was_drop_or_freefall)
    }

    /// How many times each shape has spawned this session, indexed by color
    pub fn spawn_counts(&self) -> &[u32; SHAPE_COUNT] {
        &self.spawn_counts
    }

    /// Drain sound cues emitted since the last call
    pub fn take_events(&mut self) -> Vec<SoundEvent> {
        self.events.drain(..).collect()
    }

    /// Drain sound cues into a caller-owned buffer, keeping both allocations
    pub fn drain_events_into(&mut self, out: &mut Vec<SoundEvent>) {
        out.extend(self.events.drain(..));
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = *self.board.cells();
        out.board_hash = board_hash(&out.board);
        out.current = self.current;
        out.next = self.next;
        out.clearing_rows.clear();
        out.clearing_rows
            .extend(self.clearing_rows().iter().copied());
        out.clearing_after_drop = self.clearing_after_drop();
        out.motion = self.movement.motion;
        out.pending_drop_score = self.movement.pending_drop_score;
        out.tick = self.tick;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.started = self.started();
        out.paused = self.paused;
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Feed elapsed wall-clock time and run every tick that became due.
    ///
    /// Returns the number of simulation steps executed. Paused, idle, and
    /// finished sessions take no time at all.
    pub fn tick(&mut self, elapsed_ms: u32) -> u32 {
        if self.paused || !matches!(self.phase, Phase::Falling | Phase::Clearing(_)) {
            return 0;
        }
        let due = self.scheduler.advance(elapsed_ms);
        let mut ran = 0;
        for _ in 0..due {
            if self.game_over() {
                break;
            }
            self.step();
            ran += 1;
        }
        ran
    }

    /// Run exactly one simulation tick
    pub fn step(&mut self) {
        if !matches!(self.phase, Phase::Falling | Phase::Clearing(_)) {
            return;
        }
        self.tick += 1;

        if let Phase::Clearing(clear) = &self.phase {
            if self.tick.saturating_sub(clear.started) >= CLEAR_ANIM_TICKS {
                self.finish_clear();
            }
            return;
        }

        let Some(piece) = self.current else {
            return;
        };

        if self.movement.is_hard_dropping() {
            self.try_descend();
            return;
        }

        let tick = self.tick;
        let repeat = match self.movement.shift.as_mut() {
            Some(shift) => shift.poll(tick).then(|| shift.direction.dx()),
            None => None,
        };
        if let Some(dx) = repeat {
            self.try_shift(dx);
        }

        if self.movement.descent_due(self.tick, self.level, piece.height) {
            self.try_descend();
        } else if self.movement.grace_expired(self.tick) {
            // a piece slid off its ledge during grace falls instead of locking
            debug!("grace expired at tick {}", self.tick);
            self.try_descend();
        }
    }

    fn accepts_piece_input(&self) -> bool {
        !self.paused
            && self.phase == Phase::Falling
            && self.current.is_some()
            && !self.movement.is_hard_dropping()
    }

    pub fn handle_key_down(&mut self, key: Key) {
        if !self.accepts_piece_input() {
            return;
        }
        match key {
            Key::RotateCw => {
                self.try_rotate(true);
            }
            Key::RotateCcw => {
                self.try_rotate(false);
            }
            Key::MoveLeft => self.press_shift(Direction::Left),
            Key::MoveRight => self.press_shift(Direction::Right),
            Key::Freefall => self.movement.start_freefall(self.tick),
            Key::HardDrop => {
                self.movement.start_hard_drop(self.tick);
                self.events.push(SoundEvent::Drop);
            }
        }
    }

    pub fn handle_key_up(&mut self, key: Key) {
        match key {
            Key::MoveLeft => self.movement.release_shift(Direction::Left),
            Key::MoveRight => self.movement.release_shift(Direction::Right),
            Key::Freefall => self.movement.stop_freefall(self.tick),
            Key::RotateCw | Key::RotateCcw | Key::HardDrop => {}
        }
    }

    fn press_shift(&mut self, direction: Direction) {
        if self.movement.press_shift(direction, self.tick) {
            self.try_shift(direction.dx());
        }
    }

    /// Step the active piece sideways; an illegal step is undone in place
    pub(crate) fn try_shift(&mut self, dx: i32) -> bool {
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        piece.offset += dx;
        if is_legal(&self.board, piece) {
            return true;
        }
        piece.offset -= dx;
        false
    }

    /// Rotate the active piece; an illegal rotation is undone with the inverse
    pub(crate) fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        if clockwise {
            piece.rotate_cw();
        } else {
            piece.rotate_ccw();
        }
        if is_legal(&self.board, piece) {
            return true;
        }
        if clockwise {
            piece.rotate_ccw();
        } else {
            piece.rotate_cw();
        }
        false
    }

    /// Attempt a one-row descent in the current motion mode
    fn try_descend(&mut self) {
        let Some(piece) = self.current.as_mut() else {
            return;
        };
        piece.height -= 1;
        if is_legal(&self.board, piece) {
            self.movement.descended(self.tick);
            return;
        }
        piece.height += 1;
        match self.movement.blocked(self.tick) {
            Blocked::Grace => debug!("descent blocked, grace armed at tick {}", self.tick),
            Blocked::Lock => self.lock_piece(),
        }
    }

    /// Lock the active piece into the board and start the row-clear pipeline
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        let was_drop_or_freefall = self.movement.motion.scores_drops();
        let committed = self.movement.take_pending();
        self.score += committed;

        if place(&mut self.board, &piece) == Placement::Overflowed {
            info!(
                "piece overflowed the board at tick {}, score {}",
                self.tick, self.score
            );
            self.phase = Phase::GameOver;
            self.events.push(SoundEvent::GameOver);
            return;
        }
        self.events.push(SoundEvent::Stick);
        debug!(
            "locked {} at offset {} height {} (+{} drop points)",
            piece.shape().as_str(),
            piece.offset,
            piece.height,
            committed
        );

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.movement.reset(self.tick);
            self.spawn_piece();
            return;
        }

        let monochrome = rows.iter().any(|&row| self.board.is_row_monochrome(row));
        let count = rows.len().min(4) as u8;
        debug!("clearing rows {:?} (monochrome: {})", rows.as_slice(), monochrome);
        self.events.push(SoundEvent::Clear(count));
        self.movement.reset(self.tick);
        self.phase = Phase::Clearing(RowClear {
            rows,
            monochrome,
            was_drop_or_freefall,
            started: self.tick,
        });
    }

    fn finish_clear(&mut self) {
        let Phase::Clearing(clear) = std::mem::replace(&mut self.phase, Phase::Falling) else {
            return;
        };

        self.board.remove_rows(&clear.rows);
        self.lines += clear.rows.len() as u32;

        let award = clear_award(
            clear.rows.len(),
            clear.monochrome,
            self.board.is_empty(),
            self.level,
            self.lines,
        );
        self.score += award.total;
        if let Some(level) = award.new_level {
            info!("level up: {} -> {} at {} lines", self.level, level, self.lines);
            self.level = level;
        }
        self.events.extend(award.events());

        self.movement.reset(self.tick);
        self.spawn_piece();
    }

    /// Promote the next piece and draw a new one.
    ///
    /// Returns false (and ends the session) if the new piece collides at once.
    pub fn spawn_piece(&mut self) -> bool {
        let mut piece = match self.next.take() {
            Some(piece) => piece,
            None => Piece::new(self.generator.draw()),
        };
        piece.respawn();
        self.next = Some(Piece::new(self.generator.draw()));
        self.spawn_counts[piece.color as usize] += 1;
        self.current = Some(piece);
        self.movement.reset(self.tick);

        if !is_legal(&self.board, &piece) {
            info!("spawn blocked at tick {}, score {}", self.tick, self.score);
            self.phase = Phase::GameOver;
            self.events.push(SoundEvent::GameOver);
            return false;
        }
        debug!("spawned {}", piece.shape().as_str());
        true
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

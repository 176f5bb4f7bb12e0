//! Scripted autoplay for the headless demo.
//!
//! The autopilot picks a placement for every new piece by trying each
//! rotation and column, dropping the piece on a copy of the board, and scoring
//! the result with a fixed linear heuristic. It then plays the plan through the
//! same key interface a human host uses, one key per frame, and records every
//! frame so the run can be replayed bit for bit.

use crate::core::types::{Key, COLS, ROWS};
use crate::core::{is_legal, place, Board, Frame, GameState, InputTrace, Piece, Placement};

// CodemyRoad GA weights
const W_HEIGHT: f64 = -0.510066;
const W_LINES: f64 = 0.760666;
const W_HOLES: f64 = -0.35663;
const W_BUMP: f64 = -0.184483;

/// Where to put the active piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    /// Quarter turns clockwise from the spawn orientation
    pub rotations: u8,
    /// Target column offset
    pub offset: i32,
    pub value: f64,
}

/// Surface features of a board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardFeatures {
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
    pub complete_lines: u32,
}

pub fn board_features(board: &Board) -> BoardFeatures {
    let cells = board.cells();
    let mut heights = [0u32; COLS];
    let mut holes = 0;

    for (col, column) in cells.iter().enumerate() {
        let top = column.iter().rposition(|&c| c != 0);
        if let Some(top) = top {
            heights[col] = top as u32 + 1;
            holes += column[..top].iter().filter(|&&c| c == 0).count() as u32;
        }
    }

    let bumpiness = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
    let complete_lines = (0..ROWS).filter(|&row| board.is_row_full(row)).count() as u32;

    BoardFeatures {
        aggregate_height: heights.iter().sum(),
        holes,
        bumpiness,
        complete_lines,
    }
}

fn evaluate(features: &BoardFeatures) -> f64 {
    W_HEIGHT * features.aggregate_height as f64
        + W_LINES * features.complete_lines as f64
        + W_HOLES * features.holes as f64
        + W_BUMP * features.bumpiness as f64
}

/// Lowest legal height straight below the piece's current position
fn drop_height(board: &Board, piece: &Piece) -> i32 {
    let mut probe = *piece;
    while is_legal(board, &probe) {
        probe.height -= 1;
    }
    probe.height + 1
}

/// Best placement for `piece` on `board`, or `None` if nothing fits.
///
/// Ties keep the first candidate found, so the choice is deterministic.
pub fn best_placement(board: &Board, piece: &Piece) -> Option<Plan> {
    let mut best: Option<Plan> = None;
    let mut rotated = *piece;

    for rotations in 0..4u8 {
        for offset in -3..COLS as i32 {
            let mut candidate = rotated;
            candidate.offset = offset;
            if !is_legal(board, &candidate) {
                continue;
            }
            candidate.height = drop_height(board, &candidate);

            let mut after = board.clone();
            if place(&mut after, &candidate) == Placement::Overflowed {
                continue;
            }
            let value = evaluate(&board_features(&after));
            if best.map_or(true, |b| value > b.value) {
                best = Some(Plan {
                    rotations,
                    offset,
                    value,
                });
            }
        }
        rotated.rotate_cw();
    }

    best
}

/// Drives a session through the key interface
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Spawn count the current plan belongs to
    planned_for: u32,
    plan: Option<Plan>,
    turns_done: u8,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose this frame's input for `state`
    pub fn next_frame(&mut self, state: &GameState, delta_ms: u32) -> Frame {
        let Some(piece) = state.current() else {
            return Frame::wait(delta_ms);
        };

        let spawned: u32 = state.spawn_counts().iter().sum();
        if spawned != self.planned_for {
            self.planned_for = spawned;
            self.plan = best_placement(state.board(), &piece);
            self.turns_done = 0;
        }

        let Some(plan) = self.plan else {
            return Frame::press(delta_ms, Key::HardDrop);
        };

        if self.turns_done < plan.rotations {
            self.turns_done += 1;
            return Frame::press(delta_ms, Key::RotateCw);
        }

        let key = match piece.offset.cmp(&plan.offset) {
            std::cmp::Ordering::Greater => Key::MoveLeft,
            std::cmp::Ordering::Less => Key::MoveRight,
            std::cmp::Ordering::Equal => return Frame::press(delta_ms, Key::HardDrop),
        };
        Frame {
            delta_ms,
            down: vec![key],
            up: vec![key],
        }
    }
}

/// Outcome of a demo run
#[derive(Debug, Clone)]
pub struct DemoRun {
    pub state: GameState,
    pub trace: InputTrace,
    pub events: usize,
}

/// Play `frames` frames of `frame_ms` each, stopping early on game over
pub fn run_demo(seed: u32, level: u8, frames: usize, frame_ms: u32) -> DemoRun {
    let mut state = GameState::new(seed);
    state.start(level);
    let mut trace = InputTrace::new(seed, level);
    let mut pilot = Autopilot::new();
    let mut events = 0;

    for _ in 0..frames {
        if state.game_over() {
            break;
        }
        let frame = pilot.next_frame(&state, frame_ms);
        for &key in &frame.down {
            state.handle_key_down(key);
        }
        for &key in &frame.up {
            state.handle_key_up(key);
        }
        state.tick(frame.delta_ms);
        events += state.take_events().len();
        trace.push(frame);
    }

    DemoRun {
        state,
        trace,
        events,
    }
}

/// Text picture of the board with the active piece, top row first
pub fn render_board(state: &GameState) -> String {
    let mut grid = *state.board().cells();
    if let Some(piece) = state.current() {
        for (col, row, id) in piece.cells() {
            if (0..COLS as i32).contains(&col) && (0..ROWS as i32).contains(&row) {
                grid[col as usize][row as usize] = id;
            }
        }
    }

    let mut out = String::with_capacity((COLS + 3) * ROWS);
    for row in (0..ROWS).rev() {
        out.push('|');
        for column in &grid {
            out.push(match column[row] {
                0 => '.',
                id => char::from(b'0' + id),
            });
        }
        out.push_str("|\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Shape;

    #[test]
    fn test_features_of_simple_stack() {
        let mut board = Board::new();
        board.set(0, 0, 1);
        board.set(0, 2, 1); // hole at (0, 1)
        board.set(1, 0, 1);

        let f = board_features(&board);
        assert_eq!(f.aggregate_height, 4);
        assert_eq!(f.holes, 1);
        // heights 3, 1, 0...
        assert_eq!(f.bumpiness, 3);
        assert_eq!(f.complete_lines, 0);
    }

    #[test]
    fn test_line_goes_into_the_well() {
        let mut board = Board::new();
        board.fill_row(0, 3, &[9]);
        board.fill_row(1, 3, &[9]);
        board.fill_row(2, 3, &[9]);
        board.fill_row(3, 3, &[9]);

        let plan = best_placement(&board, &Piece::new(Shape::Line)).unwrap();
        // vertical line lives in grid column 1
        assert_eq!(plan.rotations % 2, 1);
        let mut piece = Piece::new(Shape::Line);
        for _ in 0..plan.rotations {
            piece.rotate_cw();
        }
        piece.offset = plan.offset;
        assert!(piece.cells().all(|(col, _, _)| col == 9));
    }

    #[test]
    fn test_demo_records_replayable_trace() {
        let run = run_demo(11, 1, 600, 16);
        assert_eq!(run.trace.frames.len(), 600);
        assert!(run.state.score() > 0);

        let (replayed, _) = run.trace.replay();
        assert_eq!(replayed.snapshot(), run.state.snapshot());
    }

    #[test]
    fn test_render_board_shape() {
        let mut state = GameState::new(1);
        state.start(1);
        let text = render_board(&state);
        assert_eq!(text.lines().count(), ROWS);
        assert!(text.lines().all(|l| l.len() == COLS + 2));
        assert!(text.lines().next().is_some_and(|l| l.chars().any(|c| c.is_ascii_digit())));
    }
}

//! Piece model tests - templates, cycle rotation, and rollback

use proptest::prelude::*;
use tetris_max::core::pieces::{rotate_clockwise, rotate_counter_clockwise, TEMPLATES};
use tetris_max::core::{is_legal, Board, Piece};
use tetris_max::types::{Shape, EMPTY};

fn filled(piece: &Piece) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for (i, column) in piece.grid.iter().enumerate() {
        for (j, &cell) in column.iter().enumerate() {
            if cell != EMPTY {
                out.push((i, j));
            }
        }
    }
    out
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    (0u8..7).prop_map(|c| Shape::from_color(c).unwrap())
}

// ============== Template Tests ==============

#[test]
fn test_template_ids_match_colors() {
    for shape in Shape::ALL {
        let grid = TEMPLATES[shape.color() as usize];
        assert!(grid
            .iter()
            .flatten()
            .all(|&c| c == EMPTY || c == shape.cell()));
    }
}

#[test]
fn test_every_template_touches_row_two() {
    for shape in Shape::ALL {
        let piece = Piece::new(shape);
        let lowest = filled(&piece).iter().map(|&(_, j)| j).max();
        assert_eq!(lowest, Some(2), "{:?}", shape);
    }
}

#[test]
fn test_s_and_z_rotations() {
    let mut s = Piece::new(Shape::S);
    s.rotate_cw();
    assert_eq!(filled(&s), vec![(0, 0), (0, 1), (1, 1), (1, 2)]);

    let mut z = Piece::new(Shape::Z);
    z.rotate_cw();
    assert_eq!(filled(&z), vec![(0, 1), (0, 2), (1, 0), (1, 1)]);
}

#[test]
fn test_line_rotation_cycle() {
    let mut line = Piece::new(Shape::Line);
    line.rotate_cw();
    assert_eq!(filled(&line), vec![(1, 0), (1, 1), (1, 2), (1, 3)]);
    line.rotate_cw();
    assert_eq!(filled(&line), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    line.rotate_cw();
    assert_eq!(filled(&line), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    line.rotate_cw();
    assert_eq!(line.grid, TEMPLATES[Shape::Line.color() as usize]);
}

#[test]
fn test_free_functions_match_methods() {
    for shape in Shape::ALL {
        let mut piece = Piece::new(shape);
        let mut grid = piece.grid;
        piece.rotate_cw();
        rotate_clockwise(shape.color(), &mut grid);
        assert_eq!(piece.grid, grid);
        piece.rotate_ccw();
        rotate_counter_clockwise(shape.color(), &mut grid);
        assert_eq!(piece.grid, grid);
    }
}

#[test]
fn test_illegal_rotation_against_wall_rolls_back() {
    let board = Board::new();
    let mut piece = Piece::new(Shape::Line);
    piece.rotate_cw();
    piece.offset = -1; // vertical in board column 0
    assert!(is_legal(&board, &piece));

    let before = piece;
    piece.rotate_cw(); // horizontal would reach column -1
    assert!(!is_legal(&board, &piece));
    piece.rotate_ccw();
    assert_eq!(piece, before);
}

proptest! {
    #[test]
    fn four_turns_are_identity(shape in shape_strategy(), clockwise in any::<bool>()) {
        let mut piece = Piece::new(shape);
        let before = piece.grid;
        for _ in 0..4 {
            if clockwise { piece.rotate_cw() } else { piece.rotate_ccw() }
        }
        prop_assert_eq!(piece.grid, before);
    }

    #[test]
    fn any_turn_sequence_undoes_exactly(
        shape in shape_strategy(),
        turns in proptest::collection::vec(any::<bool>(), 0..24),
    ) {
        let mut piece = Piece::new(shape);
        let before = piece;
        for &cw in &turns {
            if cw { piece.rotate_cw() } else { piece.rotate_ccw() }
            prop_assert_eq!(piece.filled_count(), 4);
        }
        for &cw in turns.iter().rev() {
            if cw { piece.rotate_ccw() } else { piece.rotate_cw() }
        }
        prop_assert_eq!(piece, before);
    }

    #[test]
    fn rotation_rollback_is_bit_identical(
        shape in shape_strategy(),
        offset in -3i32..10,
        height in 0i32..24,
        blocks in proptest::collection::vec((0i32..10, 0i32..20), 0..40),
    ) {
        let mut board = Board::new();
        for (col, row) in blocks {
            board.set(col, row, 1);
        }
        let mut piece = Piece::new(shape);
        piece.offset = offset;
        piece.height = height;
        let before = piece;

        piece.rotate_cw();
        if !is_legal(&board, &piece) {
            piece.rotate_ccw();
            prop_assert_eq!(piece, before);
        }
    }
}

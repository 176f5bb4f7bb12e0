//! Pieces module - shape templates and cycle-table rotation
//!
//! A piece is a 4x4 grid indexed `grid[col][j]`. A filled cell at `grid[i][j]`
//! covers board column `offset + i` and board row `height - j`, so `j` grows
//! downward on screen. Rotation is a fixed permutation of grid cells per shape
//! class. There are no wall kicks: callers rotate, test, and undo with the
//! inverse permutation.

use serde::Serialize;

use crate::types::{Cell, Shape, EMPTY, PIECE_SIZE, SHAPE_COUNT, SPAWN_HEIGHT, SPAWN_OFFSET};

/// 4x4 piece grid, `grid[col][j]`
pub type PieceGrid = [[Cell; PIECE_SIZE]; PIECE_SIZE];

/// Four grid positions whose contents rotate one step along the cycle
type Cycle = [(usize, usize); 4];

/// Quarter turn about the centre of the top-left 3x3 window: `(i, j) -> (2 - j, i)`
const SMALL_CYCLES: [Cycle; 2] = [
    [(0, 0), (2, 0), (2, 2), (0, 2)],
    [(1, 0), (2, 1), (1, 2), (0, 1)],
];

/// Quarter turn about the centre of the 4x4 grid: `(i, j) -> (3 - j, i)`.
/// The corner cycle is omitted; the line never reaches a corner.
const LINE_CYCLES: [Cycle; 3] = [
    [(2, 0), (3, 2), (1, 3), (0, 1)],
    [(1, 0), (3, 1), (2, 3), (0, 2)],
    [(1, 1), (2, 1), (2, 2), (1, 2)],
];

fn cycles_for(color: u8) -> &'static [Cycle] {
    match color {
        0 => &[],
        1 => &LINE_CYCLES,
        _ => &SMALL_CYCLES,
    }
}

const fn template(cells: [(usize, usize); 4], id: Cell) -> PieceGrid {
    let mut grid = [[EMPTY; PIECE_SIZE]; PIECE_SIZE];
    let mut k = 0;
    while k < 4 {
        grid[cells[k].0][cells[k].1] = id;
        k += 1;
    }
    grid
}

/// The seven immutable templates, indexed by color.
///
/// Every template rests on grid row `j = 2`, the first row that is visible
/// at spawn height.
pub const TEMPLATES: [PieceGrid; SHAPE_COUNT] = [
    // square
    template([(1, 1), (2, 1), (1, 2), (2, 2)], 1),
    // line
    template([(0, 2), (1, 2), (2, 2), (3, 2)], 2),
    // J
    template([(0, 1), (0, 2), (1, 2), (2, 2)], 3),
    // L
    template([(2, 1), (0, 2), (1, 2), (2, 2)], 4),
    // S
    template([(1, 1), (2, 1), (0, 2), (1, 2)], 5),
    // Z
    template([(0, 1), (1, 1), (1, 2), (2, 2)], 6),
    // T
    template([(1, 1), (0, 2), (1, 2), (2, 2)], 7),
];

/// Rotate a grid a quarter turn clockwise in place
pub fn rotate_clockwise(color: u8, grid: &mut PieceGrid) {
    for &[a, b, c, d] in cycles_for(color) {
        let tmp = grid[d.0][d.1];
        grid[d.0][d.1] = grid[c.0][c.1];
        grid[c.0][c.1] = grid[b.0][b.1];
        grid[b.0][b.1] = grid[a.0][a.1];
        grid[a.0][a.1] = tmp;
    }
}

/// Rotate a grid a quarter turn counter-clockwise in place.
/// Walks the same cycles backwards, so it exactly undoes [`rotate_clockwise`].
pub fn rotate_counter_clockwise(color: u8, grid: &mut PieceGrid) {
    for &[a, b, c, d] in cycles_for(color) {
        let tmp = grid[a.0][a.1];
        grid[a.0][a.1] = grid[b.0][b.1];
        grid[b.0][b.1] = grid[c.0][c.1];
        grid[c.0][c.1] = grid[d.0][d.1];
        grid[d.0][d.1] = tmp;
    }
}

/// A falling piece
///
/// `Piece` is `Copy`: every copy owns its own grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    /// Board row aligned with grid row `j = 0`
    pub height: i32,
    /// Board column aligned with grid column `i = 0`
    pub offset: i32,
    /// Template index `0..=6`
    pub color: u8,
    pub grid: PieceGrid,
}

impl Piece {
    /// Deep copy of a template at the spawn position
    pub fn new(shape: Shape) -> Self {
        Self {
            height: SPAWN_HEIGHT,
            offset: SPAWN_OFFSET,
            color: shape.color(),
            grid: TEMPLATES[shape.color() as usize],
        }
    }

    pub fn shape(&self) -> Shape {
        Shape::from_color(self.color).unwrap_or(Shape::Square)
    }

    /// Move back to the spawn position, keeping orientation
    pub fn respawn(&mut self) {
        self.height = SPAWN_HEIGHT;
        self.offset = SPAWN_OFFSET;
    }

    pub fn rotate_cw(&mut self) {
        rotate_clockwise(self.color, &mut self.grid);
    }

    pub fn rotate_ccw(&mut self) {
        rotate_counter_clockwise(self.color, &mut self.grid);
    }

    /// Board coordinates `(col, row)` and ids of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.grid.iter().enumerate().flat_map(move |(i, column)| {
            column.iter().enumerate().filter_map(move |(j, &cell)| {
                (cell != EMPTY).then(|| (self.offset + i as i32, self.height - j as i32, cell))
            })
        })
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.grid.iter().flatten().filter(|&&c| c != EMPTY).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_have_four_cells_of_their_id() {
        for shape in Shape::ALL {
            let piece = Piece::new(shape);
            assert_eq!(piece.filled_count(), 4, "{:?}", shape);
            assert!(piece.cells().all(|(_, _, id)| id == shape.cell()));
        }
    }

    #[test]
    fn test_square_rotation_is_noop() {
        let mut piece = Piece::new(Shape::Square);
        let before = piece.grid;
        piece.rotate_cw();
        assert_eq!(piece.grid, before);
        piece.rotate_ccw();
        assert_eq!(piece.grid, before);
    }

    #[test]
    fn test_line_rotates_to_vertical() {
        let mut piece = Piece::new(Shape::Line);
        piece.rotate_cw();
        let id = Shape::Line.cell();
        for j in 0..4 {
            assert_eq!(piece.grid[1][j], id);
        }
        assert_eq!(piece.filled_count(), 4);
    }

    #[test]
    fn test_t_rotation_clockwise() {
        let mut piece = Piece::new(Shape::T);
        piece.rotate_cw();
        // (1,1),(0,2),(1,2),(2,2) -> (1,1),(0,0),(0,1),(0,2)
        let id = Shape::T.cell();
        let mut expected = [[EMPTY; 4]; 4];
        for (i, j) in [(1, 1), (0, 0), (0, 1), (0, 2)] {
            expected[i][j] = id;
        }
        assert_eq!(piece.grid, expected);
    }

    #[test]
    fn test_four_turns_restore_grid() {
        for shape in Shape::ALL {
            let mut piece = Piece::new(shape);
            let before = piece.grid;
            for _ in 0..4 {
                piece.rotate_cw();
            }
            assert_eq!(piece.grid, before, "cw {:?}", shape);
            for _ in 0..4 {
                piece.rotate_ccw();
            }
            assert_eq!(piece.grid, before, "ccw {:?}", shape);
        }
    }

    #[test]
    fn test_ccw_is_three_cw() {
        for shape in Shape::ALL {
            let mut a = Piece::new(shape);
            let mut b = a;
            a.rotate_ccw();
            for _ in 0..3 {
                b.rotate_cw();
            }
            assert_eq!(a.grid, b.grid, "{:?}", shape);
        }
    }

    #[test]
    fn test_cells_map_to_board_coordinates() {
        let piece = Piece::new(Shape::Line);
        let cells: Vec<_> = piece.cells().map(|(c, r, _)| (c, r)).collect();
        assert_eq!(cells, vec![(3, 19), (4, 19), (5, 19), (6, 19)]);
    }

    #[test]
    fn test_copies_do_not_share_grid() {
        let original = Piece::new(Shape::J);
        let mut copy = original;
        copy.rotate_cw();
        assert_eq!(original.grid, TEMPLATES[Shape::J.color() as usize]);
        assert_ne!(copy.grid, original.grid);
    }
}

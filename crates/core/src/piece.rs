//! Piece module - tetromino shapes and the active falling piece
//!
//! A piece is a shape matrix plus an orientation counter and a top-left
//! anchor in grid coordinates. It knows nothing about the board: anchor
//! coordinates may be negative or out of bounds transiently, and the board
//! validates positions before committing them.

use arrayvec::ArrayVec;

use gridfall_types::PieceKind;

/// Square 0/1 shape matrix, up to 4x4.
///
/// Only the top-left `size` x `size` corner is meaningful; the rest is
/// zero padding so all kinds share one representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMatrix {
    size: u8,
    rows: [[u8; 4]; 4],
}

impl ShapeMatrix {
    /// Side length of the matrix (2, 3 or 4 depending on kind).
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the cell at (row, col) is solid.
    pub fn is_solid(&self, row: usize, col: usize) -> bool {
        self.rows[row][col] == 1
    }

    /// The matrix rotated 90 degrees clockwise (transpose and reverse).
    pub fn rotated_cw(&self) -> ShapeMatrix {
        let n = self.size();
        let mut out = ShapeMatrix {
            size: self.size,
            rows: [[0; 4]; 4],
        };
        for row in 0..n {
            for col in 0..n {
                out.rows[col][n - 1 - row] = self.rows[row][col];
            }
        }
        out
    }
}

const I_SHAPE: ShapeMatrix = ShapeMatrix {
    size: 4,
    rows: [
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [1, 1, 1, 1],
        [0, 0, 0, 0],
    ],
};

const J_SHAPE: ShapeMatrix = ShapeMatrix {
    size: 3,
    rows: [
        [1, 0, 0, 0],
        [1, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const L_SHAPE: ShapeMatrix = ShapeMatrix {
    size: 3,
    rows: [
        [0, 0, 1, 0],
        [1, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const T_SHAPE: ShapeMatrix = ShapeMatrix {
    size: 3,
    rows: [
        [0, 1, 0, 0],
        [1, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const S_SHAPE: ShapeMatrix = ShapeMatrix {
    size: 3,
    rows: [
        [0, 1, 1, 0],
        [1, 1, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const Z_SHAPE: ShapeMatrix = ShapeMatrix {
    size: 3,
    rows: [
        [1, 1, 0, 0],
        [0, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const O_SHAPE: ShapeMatrix = ShapeMatrix {
    size: 2,
    rows: [
        [1, 1, 0, 0],
        [1, 1, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

/// Base (orientation 0) shape matrix for a piece kind.
pub fn base_shape(kind: PieceKind) -> ShapeMatrix {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::O => O_SHAPE,
    }
}

/// The active falling piece
///
/// Mutators apply signed offsets with no bounds checking; each has an
/// inverse of the same magnitude (`fall_by`/`rise_by`,
/// `move_left_by`/`move_right_by`, `rotate_cw`/`rotate_ccw`). The board
/// validates tentative positions and only commits valid ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    /// Net clockwise quarter-turns; may go negative, applied mod 4.
    rotation: i16,
    /// Anchor row of the shape matrix's top-left corner (y).
    row: i16,
    /// Anchor column of the shape matrix's top-left corner (x).
    col: i16,
    landed: bool,
}

impl Piece {
    /// Create a piece at its kind-specific starting anchor.
    ///
    /// The I piece starts two rows above the top so its solid bar sits on
    /// row 0; the O piece sits one column further right than the 3x3
    /// kinds. These offsets align every kind's visible cells at the same
    /// apparent spawn row.
    pub fn spawn(kind: PieceKind) -> Self {
        let (row, col) = match kind {
            PieceKind::I => (-2, 3),
            PieceKind::O => (0, 4),
            _ => (0, 3),
        };
        Self {
            kind,
            rotation: 0,
            row,
            col,
            landed: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Anchor row (y) of the shape matrix's top-left corner.
    pub fn row(&self) -> i16 {
        self.row
    }

    /// Anchor column (x) of the shape matrix's top-left corner.
    pub fn col(&self) -> i16 {
        self.col
    }

    /// Net clockwise quarter-turns applied to the base shape.
    pub fn rotation(&self) -> i16 {
        self.rotation
    }

    /// The shape matrix with the current orientation applied.
    ///
    /// Pure function of kind and rotation counter.
    pub fn rotated_shape(&self) -> ShapeMatrix {
        let mut shape = base_shape(self.kind);
        for _ in 0..self.rotation.rem_euclid(4) {
            shape = shape.rotated_cw();
        }
        shape
    }

    /// Absolute grid coordinates (x, y) of every solid cell.
    pub fn occupied_cells(&self) -> ArrayVec<(i16, i16), 4> {
        let shape = self.rotated_shape();
        let mut cells = ArrayVec::new();
        for r in 0..shape.size() {
            for c in 0..shape.size() {
                if shape.is_solid(r, c) {
                    cells.push((self.col + c as i16, self.row + r as i16));
                }
            }
        }
        cells
    }

    pub fn fall_by(&mut self, rows: i16) {
        self.row += rows;
    }

    pub fn rise_by(&mut self, rows: i16) {
        self.row -= rows;
    }

    pub fn move_left_by(&mut self, cols: i16) {
        self.col -= cols;
    }

    pub fn move_right_by(&mut self, cols: i16) {
        self.col += cols;
    }

    pub fn rotate_cw(&mut self) {
        self.rotation += 1;
    }

    pub fn rotate_ccw(&mut self) {
        self.rotation -= 1;
    }

    /// Mark the piece as having had no room to fall on the last tick.
    ///
    /// The board freezes a piece only on the second consecutive tick with
    /// no room, so this flag gives one tick of lock grace.
    pub fn land(&mut self) {
        self.landed = true;
    }

    /// Re-arm lock grace after the piece regains room to fall.
    pub fn unland(&mut self) {
        self.landed = false;
    }

    pub fn is_landed(&self) -> bool {
        self.landed
    }
}

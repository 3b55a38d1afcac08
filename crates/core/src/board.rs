//! Board module - owns the grid and the active piece, enforces all rules
//!
//! The board is a 10x20 grid of [`Cell`]s stored as a flat row-major array
//! for cache locality, addressed by (x, y) with x = column 0..9 and
//! y = row 0..19, row 0 at the top.
//!
//! The grid always reflects the active piece: exactly the cells covered by
//! the falling piece are `Active`, everything else is `Empty` or `Frozen`.
//! Commands and the tick cycle keep that in sync by removing the piece's
//! cells, mutating, and re-painting.
//!
//! Blocked commands are silent no-ops; the engine signals nothing to the
//! caller beyond the latched game-over flag.

use std::fmt;

use gridfall_types::{Cell, GameAction, BOARD_HEIGHT, BOARD_WIDTH};

use crate::piece::Piece;
use crate::rng::{PieceSource, UniformSource};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows plus the active falling piece
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    active: Option<Piece>,
    /// Latched once a spawned piece overlaps existing content.
    game_over: bool,
    source: Box<dyn PieceSource>,
}

impl Board {
    /// Create an empty board drawing pieces uniformly at random.
    pub fn new(seed: u32) -> Self {
        Self::with_source(Box::new(UniformSource::new(seed)))
    }

    /// Create an empty board with an injected piece source.
    pub fn with_source(source: Box<dyn PieceSource>) -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
            active: None,
            game_over: false,
            source,
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i16 || y < 0 || y >= BOARD_HEIGHT as i16 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn cell(&self, x: i16, y: i16) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Read-only snapshot of the grid, row-major.
    pub fn grid(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy of the active piece, if one is falling.
    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    /// Whether a falling piece currently exists.
    pub fn has_piece(&self) -> bool {
        self.active.is_some()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether the session is still playable (game-over flag not latched).
    pub fn is_running(&self) -> bool {
        !self.game_over
    }

    /// Advance the state machine by one gravity step.
    ///
    /// Exactly one of the following happens, in priority order:
    /// spawn a piece when none exists; drop the piece one row; freeze a
    /// piece that has been out of room for two consecutive ticks; or mark
    /// it landed (the grace tick). A piece that lands momentarily and then
    /// regains room - a kick can do this - has its grace re-armed.
    pub fn tick(&mut self) {
        self.remove_active_cells();

        if self.active.is_none() {
            self.spawn_piece();
            self.paint_active_cells();
            return;
        }

        if self.can_fall() {
            if let Some(piece) = self.active.as_mut() {
                piece.fall_by(1);
            }
            if self.can_fall() {
                if let Some(piece) = self.active.as_mut() {
                    piece.unland();
                }
            }
        } else if self.active.map_or(false, |piece| piece.is_landed()) {
            // Second consecutive tick with no room: lock for real.
            self.freeze_active();
            self.clear_rows();
            self.spawn_piece();
        } else if let Some(piece) = self.active.as_mut() {
            piece.land();
        }

        self.paint_active_cells();
    }

    /// Dispatch one command from the shell.
    ///
    /// Returns whether the command changed the piece; blocked commands are
    /// silent no-ops.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
        }
    }

    // ----- movement probes -----
    //
    // Each probe tests a mutated copy of the active piece against the
    // grid and discards it, so probes have zero net effect on state.
    // Active cells never block (only Frozen and out-of-bounds do), so the
    // piece's own footprint cannot produce a false collision.

    /// Whether the piece can drop one row.
    pub fn can_fall(&self) -> bool {
        self.offset_fits(0, 1)
    }

    /// Whether the piece can move one column left.
    pub fn can_move_left(&self) -> bool {
        self.offset_fits(-1, 0)
    }

    /// Whether the piece can move one column right.
    pub fn can_move_right(&self) -> bool {
        self.offset_fits(1, 0)
    }

    /// Whether the bare clockwise rotation fits (no kick offsets).
    pub fn can_rotate_cw(&self) -> bool {
        match self.active {
            Some(piece) => self.rotated_fits(&piece, true),
            None => false,
        }
    }

    /// Whether the bare counter-clockwise rotation fits (no kick offsets).
    pub fn can_rotate_ccw(&self) -> bool {
        match self.active {
            Some(piece) => self.rotated_fits(&piece, false),
            None => false,
        }
    }

    fn offset_fits(&self, dx: i16, dy: i16) -> bool {
        match self.active {
            Some(mut piece) => {
                piece.move_right_by(dx);
                piece.fall_by(dy);
                self.position_is_valid(&piece)
            }
            None => false,
        }
    }

    fn rotated_fits(&self, piece: &Piece, clockwise: bool) -> bool {
        let mut rotated = *piece;
        if clockwise {
            rotated.rotate_cw();
        } else {
            rotated.rotate_ccw();
        }
        self.position_is_valid(&rotated)
    }

    /// Collision test: every occupied cell in bounds and not frozen.
    fn position_is_valid(&self, piece: &Piece) -> bool {
        piece
            .occupied_cells()
            .iter()
            .all(|&(x, y)| match self.cell(x, y) {
                Some(cell) => !cell.is_frozen(),
                None => false,
            })
    }

    // ----- movement commands -----

    /// Move the piece one column left; no-op when blocked.
    pub fn move_left(&mut self) -> bool {
        if !self.can_move_left() {
            return false;
        }
        if let Some(piece) = self.active.as_mut() {
            piece.move_left_by(1);
        }
        self.sync_active_cells();
        true
    }

    /// Move the piece one column right; no-op when blocked.
    pub fn move_right(&mut self) -> bool {
        if !self.can_move_right() {
            return false;
        }
        if let Some(piece) = self.active.as_mut() {
            piece.move_right_by(1);
        }
        self.sync_active_cells();
        true
    }

    /// Rotate clockwise, searching the kick table when blocked.
    pub fn rotate_cw(&mut self) -> bool {
        self.rotate_with_kicks(true)
    }

    /// Rotate counter-clockwise, searching the kick table when blocked.
    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate_with_kicks(false)
    }

    /// Drop the piece one row; no-op when blocked.
    ///
    /// Never touches the landed flag; only `tick` (and hard drop) freeze.
    pub fn soft_drop(&mut self) -> bool {
        if !self.can_fall() {
            return false;
        }
        if let Some(piece) = self.active.as_mut() {
            piece.fall_by(1);
        }
        self.sync_active_cells();
        true
    }

    /// Drop the piece as far as it goes, then lock it immediately.
    ///
    /// Bypasses the two-tick lock grace entirely: the piece freezes, full
    /// rows are swept, and the next piece spawns in the same call.
    pub fn hard_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        while self.can_fall() {
            if let Some(piece) = self.active.as_mut() {
                piece.fall_by(1);
            }
        }
        self.remove_active_cells();
        self.freeze_active();
        self.clear_rows();
        self.spawn_piece();
        self.paint_active_cells();
        true
    }

    // ----- rotation kick search -----

    /// Rotation with the positional kick search.
    ///
    /// The bare rotation is the (i=0, j=0) candidate; blocked rotations
    /// then try vertical offsets `i` in 0..3 paired with horizontal
    /// offsets `j` in 0..=i, each signed by a direction, negative
    /// direction first. Each candidate tests two arms: up by i and
    /// sideways by j (toward the turn), then down by i+j and back across
    /// by j-i. The first arm where the rotated piece fits commits. The
    /// iteration order is fixed; it decides which kick wins when several
    /// would fit.
    fn rotate_with_kicks(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        for i in 0..3i16 {
            for j in 0..=i {
                for direction in [-1i16, 1] {
                    let mut candidate = active;
                    candidate.rise_by(i * direction);
                    if clockwise {
                        candidate.move_right_by(j * direction);
                    } else {
                        candidate.move_left_by(j * direction);
                    }
                    if self.rotated_fits(&candidate, clockwise) {
                        self.commit_rotation(candidate, clockwise);
                        return true;
                    }

                    candidate.fall_by((i + j) * direction);
                    if clockwise {
                        candidate.move_left_by((j - i) * direction);
                    } else {
                        candidate.move_right_by((j - i) * direction);
                    }
                    if self.rotated_fits(&candidate, clockwise) {
                        self.commit_rotation(candidate, clockwise);
                        return true;
                    }
                }
            }
        }

        false
    }

    fn commit_rotation(&mut self, mut piece: Piece, clockwise: bool) {
        if clockwise {
            piece.rotate_cw();
        } else {
            piece.rotate_ccw();
        }
        self.active = Some(piece);
        self.sync_active_cells();
    }

    // ----- grid maintenance -----

    /// Revert every Active cell to Empty.
    fn remove_active_cells(&mut self) {
        for cell in &mut self.cells {
            if cell.is_active() {
                *cell = Cell::Empty;
            }
        }
    }

    /// Paint the active piece's footprint as Active cells.
    fn paint_active_cells(&mut self) {
        if let Some(piece) = self.active {
            for (x, y) in piece.occupied_cells() {
                self.set(x, y, Cell::Active(piece.kind()));
            }
        }
    }

    fn sync_active_cells(&mut self) {
        self.remove_active_cells();
        self.paint_active_cells();
    }

    /// Write the active piece into the grid as Frozen cells and discard it.
    fn freeze_active(&mut self) {
        if let Some(piece) = self.active.take() {
            for (x, y) in piece.occupied_cells() {
                self.set(x, y, Cell::Frozen(piece.kind()));
            }
        }
    }

    /// Draw the next piece and place it at its starting anchor.
    ///
    /// A spawn cell overlapping anything already on the board latches the
    /// game-over flag; the piece is still placed and no error is raised.
    fn spawn_piece(&mut self) {
        let kind = self.source.next_kind();
        let piece = Piece::spawn(kind);

        for (x, y) in piece.occupied_cells() {
            if !matches!(self.cell(x, y), Some(Cell::Empty)) {
                self.game_over = true;
            }
        }

        self.active = Some(piece);
    }

    // ----- row clearing -----

    /// Sweep and remove every fully frozen row, shifting rows above down.
    ///
    /// The top-to-bottom scan repeats until a full pass clears nothing, so
    /// a row shifted into an already-scanned index cannot be missed.
    /// Returns the number of rows removed.
    pub fn clear_rows(&mut self) -> u32 {
        let mut cleared = 0;
        loop {
            let mut cleared_this_pass = 0;
            for y in 0..BOARD_HEIGHT as usize {
                if self.row_fully_frozen(y) {
                    self.remove_row(y);
                    cleared_this_pass += 1;
                }
            }
            if cleared_this_pass == 0 {
                return cleared;
            }
            cleared += cleared_this_pass;
        }
    }

    /// A row qualifies for clearing only when every cell is Frozen.
    fn row_fully_frozen(&self, y: usize) -> bool {
        let start = y * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize]
            .iter()
            .all(|cell| cell.is_frozen())
    }

    /// Delete row `y`, shift all rows above it down, empty the top row.
    fn remove_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;
        for row in (1..=y).rev() {
            let src = (row - 1) * width;
            self.cells.copy_within(src..src + width, row * width);
        }
        for cell in &mut self.cells[..width] {
            *cell = Cell::Empty;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Display for Board {
    /// Text dump of the grid, one `|`-separated line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_HEIGHT as i16 {
            write!(f, "|")?;
            for x in 0..BOARD_WIDTH as i16 {
                let symbol = self
                    .cell(x, y)
                    .and_then(|cell| cell.kind())
                    .map_or(' ', |kind| kind.as_char());
                write!(f, "{symbol}|")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfall_types::PieceKind;

    #[test]
    fn test_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_new_board_is_empty_and_running() {
        let board = Board::new(1);
        assert!(board.is_running());
        assert!(!board.has_piece());
        assert!(board.grid().iter().all(|cell| cell.is_empty()));
    }

    #[test]
    fn test_set_and_cell_roundtrip() {
        let mut board = Board::new(1);
        assert!(board.set(5, 10, Cell::Frozen(PieceKind::T)));
        assert_eq!(board.cell(5, 10), Some(Cell::Frozen(PieceKind::T)));

        assert!(!board.set(-1, 0, Cell::Empty));
        assert_eq!(board.cell(10, 0), None);
    }

    #[test]
    fn test_clear_rows_requires_fully_frozen() {
        let mut board = Board::new(1);
        // Nine frozen cells and one active cell: must not clear.
        for x in 0..9 {
            board.set(x, 19, Cell::Frozen(PieceKind::I));
        }
        board.set(9, 19, Cell::Active(PieceKind::I));
        assert_eq!(board.clear_rows(), 0);
        assert!(board.cell(0, 19).unwrap().is_frozen());
    }

    #[test]
    fn test_clear_rows_shifts_rows_down() {
        let mut board = Board::new(1);
        for x in 0..BOARD_WIDTH as i16 {
            board.set(x, 19, Cell::Frozen(PieceKind::S));
        }
        board.set(3, 18, Cell::Frozen(PieceKind::Z));

        assert_eq!(board.clear_rows(), 1);
        // The Z cell dropped into the cleared row.
        assert_eq!(board.cell(3, 19), Some(Cell::Frozen(PieceKind::Z)));
        assert!(board.cell(3, 18).unwrap().is_empty());
    }

    #[test]
    fn test_display_dump_shape() {
        let mut board = Board::new(1);
        board.set(0, 0, Cell::Frozen(PieceKind::L));
        let dump = board.to_string();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), BOARD_HEIGHT as usize);
        assert!(lines[0].starts_with("|L|"));
        assert!(lines.iter().all(|line| line.len() == 21));
    }
}

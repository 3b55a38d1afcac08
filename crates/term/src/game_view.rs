//! GameView: maps the board's grid snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use gridfall_core::Board;
use gridfall_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders the board grid centered in the viewport.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current board into a framebuffer.
    ///
    /// Reads only the grid snapshot and the running flag; active and
    /// frozen cells draw identically since the engine keeps the falling
    /// piece painted into the grid.
    pub fn render(&self, board: &Board, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let well = CellStyle {
            fg: Rgb::new(60, 60, 60),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };
        let border = CellStyle {
            fg: Rgb::new(80, 80, 80),
            bg: Rgb::new(0, 0, 0),
            bold: false,
        };

        // Well background.
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', well);

        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        for y in 0..BOARD_HEIGHT as i16 {
            for x in 0..BOARD_WIDTH as i16 {
                match board.cell(x, y).and_then(|cell| cell.kind()) {
                    Some(kind) => {
                        let style = CellStyle {
                            fg: kind_color(kind),
                            bg: Rgb::new(0, 0, 0),
                            bold: true,
                        };
                        self.fill_cell_rect(&mut fb, start_x, start_y, x as u16, y as u16, '█', style);
                    }
                    None => {
                        self.fill_cell_rect(&mut fb, start_x, start_y, x as u16, y as u16, '·', well);
                    }
                }
            }
        }

        if !board.is_running() {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

/// Display color for each piece kind.
fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(143, 255, 255),
        PieceKind::J => Rgb::new(143, 143, 255),
        PieceKind::L => Rgb::new(255, 195, 143),
        PieceKind::T => Rgb::new(210, 143, 255),
        PieceKind::S => Rgb::new(143, 255, 156),
        PieceKind::Z => Rgb::new(255, 143, 143),
        PieceKind::O => Rgb::new(255, 255, 143),
    }
}

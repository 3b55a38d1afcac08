//! Terminal presentation shell - framebuffer, renderer, and game view
//!
//! Everything the engine does not do: raw-mode terminal handling, styled
//! cell drawing, and the pure mapping from a grid snapshot to a frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;

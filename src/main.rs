//! Terminal gridfall runner (default binary).
//!
//! Fixed 30 FPS frame loop: renders every frame, polls input until the
//! next frame deadline, and advances the engine by one gravity tick every
//! [`GRAVITY_PERIOD_FRAMES`] frames. Input routes on key-press edges
//! only, and only while a piece exists.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use gridfall::core::Board;
use gridfall::input::{handle_key_event, should_quit};
use gridfall::term::{GameView, TerminalRenderer, Viewport};
use gridfall::types::{FRAME_MS, GRAVITY_PERIOD_FRAMES};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);
    let mut board = Board::new(seed);
    let view = GameView::default();

    let frame_duration = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();
    let mut frames_until_tick = GRAVITY_PERIOD_FRAMES;

    while board.is_running() {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&board, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until the next frame.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    // Commands only route while a piece exists.
                    if board.has_piece() {
                        if let Some(action) = handle_key_event(key) {
                            board.apply_action(action);
                        }
                    }
                }
            }
        }

        // Gravity tick.
        if last_frame.elapsed() >= frame_duration {
            last_frame = Instant::now();
            frames_until_tick -= 1;
            if frames_until_tick == 0 {
                frames_until_tick = GRAVITY_PERIOD_FRAMES;
                board.tick();
            }
        }
    }

    // The game-over flag is terminal for the session: present the final
    // frame and hold until any key.
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let fb = view.render(&board, Viewport::new(w, h));
    term.draw(&fb)?;
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

//! Board simulation engine - pure, deterministic, and testable
//!
//! This crate contains the whole falling-block rule set: the grid state
//! machine, collision detection, the rotation kick search, row clearing,
//! and the one-tick update cycle governing spawn, fall, lock and freeze.
//! It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: a seeded board replays the same game
//! - **Testable**: every rule is exercised without a terminal
//! - **Portable**: runs headless or behind any presentation shell
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, tick state machine, command surface
//! - [`piece`]: tetromino shape matrices and the active piece
//! - [`rng`]: seedable LCG and the injected [`rng::PieceSource`]
//!
//! # Control flow
//!
//! The shell calls [`Board::apply_action`] on discrete input events and
//! [`Board::tick`] on a fixed cadence, and reads back the grid snapshot
//! every frame. One `tick()` performs exactly one state transition:
//! spawn, fall one row, grace-land, or freeze-sweep-respawn.
//!
//! # Example
//!
//! ```
//! use gridfall_core::Board;
//! use gridfall_types::GameAction;
//!
//! let mut board = Board::new(12345);
//! board.tick(); // spawns the first piece
//! assert!(board.has_piece());
//!
//! board.apply_action(GameAction::MoveLeft);
//! board.apply_action(GameAction::HardDrop);
//! assert!(board.grid().iter().any(|cell| cell.is_frozen()));
//! ```

pub mod board;
pub mod piece;
pub mod rng;

pub use gridfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use piece::{base_shape, Piece, ShapeMatrix};
pub use rng::{PieceSource, SequenceSource, SimpleRng, UniformSource};

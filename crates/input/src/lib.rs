//! Input mapping - terminal key events to game actions
//!
//! Pure functions only: the shell feeds key-press edges in and routes the
//! resulting [`gridfall_types::GameAction`]s to the board. No repeat or
//! hold handling; every action corresponds to one discrete press.

mod map;

pub use map::{handle_key_event, should_quit};

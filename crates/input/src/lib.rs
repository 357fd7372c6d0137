//! Terminal input module (driver-facing).
//!
//! Maps `crossterm` key events into [`tui_flappy_types::GameAction`]. The
//! game is one-button, so there is no held-key state to track: every mapping
//! is a pure function of the incoming event.

pub mod map;

pub use tui_flappy_types as types;

pub use map::{handle_key_event, should_quit};

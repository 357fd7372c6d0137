//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole simulation: bird physics, pipe scrolling,
//! collision detection, scoring and the run lifecycle. It has **zero
//! dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: the same seed produces an identical run
//! - **Testable**: every gameplay rule is covered by unit tests
//! - **Portable**: usable from any frontend (terminal, GUI, headless)
//! - **Fast**: no allocation on the tick path
//!
//! # Module Structure
//!
//! - [`bird`]: gravity integration with ceiling/ground clamping
//! - [`pipes`]: fixed ring of pipe pairs with recycling and scoring
//! - [`game_state`]: complete state, Playing/GameOver machine, tick/actions
//! - [`rng`]: seeded LCG for reproducible pipe gaps
//!
//! # Example
//!
//! ```
//! use tui_flappy_core::GameState;
//! use tui_flappy_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::Flap);
//! game.tick();
//!
//! assert!(game.bird().velocity < 0.0); // still rising after the flap
//! ```

pub mod bird;
pub mod game_state;
pub mod pipes;
pub mod rng;

pub use bird::Bird;
pub use game_state::GameState;
pub use pipes::{Pipe, PipeField};
pub use rng::SimpleRng;

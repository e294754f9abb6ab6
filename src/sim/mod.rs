//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod food;
pub mod state;
pub mod tick;

pub use food::place_food;
pub use state::{Direction, GameOverCause, GamePhase, GameState, Segment};
pub use tick::{GameEvent, check_collision, tick};
